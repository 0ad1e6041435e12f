//! Composite OpenAPI loader that picks a loading strategy per source

use crate::generation::{GenerationError, RawSpec, SpecLoader};
use async_trait::async_trait;

use super::{FileSpecLoader, HttpSpecLoader};

/// Routes URLs to the HTTP loader and everything else to the file loader
pub struct CompositeSpecLoader {
    http: HttpSpecLoader,
    file: FileSpecLoader,
}

impl CompositeSpecLoader {
    pub fn new() -> Result<Self, GenerationError> {
        Ok(Self {
            http: HttpSpecLoader::new()?,
            file: FileSpecLoader::new(),
        })
    }
}

#[async_trait]
impl SpecLoader for CompositeSpecLoader {
    async fn load(&self, source: &str) -> Result<RawSpec, GenerationError> {
        tracing::debug!("CompositeSpecLoader: Loading from source: {source}");

        if source.starts_with("http://") || source.starts_with("https://") {
            tracing::debug!("CompositeSpecLoader: Using HTTP loader");
            self.http.load(source).await
        } else {
            tracing::debug!("CompositeSpecLoader: Using file loader");
            self.file.load(source).await
        }
    }
}
