//! File-based OpenAPI spec loader
//!
//! This loader handles only file I/O. Parsing is left to the consumers of the
//! returned [`RawSpec`].

use async_trait::async_trait;
use tokio::fs;

use crate::generation::{GenerationError, RawSpec, SpecFormat, SpecLoader};

/// Loads OpenAPI specifications from local files
pub struct FileSpecLoader;

impl FileSpecLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSpecLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpecLoader for FileSpecLoader {
    async fn load(&self, source: &str) -> Result<RawSpec, GenerationError> {
        let content = fs::read_to_string(source).await.map_err(|e| {
            GenerationError::LoadError(format!("Failed to read OpenAPI spec {source}: {e}"))
        })?;

        Ok(RawSpec::new(source, content, SpecFormat::detect(source, None)))
    }
}
