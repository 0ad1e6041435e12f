//! Port interfaces for the generation domain

use crate::generation::{GenerationError, RawSpec, SummaryContext};
use async_trait::async_trait;

/// Loads the raw text of an OpenAPI specification
#[async_trait]
pub trait SpecLoader: Send + Sync {
    /// Load a spec from a source (file path or URL)
    async fn load(&self, source: &str) -> Result<RawSpec, GenerationError>;
}

/// Converts a whole specification into long-form markdown
#[async_trait]
pub trait MarkdownConverter: Send + Sync {
    /// Render the full reference for the given spec text
    async fn convert(&self, spec: &RawSpec) -> Result<String, GenerationError>;
}

/// Renders the condensed summary document
pub trait SummaryRenderer: Send + Sync {
    /// Render the summary for an already indexed spec
    fn render(&self, context: &SummaryContext) -> Result<String, GenerationError>;
}
