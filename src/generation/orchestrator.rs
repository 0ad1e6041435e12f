//! Generation orchestration - coordinates one documentation run

use crate::generation::{
    Artifact, EndpointIndex, GenerationContext, GenerationError, GenerationResult,
    MarkdownConverter, SummaryRenderer,
};
use crate::infrastructure::openapi::SpecParser;
use std::sync::Arc;

/// Produces both documents from a loaded spec
pub struct GenerationOrchestrator {
    converter: Arc<dyn MarkdownConverter>,
    renderer: Arc<dyn SummaryRenderer>,
}

impl GenerationOrchestrator {
    pub fn new(converter: Arc<dyn MarkdownConverter>, renderer: Arc<dyn SummaryRenderer>) -> Self {
        Self {
            converter,
            renderer,
        }
    }

    /// Execute the generation workflow
    pub async fn generate(
        &self,
        context: &GenerationContext,
    ) -> Result<GenerationResult, GenerationError> {
        // 1. Full reference straight from the spec text
        let full_reference = self.converter.convert(&context.spec).await?;
        tracing::debug!(
            "Converted {} into {} bytes of markdown",
            context.spec.source,
            full_reference.len()
        );

        // 2. Parse and index
        let document = SpecParser::parse_raw(&context.spec)?;
        let index = EndpointIndex::build(&document);
        tracing::debug!(
            "Indexed {} endpoints in {} groups",
            index.entry_count(),
            index.non_empty_groups().count()
        );

        // 3. Summary
        let summary = self
            .renderer
            .render(&context.summary_context(&document, &index))?;

        Ok(GenerationResult {
            full_reference: Artifact::new(&context.full_output, full_reference),
            summary: Artifact::new(&context.summary_output, summary),
            endpoint_count: index.entry_count(),
        })
    }
}
