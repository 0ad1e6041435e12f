//! Use case for generating `llms.txt` and `llms-full.txt`

use crate::application::{
    ApplicationError, GenerateDocsRequest, GenerateDocsResponse, OutputService, RunMode,
    WrittenFile,
};
use crate::generation::{GenerationContext, GenerationOrchestrator, SpecLoader};
use std::sync::Arc;

/// Use case for generating the documentation files
pub struct GenerateDocsUseCase {
    spec_loader: Arc<dyn SpecLoader>,
    generation_orchestrator: Arc<GenerationOrchestrator>,
    output_service: Arc<dyn OutputService>,
}

impl GenerateDocsUseCase {
    pub fn new(
        spec_loader: Arc<dyn SpecLoader>,
        generation_orchestrator: Arc<GenerationOrchestrator>,
        output_service: Arc<dyn OutputService>,
    ) -> Self {
        Self {
            spec_loader,
            generation_orchestrator,
            output_service,
        }
    }

    pub async fn execute(
        &self,
        request: GenerateDocsRequest,
    ) -> Result<GenerateDocsResponse, ApplicationError> {
        // 1. Validate request
        request.validate()?;

        // 2. Load the spec text
        let spec = self.spec_loader.load(&request.spec_source).await?;
        tracing::info!("Loaded {} ({} bytes)", spec.source, spec.content.len());

        // 3. Render both documents
        let context = GenerationContext::new(
            spec,
            request.profile,
            request.full_output,
            request.summary_output,
        );
        let result = self.generation_orchestrator.generate(&context).await?;

        let files: Vec<WrittenFile> = result
            .artifacts()
            .iter()
            .map(|artifact| WrittenFile {
                path: artifact.path.clone(),
                bytes: artifact.byte_len(),
            })
            .collect();
        let endpoint_count = result.endpoint_count;

        // 4. Write or compare
        let artifacts = result.into_artifacts();
        match request.mode {
            RunMode::Write => {
                self.output_service.write_artifacts(&artifacts).await?;
            }
            RunMode::Check => {
                let stale = self.output_service.stale_artifacts(&artifacts).await?;
                if !stale.is_empty() {
                    return Err(ApplicationError::StaleOutput(stale));
                }
                tracing::info!("Generated files are up to date");
            }
        }

        Ok(GenerateDocsResponse {
            mode: request.mode,
            files,
            endpoint_count,
        })
    }
}
