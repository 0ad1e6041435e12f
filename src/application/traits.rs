//! Port interfaces for the application layer

use async_trait::async_trait;
use std::path::PathBuf;

use crate::application::ApplicationError;
use crate::generation::Artifact;

/// Service for writing generated artifacts to their destination
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Write all artifacts, replacing whatever was there
    async fn write_artifacts(&self, artifacts: &[Artifact]) -> Result<(), ApplicationError>;

    /// Paths whose current content differs from the artifact, including missing files
    async fn stale_artifacts(
        &self,
        artifacts: &[Artifact],
    ) -> Result<Vec<PathBuf>, ApplicationError>;
}
