//! Filesystem-based output service implementation

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::{ApplicationError, OutputService};
use crate::generation::Artifact;

/// Output service that writes artifacts to the filesystem
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemOutputService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn write_artifacts(&self, artifacts: &[Artifact]) -> Result<(), ApplicationError> {
        for artifact in artifacts {
            // Create parent directory if needed
            if let Some(parent) = artifact.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).await.map_err(|e| {
                    ApplicationError::OutputError(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }

            // Truncates any previous content
            let mut file = fs::File::create(&artifact.path).await.map_err(|e| {
                ApplicationError::OutputError(format!(
                    "Failed to create file {}: {}",
                    artifact.path.display(),
                    e
                ))
            })?;

            file.write_all(artifact.content.as_bytes())
                .await
                .map_err(|e| {
                    ApplicationError::OutputError(format!(
                        "Failed to write file {}: {}",
                        artifact.path.display(),
                        e
                    ))
                })?;

            file.flush().await.map_err(|e| {
                ApplicationError::OutputError(format!(
                    "Failed to flush file {}: {}",
                    artifact.path.display(),
                    e
                ))
            })?;

            tracing::debug!(
                "Wrote {} ({} bytes)",
                artifact.path.display(),
                artifact.byte_len()
            );
        }

        Ok(())
    }

    async fn stale_artifacts(
        &self,
        artifacts: &[Artifact],
    ) -> Result<Vec<PathBuf>, ApplicationError> {
        let mut stale = Vec::new();
        for artifact in artifacts {
            match fs::read(&artifact.path).await {
                Ok(existing) if existing == artifact.content.as_bytes() => {}
                Ok(_) => stale.push(artifact.path.clone()),
                Err(e) if e.kind() == ErrorKind::NotFound => stale.push(artifact.path.clone()),
                Err(e) => {
                    return Err(ApplicationError::OutputError(format!(
                        "Failed to read file {}: {}",
                        artifact.path.display(),
                        e
                    )));
                }
            }
        }
        Ok(stale)
    }
}
