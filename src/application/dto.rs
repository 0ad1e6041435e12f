//! Data Transfer Objects for application layer

use std::path::PathBuf;

use crate::application::ValidationError;
use crate::config::{GeneratorConfig, SiteProfile};

/// What to do with the rendered documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Overwrite the output files
    Write,
    /// Compare against the files on disk without touching them
    Check,
}

/// Request to generate the documentation files
#[derive(Debug, Clone)]
pub struct GenerateDocsRequest {
    pub spec_source: String,
    pub full_output: PathBuf,
    pub summary_output: PathBuf,
    pub profile: SiteProfile,
    pub mode: RunMode,
}

impl GenerateDocsRequest {
    pub fn from_config(config: GeneratorConfig, mode: RunMode) -> Self {
        Self {
            spec_source: config.spec_source,
            full_output: config.full_output,
            summary_output: config.summary_output,
            profile: config.profile,
            mode,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.spec_source.trim().is_empty() {
            return Err(ValidationError::EmptySpecSource);
        }
        if self.full_output.as_os_str().is_empty() || self.summary_output.as_os_str().is_empty() {
            return Err(ValidationError::EmptyOutputPath);
        }
        if self.full_output == self.summary_output {
            return Err(ValidationError::SameOutputPath(self.full_output.clone()));
        }
        Ok(())
    }
}

/// One file the run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Response from a generation run
#[derive(Debug, Clone)]
pub struct GenerateDocsResponse {
    pub mode: RunMode,
    /// Files in write order; in check mode these were compared, not written
    pub files: Vec<WrittenFile>,
    pub endpoint_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerateDocsRequest {
        GenerateDocsRequest::from_config(GeneratorConfig::with_defaults().unwrap(), RunMode::Write)
    }

    #[test]
    fn test_default_request_is_valid() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_empty_spec_source() {
        let mut invalid = request();
        invalid.spec_source = "  ".to_string();
        assert!(matches!(
            invalid.validate().unwrap_err(),
            ValidationError::EmptySpecSource
        ));
    }

    #[test]
    fn test_empty_output_path() {
        let mut invalid = request();
        invalid.summary_output = PathBuf::new();
        assert!(matches!(
            invalid.validate().unwrap_err(),
            ValidationError::EmptyOutputPath
        ));
    }

    #[test]
    fn test_same_output_path() {
        let mut invalid = request();
        invalid.summary_output = invalid.full_output.clone();
        assert!(matches!(
            invalid.validate().unwrap_err(),
            ValidationError::SameOutputPath(_)
        ));
    }
}
