//! Core types for the generation domain

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::config::SiteProfile;

/// Serialization format of a loaded spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
    /// Format could not be told from the source; try JSON, then YAML
    Unknown,
}

impl SpecFormat {
    /// Guess the format from a file path or URL and an optional content type
    pub fn detect(source: &str, content_type: Option<&str>) -> Self {
        let content_type = content_type.unwrap_or("");
        let source = source.split(['?', '#']).next().unwrap_or(source);

        if content_type.contains("json") || source.ends_with(".json") {
            SpecFormat::Json
        } else if content_type.contains("yaml")
            || source.ends_with(".yaml")
            || source.ends_with(".yml")
        {
            SpecFormat::Yaml
        } else {
            SpecFormat::Unknown
        }
    }
}

impl fmt::Display for SpecFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecFormat::Json => write!(f, "json"),
            SpecFormat::Yaml => write!(f, "yaml"),
            SpecFormat::Unknown => write!(f, "unknown"),
        }
    }
}

/// Raw text of a specification as it was loaded
#[derive(Debug, Clone)]
pub struct RawSpec {
    /// Path or URL the spec came from
    pub source: String,
    pub content: String,
    pub format: SpecFormat,
}

impl RawSpec {
    pub fn new(source: impl Into<String>, content: impl Into<String>, format: SpecFormat) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
            format,
        }
    }
}

/// Generated document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Size of the content once written, in bytes
    pub fn byte_len(&self) -> usize {
        self.content.len()
    }
}

/// Result of one generator run
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub full_reference: Artifact,
    pub summary: Artifact,
    /// Operations that made it into the endpoint index
    pub endpoint_count: usize,
}

impl GenerationResult {
    /// Artifacts in write order
    pub fn artifacts(&self) -> [&Artifact; 2] {
        [&self.full_reference, &self.summary]
    }

    pub fn into_artifacts(self) -> Vec<Artifact> {
        vec![self.full_reference, self.summary]
    }
}

/// Everything the summary template gets to see
#[derive(Debug, Clone, Serialize)]
pub struct SummaryContext {
    #[serde(flatten)]
    pub profile: SiteProfile,
    pub base_url: String,
    /// Rendered endpoint index, trailing whitespace already trimmed
    pub endpoints: String,
}
