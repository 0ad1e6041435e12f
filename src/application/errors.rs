//! Application layer error types

use std::path::PathBuf;
use thiserror::Error;

/// Application layer errors
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Generation error: {0}")]
    GenerationError(#[from] crate::generation::GenerationError),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("Generated files are out of date: {}", display_paths(.0))]
    StaleOutput(Vec<PathBuf>),
}

/// Validation errors for requests
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Spec source cannot be empty")]
    EmptySpecSource,

    #[error("Output path cannot be empty")]
    EmptyOutputPath,

    #[error("Full reference and summary would both be written to {0}")]
    SameOutputPath(PathBuf),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
