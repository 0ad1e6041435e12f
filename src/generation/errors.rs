//! Error types for the generation domain

use std::error::Error as _;
use thiserror::Error;

/// Errors that can occur while producing documentation artifacts
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Spec loading error: {0}")]
    LoadError(String),

    #[error("Spec parsing error: {0}")]
    ParseError(String),

    #[error("Markdown conversion error: {0}")]
    ConversionError(String),

    #[error("Render error: {0}")]
    RenderError(String),
}

impl From<tera::Error> for GenerationError {
    fn from(err: tera::Error) -> Self {
        // tera keeps the useful part of the message in the source chain
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        GenerationError::RenderError(message)
    }
}
