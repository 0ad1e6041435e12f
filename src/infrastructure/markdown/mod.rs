//! Markdown rendering of the full API reference

pub mod reference_converter;
pub mod schema;

pub use reference_converter::*;
