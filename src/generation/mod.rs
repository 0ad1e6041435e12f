//! Generation domain - turns a loaded OpenAPI spec into documentation
//!
//! The orchestrator converts the spec into a full markdown reference, indexes
//! its summarized operations by tag, and renders the condensed summary from
//! the index and the site profile.

pub mod context;
pub mod errors;
pub mod index;
pub mod orchestrator;
pub mod traits;
pub mod types;

pub use context::*;
pub use errors::*;
pub use index::*;
pub use orchestrator::*;
pub use traits::*;
pub use types::*;

// Re-export OpenAPI types from infrastructure module
pub use crate::infrastructure::openapi::{
    HttpMethod, Operation, PathItem, Server, SpecDocument, TagDefinition,
};
