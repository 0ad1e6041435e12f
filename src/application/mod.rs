//! Application layer - the generate/check use case and its ports

pub mod dto;
pub mod errors;
pub mod generate_docs;
pub mod traits;

pub use dto::*;
pub use errors::*;
pub use generate_docs::*;
pub use traits::*;
