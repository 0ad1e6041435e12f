//! Infrastructure layer - concrete implementations of domain ports

pub mod markdown;
pub mod openapi;
pub mod output;
pub mod summary;
