//! Summary document (`llms.txt`) rendering

pub mod tera_renderer;

pub use tera_renderer::*;
