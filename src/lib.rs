//! llmstxt-gen
//!
//! Generates `llms.txt` (a condensed, LLM-friendly index of an API) and
//! `llms-full.txt` (the full markdown reference) from an OpenAPI document.
#![deny(unsafe_code)]

pub mod application;
pub mod config;
pub mod generation;
pub mod infrastructure;
