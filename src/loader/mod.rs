//! YAML Loader module
//!
//! Parse pagination settings from YAML files.
//!
//! # Overview
//!
//! The loader module provides:
//! - `Settings` - Process-wide defaults plus the resource catalog
//! - `ResourceDefinition` - Resource and operation override layers
//! - YAML parsing with validation

mod parser;
mod types;

pub use parser::{load_settings, load_settings_from_str};
pub use types::{ResourceDefinition, Settings};

#[cfg(test)]
mod tests;
