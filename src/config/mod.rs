//! Configuration module for the service
//!
//! Supports loading configuration from TOML files and environment variables.

mod settings;

pub use settings::*;
