//! Parsing and validation of `scenedex.toml` configuration files.
//!
//! This crate reads the optional configuration file and produces a
//! strongly-typed [`IndexConfig`] with defaults for every setting.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE};
pub use types::*;
