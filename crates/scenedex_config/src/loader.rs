//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::IndexConfig;
use std::path::Path;

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE: &str = "scenedex.toml";

/// Loads and validates `scenedex.toml` from a project directory.
///
/// A directory without a configuration file gets [`IndexConfig::default`].
pub fn load_config(project_dir: &Path) -> Result<IndexConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    if !config_path.is_file() {
        return Ok(IndexConfig::default());
    }
    load_config_file(&config_path)
}

/// Loads and validates an explicitly named configuration file.
pub fn load_config_file(path: &Path) -> Result<IndexConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `scenedex.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<IndexConfig, ConfigError> {
    let config: IndexConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are usable.
fn validate_config(config: &IndexConfig) -> Result<(), ConfigError> {
    if config.build.batch_size == 0 {
        return Err(ConfigError::ValidationError(
            "build.batch_size must be at least 1".to_string(),
        ));
    }
    if config.scan.extensions.is_empty() {
        return Err(ConfigError::ValidationError(
            "scan.extensions must not be empty".to_string(),
        ));
    }
    Ok(())
}
