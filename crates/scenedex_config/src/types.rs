//! Configuration types deserialized from `scenedex.toml`.

use serde::Deserialize;

/// Default number of documents per accumulation phase.
pub const DEFAULT_BATCH_SIZE: usize = 5000;

/// The top-level configuration parsed from `scenedex.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Incremental build settings.
    #[serde(default)]
    pub build: BuildConfig,
    /// Which files a directory scan picks up.
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Settings for the incremental build orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Documents extracted between two checkpoints. `1` checkpoints after
    /// every document.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl BuildConfig {
    /// Returns a build configuration with the given batch size.
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self { batch_size }
    }
}

/// Settings for discovering scene files under a directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// File extensions (without the dot) treated as scene files.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

impl ScanConfig {
    /// Returns `true` if `extension` is one of the configured scene extensions.
    ///
    /// Comparison ignores ASCII case.
    pub fn matches_extension(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_extensions() -> Vec<String> {
    ["unity", "prefab", "asset", "mat", "controller", "anim"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = IndexConfig::default();
        assert_eq!(config.build.batch_size, 5000);
        assert!(config.scan.extensions.contains(&"unity".to_string()));
        assert!(config.scan.extensions.contains(&"prefab".to_string()));
    }

    #[test]
    fn extension_matching_ignores_case() {
        let scan = ScanConfig::default();
        assert!(scan.matches_extension("unity"));
        assert!(scan.matches_extension("Prefab"));
        assert!(!scan.matches_extension("cs"));
    }

    #[test]
    fn with_batch_size() {
        assert_eq!(BuildConfig::with_batch_size(1).batch_size, 1);
    }
}
