//! Holocron configuration
//!
//! TOML configuration with layered loading: defaults, then the global
//! `~/.holocron/config.toml`, then an explicit `--config` file, then CLI
//! overrides. Later sources win, field by field.

pub mod error;
pub mod loader;

pub use error::ConfigError;
pub use loader::ConfigLoader;

use std::path::PathBuf;

use holocron_core::ResolutionPolicy;
use serde::{Deserialize, Serialize};

/// Default remote API base URL.
pub const DEFAULT_BASE_URL: &str = "https://swapi.co/api/";

/// Default per-page request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 3500;

/// Default cache directory.
pub const DEFAULT_CACHE_DIR: &str = "data";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HolocronConfig {
    pub remote: RemoteConfig,
    pub storage: StorageConfig,
    pub linking: LinkingConfig,
    pub logging: LoggingConfig,
}

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the paged listing API
    pub base_url: String,

    /// Fixed upper bound per page request, in milliseconds
    pub timeout_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Snapshot storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the per-collection snapshot files
    pub cache_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
        }
    }
}

/// Reference-resolution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LinkingConfig {
    /// How deep resolution goes relative to linking order
    pub policy: ResolutionPolicy,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// CLI-level overrides applied on top of file configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub cache_dir: Option<PathBuf>,
    pub policy: Option<ResolutionPolicy>,
    pub log_level: Option<String>,
}

impl HolocronConfig {
    /// Apply CLI overrides in place.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref base_url) = overrides.base_url {
            self.remote.base_url = base_url.clone();
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.remote.timeout_ms = timeout_ms;
        }
        if let Some(ref cache_dir) = overrides.cache_dir {
            self.storage.cache_dir = cache_dir.clone();
        }
        if let Some(policy) = overrides.policy {
            self.linking.policy = policy;
        }
        if let Some(ref level) = overrides.log_level {
            self.logging.level = level.clone();
        }
    }
}
