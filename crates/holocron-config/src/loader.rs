//! Configuration loader with layered sources.
//!
//! Merge order: defaults → global `~/.holocron/config.toml` → explicit
//! config file → CLI overrides. Later sources override earlier ones,
//! field by field.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::{ConfigOverrides, HolocronConfig};

/// Configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Global configuration directory name.
const GLOBAL_CONFIG_DIR: &str = ".holocron";

/// Layered configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Global config directory (e.g., `~/.holocron`)
    global_config_dir: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader that detects the global config directory.
    pub fn new() -> Self {
        let global_config_dir = dirs::home_dir().map(|h| h.join(GLOBAL_CONFIG_DIR));
        Self { global_config_dir }
    }

    /// Create a loader with a custom global config directory.
    ///
    /// Useful for testing.
    pub fn with_global_dir(global_dir: impl Into<PathBuf>) -> Self {
        Self {
            global_config_dir: Some(global_dir.into()),
        }
    }

    /// Get the global config file path.
    pub fn global_config_path(&self) -> Option<PathBuf> {
        self.global_config_dir
            .as_ref()
            .map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Load configuration with an optional explicit file and CLI overrides.
    pub fn load(
        &self,
        explicit: Option<&Path>,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<HolocronConfig, ConfigError> {
        let mut config = HolocronConfig::default();

        if let Some(global) = self.load_global()? {
            config = merge_configs(config, global);
        }

        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading explicit config file");
            let explicit_config = load_config_file(path)?;
            config = merge_configs(config, explicit_config);
        }

        if let Some(ovr) = overrides {
            config.apply_overrides(ovr);
        }

        Ok(config)
    }

    /// Load only the global configuration, if present.
    pub fn load_global(&self) -> Result<Option<HolocronConfig>, ConfigError> {
        let Some(global_path) = self.global_config_path() else {
            debug!("no home directory found, skipping global config");
            return Ok(None);
        };

        if !global_path.exists() {
            trace!(path = %global_path.display(), "global config not found");
            return Ok(None);
        }

        debug!(path = %global_path.display(), "loading global config");
        load_config_file(&global_path).map(Some)
    }

    /// Write the global config file, creating the directory as needed.
    pub fn save_global(&self, config: &HolocronConfig) -> Result<PathBuf, ConfigError> {
        let Some(ref global_dir) = self.global_config_dir else {
            return Err(ConfigError::NoHomeDir);
        };

        if !global_dir.exists() {
            std::fs::create_dir_all(global_dir)
                .map_err(|e| ConfigError::create_dir(global_dir, e))?;
        }

        let path = global_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(config)?;
        std::fs::write(&path, content).map_err(|e| ConfigError::write_file(&path, e))?;
        Ok(path)
    }
}

/// Load a configuration file from disk.
fn load_config_file(path: &Path) -> Result<HolocronConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    toml::from_str(&content).map_err(|e| ConfigError::parse_toml(path, e))
}

/// Merge two configurations, with `overlay` taking precedence for every
/// field that differs from the default.
fn merge_configs(base: HolocronConfig, overlay: HolocronConfig) -> HolocronConfig {
    let default = HolocronConfig::default();
    HolocronConfig {
        remote: crate::RemoteConfig {
            base_url: if overlay.remote.base_url != default.remote.base_url {
                overlay.remote.base_url
            } else {
                base.remote.base_url
            },
            timeout_ms: if overlay.remote.timeout_ms != default.remote.timeout_ms {
                overlay.remote.timeout_ms
            } else {
                base.remote.timeout_ms
            },
        },
        storage: crate::StorageConfig {
            cache_dir: if overlay.storage.cache_dir != default.storage.cache_dir {
                overlay.storage.cache_dir
            } else {
                base.storage.cache_dir
            },
        },
        linking: crate::LinkingConfig {
            policy: if overlay.linking.policy != default.linking.policy {
                overlay.linking.policy
            } else {
                base.linking.policy
            },
        },
        logging: crate::LoggingConfig {
            level: if overlay.logging.level != default.logging.level {
                overlay.logging.level
            } else {
                base.logging.level
            },
        },
    }
}
