//! CLI command implementations

pub mod clean;
pub mod config;
pub mod gather;
pub mod query;
pub mod status;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use holocron_config::{ConfigLoader, HolocronConfig};
use holocron_core::CacheStore;
use holocron_gather::{Coordinator, HttpPageSource};

use crate::GlobalOptions;

/// Load the layered configuration for a command invocation.
pub fn load_config(global: &GlobalOptions) -> Result<HolocronConfig> {
    ConfigLoader::new()
        .load(
            global.config.as_deref(),
            Some(&global.to_config_overrides()),
        )
        .context("Failed to load configuration")
}

/// Build the cache store for the configured directory.
pub fn build_cache(config: &HolocronConfig) -> CacheStore {
    CacheStore::new(&config.storage.cache_dir)
}

/// Build the gather coordinator over the configured remote.
pub fn build_coordinator(config: &HolocronConfig) -> Result<Coordinator> {
    let source = HttpPageSource::new(
        &config.remote.base_url,
        Duration::from_millis(config.remote.timeout_ms),
    )
    .context("Failed to build HTTP page source")?;

    Ok(Coordinator::new(
        Arc::new(source),
        Arc::new(build_cache(config)),
        config.linking.policy,
    ))
}
