//! Config command - View and manage configuration
//!
//! Shows the effective layered configuration, sets values in the global
//! config file, and reports where that file lives.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;

use holocron_config::{ConfigLoader, HolocronConfig};

use super::load_config;
use crate::GlobalOptions;

/// Config management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show(ShowArgs),

    /// Set a value in the global config file
    Set(SetArgs),

    /// Show the global config file path
    Path(PathArgs),
}

/// Arguments for the show command
#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Arguments for the set command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., "remote.base_url", "linking.policy")
    key: String,

    /// Value to set
    value: String,
}

/// Arguments for the path command
#[derive(clap::Args, Debug)]
pub struct PathArgs {}

/// Execute the config command
pub async fn execute(cmd: ConfigCommand, global: GlobalOptions) -> Result<()> {
    match cmd {
        ConfigCommand::Show(args) => execute_show(args, global),
        ConfigCommand::Set(args) => execute_set(args),
        ConfigCommand::Path(args) => execute_path(args),
    }
}

fn execute_show(args: ShowArgs, global: GlobalOptions) -> Result<()> {
    let config = load_config(&global)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("{}", toml::to_string_pretty(&config)?);
    }

    Ok(())
}

fn execute_set(args: SetArgs) -> Result<()> {
    let loader = ConfigLoader::new();
    let mut config = loader.load_global()?.unwrap_or_default();

    set_config_value(&mut config, &args.key, &args.value)
        .with_context(|| format!("Failed to set configuration key: {}", args.key))?;

    let path = loader.save_global(&config)?;
    println!(
        "Set {} = {} in {}",
        args.key,
        args.value,
        path.display()
    );

    Ok(())
}

fn execute_path(_args: PathArgs) -> Result<()> {
    let loader = ConfigLoader::new();
    match loader.global_config_path() {
        Some(path) => {
            let status = if path.exists() { "exists" } else { "not found" };
            println!("{} ({})", path.display(), status);
        }
        None => println!("not available (no home directory)"),
    }
    Ok(())
}

/// Set a configuration value by dotted key path.
fn set_config_value(config: &mut HolocronConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "remote.base_url" => config.remote.base_url = value.to_string(),
        "remote.timeout_ms" => config.remote.timeout_ms = value.parse()?,
        "storage.cache_dir" => config.storage.cache_dir = PathBuf::from(value),
        "linking.policy" => config.linking.policy = value.parse()?,
        "logging.level" => config.logging.level = value.to_string(),
        other => anyhow::bail!("Unknown configuration key: {}", other),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use holocron_core::ResolutionPolicy;

    #[test]
    fn test_set_config_value_by_key() {
        let mut config = HolocronConfig::default();

        set_config_value(&mut config, "remote.base_url", "http://local/api/").unwrap();
        set_config_value(&mut config, "remote.timeout_ms", "500").unwrap();
        set_config_value(&mut config, "linking.policy", "fixed-point").unwrap();

        assert_eq!(config.remote.base_url, "http://local/api/");
        assert_eq!(config.remote.timeout_ms, 500);
        assert_eq!(config.linking.policy, ResolutionPolicy::FixedPoint);
    }

    #[test]
    fn test_set_config_value_rejects_bad_input() {
        let mut config = HolocronConfig::default();

        assert!(set_config_value(&mut config, "remote.port", "80").is_err());
        assert!(set_config_value(&mut config, "remote.timeout_ms", "soon").is_err());
        assert!(set_config_value(&mut config, "linking.policy", "eager").is_err());
    }
}
