//! Holocron CLI - Star Wars API aggregation and querying
//!
//! A command-line interface for gathering the remote collections, inspecting
//! the snapshot cache, and querying the linked data set.
//!
//! # Usage
//!
//! ```bash
//! # Fetch and cache every collection, then link
//! holocron gather
//!
//! # Query a collection with a substring filter
//! holocron query characters --filter "{'name': 'Sky'}"
//!
//! # Inspect the cache
//! holocron status
//!
//! # Drop the cache
//! holocron clean --yes
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use holocron_core::ResolutionPolicy;

mod commands;

/// Holocron - Star Wars API aggregator
#[derive(Parser, Debug)]
#[command(name = "holocron")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Args, Debug, Clone)]
struct GlobalOptions {
    /// Path to configuration file
    #[arg(long, short = 'c', global = true, env = "HOLOCRON_CONFIG")]
    config: Option<PathBuf>,

    /// Remote API base URL
    #[arg(long, global = true, env = "HOLOCRON_BASE_URL")]
    base_url: Option<String>,

    /// Snapshot cache directory
    #[arg(long, global = true, env = "HOLOCRON_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Reference resolution policy (single-pass, fixed-point)
    #[arg(long, global = true, env = "HOLOCRON_POLICY", value_parser = parse_policy)]
    policy: Option<ResolutionPolicy>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

/// Parse a resolution policy from string
fn parse_policy(s: &str) -> Result<ResolutionPolicy, String> {
    s.parse()
        .map_err(|e: holocron_core::UnknownPolicy| e.to_string())
}

impl GlobalOptions {
    /// Convert global options to config overrides
    fn to_config_overrides(&self) -> holocron_config::ConfigOverrides {
        holocron_config::ConfigOverrides {
            base_url: self.base_url.clone(),
            cache_dir: self.cache_dir.clone(),
            policy: self.policy,
            ..Default::default()
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Gather every collection from cache or network, then link
    Gather(commands::gather::GatherArgs),

    /// Query a collection of the linked data set
    Query(commands::query::QueryArgs),

    /// Show snapshot cache state per collection
    Status(commands::status::StatusArgs),

    /// Remove snapshot cache files
    Clean(commands::clean::CleanArgs),

    /// View and manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let log_level = if cli.global.quiet {
        Level::ERROR
    } else if cli.global.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Execute the command
    match cli.command {
        Commands::Gather(args) => commands::gather::execute(args, cli.global).await,
        Commands::Query(args) => commands::query::execute(args, cli.global).await,
        Commands::Status(args) => commands::status::execute(args, cli.global).await,
        Commands::Clean(args) => commands::clean::execute(args, cli.global).await,
        Commands::Config(cmd) => commands::config::execute(cmd, cli.global).await,
    }
}
