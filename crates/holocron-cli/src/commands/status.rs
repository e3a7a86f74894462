//! Status command - Snapshot cache inspection
//!
//! Reports, per collection, whether a snapshot exists, how many records it
//! holds, and its size on disk. Purely local; never touches the network.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use holocron_core::CollectionKind;

use super::{build_cache, load_config};
use crate::GlobalOptions;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Per-collection cache state
#[derive(Debug, Serialize)]
struct SnapshotStatus {
    collection: String,
    cached: bool,
    records: usize,
    size_bytes: u64,
}

/// Execute the status command
pub async fn execute(args: StatusArgs, global: GlobalOptions) -> Result<()> {
    let config = load_config(&global)?;
    let cache = build_cache(&config);

    let statuses: Vec<SnapshotStatus> = CollectionKind::ALL
        .iter()
        .map(|&kind| {
            let path = cache.snapshot_path(kind);
            let size_bytes = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            // A present-but-empty snapshot counts as not cached, matching
            // the gatherer's view.
            let records = cache.load(kind).map(|c| c.len()).unwrap_or(0);
            SnapshotStatus {
                collection: kind.to_string(),
                cached: records > 0,
                records,
                size_bytes,
            }
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
    } else {
        println!("Cache directory: {}", cache.dir().display());
        for status in &statuses {
            if status.cached {
                println!(
                    "{:<12} {:>5} records  {:>8} bytes",
                    status.collection, status.records, status.size_bytes
                );
            } else {
                println!("{:<12} not cached", status.collection);
            }
        }
    }

    Ok(())
}
