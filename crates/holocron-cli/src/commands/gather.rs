//! Gather command - Fetch and link every collection
//!
//! Runs the full pipeline: cache-or-network gather per collection, the
//! completion barrier, and the one-time linking pass, then reports what was
//! collected.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::{build_coordinator, load_config};
use crate::GlobalOptions;

/// Arguments for the gather command
#[derive(Args, Debug)]
pub struct GatherArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Per-collection gather summary for output
#[derive(Debug, Serialize)]
struct GatherSummary {
    collection: String,
    records: usize,
    from_cache: bool,
    complete: bool,
}

/// Execute the gather command
pub async fn execute(args: GatherArgs, global: GlobalOptions) -> Result<()> {
    let config = load_config(&global)?;
    let coordinator = build_coordinator(&config)?;

    let run = coordinator.gather_all().await?;

    let summaries: Vec<GatherSummary> = run
        .reports
        .iter()
        .map(|r| GatherSummary {
            collection: r.kind.to_string(),
            records: r.records,
            from_cache: r.from_cache,
            complete: r.complete,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        for summary in &summaries {
            let origin = if summary.from_cache { "cache" } else { "network" };
            let note = if summary.complete { "" } else { " (truncated)" };
            println!(
                "{:<12} {:>5} records  [{}]{}",
                summary.collection, summary.records, origin, note
            );
        }
        println!(
            "\nTotal: {} records across {} collections",
            run.universe.total_records(),
            summaries.len()
        );
    }

    Ok(())
}
