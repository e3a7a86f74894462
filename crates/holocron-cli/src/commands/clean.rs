//! Clean command - Remove snapshot cache files
//!
//! The cache is write-once, so dropping snapshots is the only way to force
//! a re-fetch of a collection.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;

use holocron_core::CollectionKind;

use super::{build_cache, load_config};
use crate::GlobalOptions;

/// Arguments for the clean command
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    yes: bool,

    /// Only remove the snapshot for one collection
    #[arg(long)]
    collection: Option<String>,
}

/// Execute the clean command
pub async fn execute(args: CleanArgs, global: GlobalOptions) -> Result<()> {
    let config = load_config(&global)?;
    let cache = build_cache(&config);

    let targets: Vec<CollectionKind> = match &args.collection {
        Some(name) => vec![name.parse()?],
        None => CollectionKind::ALL.to_vec(),
    };

    if !args.yes {
        print!(
            "Remove {} snapshot(s) under {}? [y/N] ",
            targets.len(),
            cache.dir().display()
        );
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let mut removed = 0usize;
    for kind in targets {
        if cache.remove(kind)? {
            println!("Removed snapshot for {kind}");
            removed += 1;
        }
    }

    println!("Removed {removed} snapshot(s).");
    Ok(())
}
