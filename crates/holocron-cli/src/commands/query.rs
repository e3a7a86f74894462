//! Query command - Filtered reads over the linked data set
//!
//! Gathers (cheap on a warm cache), links, then evaluates the filter and
//! prints matching records as JSON. An unknown collection name fails fast
//! before any network work.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use holocron_core::{query, CollectionKind};

use super::{build_coordinator, load_config};
use crate::GlobalOptions;

/// Arguments for the query command
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Collection to query (characters, planets, species, starships, films, vehicles)
    collection: String,

    /// Filter expression, e.g. "{'name': 'Sky', 'gender': 'Male'}"
    #[arg(long, short = 'f')]
    filter: Option<String>,

    /// Comma-separated list of fields to include in the output
    #[arg(long)]
    fields: Option<String>,

    /// Print only the number of matching records
    #[arg(long)]
    count: bool,
}

/// Execute the query command
pub async fn execute(args: QueryArgs, global: GlobalOptions) -> Result<()> {
    // Misconfigured collection names are the one fail-fast condition.
    let kind: CollectionKind = args
        .collection
        .parse()
        .context("Invalid collection name")?;

    let config = load_config(&global)?;
    let coordinator = build_coordinator(&config)?;

    let run = coordinator.gather_all().await?;
    let results = query(&run.universe, kind, args.filter.as_deref())?;

    if args.count {
        println!("{}", results.len());
        return Ok(());
    }

    let output: Vec<Value> = match &args.fields {
        None => results.into_iter().cloned().collect(),
        Some(fields) => {
            let wanted: Vec<&str> = fields.split(',').map(str::trim).collect();
            results
                .into_iter()
                .map(|record| project(record, &wanted))
                .collect()
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Keep only the named fields of a record, in the requested order.
fn project(record: &Value, fields: &[&str]) -> Value {
    let mut projected = serde_json::Map::new();
    for field in fields {
        if let Some(value) = record.get(*field) {
            projected.insert((*field).to_string(), value.clone());
        }
    }
    Value::Object(projected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_keeps_requested_fields_only() {
        let record = json!({"url": "C1", "name": "Luke", "height": "172"});
        let projected = project(&record, &["name", "height"]);
        assert_eq!(projected, json!({"name": "Luke", "height": "172"}));
    }

    #[test]
    fn test_project_skips_absent_fields() {
        let record = json!({"url": "C1", "name": "Luke"});
        let projected = project(&record, &["name", "mass"]);
        assert_eq!(projected, json!({"name": "Luke"}));
    }
}
