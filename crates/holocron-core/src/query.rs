//! Query evaluator.
//!
//! Returns a collection's records in insertion order, optionally narrowed by
//! a flat field-to-substring filter. Filter expressions arrive as strings in
//! a relaxed quoting convention (single quotes allowed) and are normalized
//! to strict JSON before parsing.

use serde_json::Value;

use crate::error::QueryError;
use crate::model::{CollectionKind, DataUniverse};

/// A parsed filter: field name to expected substring, applied as a logical
/// AND in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: Vec<(String, String)>,
}

impl Filter {
    /// The (field, substring) pairs.
    pub fn clauses(&self) -> &[(String, String)] {
        &self.clauses
    }

    /// Whether a record survives every clause.
    ///
    /// A clause matches when the string representation of the record's field
    /// contains the substring, case-sensitive. A missing or null field fails
    /// the clause rather than erroring the query.
    pub fn matches(&self, record: &Value) -> bool {
        self.clauses.iter().all(|(field, needle)| {
            record
                .get(field)
                .and_then(field_text)
                .map(|text| text.contains(needle))
                .unwrap_or(false)
        })
    }
}

/// String representation of a field value for substring matching.
///
/// Strings match on their content, numbers and booleans on their display
/// form, arrays and linked record objects on their JSON serialization.
/// Null has no representation and never matches.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        composite => Some(composite.to_string()),
    }
}

/// Parse a filter expression string.
///
/// Single quotes are normalized to double quotes first, then the result must
/// parse as a JSON object whose values are all strings.
pub fn parse_filter(raw: &str) -> Result<Filter, QueryError> {
    let normalized = raw.replace('\'', "\"");
    let value: Value =
        serde_json::from_str(&normalized).map_err(|e| QueryError::parse(e.to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| QueryError::invalid_filter("filter must be an object"))?;

    let mut clauses = Vec::with_capacity(object.len());
    for (field, expected) in object {
        let needle = expected.as_str().ok_or_else(|| {
            QueryError::invalid_filter(format!("filter value for '{field}' must be a string"))
        })?;
        clauses.push((field.clone(), needle.to_string()));
    }

    Ok(Filter { clauses })
}

/// Evaluate a query against one collection of the (linked) universe.
///
/// With no filter, returns every record in insertion order.
pub fn query<'u>(
    universe: &'u DataUniverse,
    kind: CollectionKind,
    filter: Option<&str>,
) -> Result<Vec<&'u Value>, QueryError> {
    let records = universe.collection(kind).records();

    match filter {
        None => Ok(records.collect()),
        Some(raw) => {
            let filter = parse_filter(raw)?;
            Ok(records.filter(|record| filter.matches(record)).collect())
        }
    }
}
