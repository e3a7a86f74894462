//! Cross-reference linker.
//!
//! Rewrites fields whose values are same-universe resource URLs into the
//! referenced record objects, in place, best effort. Resolution is never an
//! error: an identifier whose target is absent stays a bare identifier.
//!
//! The linker runs exactly once, after every collection has been gathered.
//! Running it earlier or twice produces undefined results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::UnknownPolicy;
use crate::model::{CollectionKind, DataUniverse, API_MARKER};

/// How deep resolution goes relative to linking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionPolicy {
    /// One pass in the fixed enumeration order, mutating as it goes. A field
    /// referencing a collection processed earlier in the pass resolves to an
    /// already-linked record; one referencing a later collection resolves to
    /// a not-yet-linked record. Faithful to the original system.
    #[default]
    SinglePass,

    /// Every reference resolves against a pristine pre-link snapshot, so
    /// resolution depth is uniform (one level) regardless of enumeration
    /// order. Deeper closure cannot terminate on this cyclic data set.
    FixedPoint,
}

impl ResolutionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionPolicy::SinglePass => "single-pass",
            ResolutionPolicy::FixedPoint => "fixed-point",
        }
    }
}

impl fmt::Display for ResolutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolutionPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single-pass" => Ok(ResolutionPolicy::SinglePass),
            "fixed-point" => Ok(ResolutionPolicy::FixedPoint),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

/// Classify a field as a cross-collection reference.
///
/// A field is a candidate reference when its name does not contain `url`
/// (the identifier field is excluded this way) and the sample value is a
/// string containing the remote API marker. The target is the field name
/// itself when it exactly matches a collection name, otherwise the first
/// path segment after the marker. Unknown targets are not references.
pub fn classify_field(field_name: &str, sample: &Value) -> Option<CollectionKind> {
    if field_name.contains("url") {
        return None;
    }
    let text = sample.as_str()?;
    let marker_pos = text.find(API_MARKER)?;

    if let Ok(kind) = field_name.parse::<CollectionKind>() {
        return Some(kind);
    }

    let tail = &text[marker_pos + API_MARKER.len()..];
    let segment = tail.split('/').next().unwrap_or_default();
    segment.parse().ok()
}

/// Link the whole universe in place.
pub fn link(universe: &mut DataUniverse, policy: ResolutionPolicy) {
    debug!(%policy, "linking cross-collection references");
    match policy {
        ResolutionPolicy::SinglePass => link_pass(universe, None),
        ResolutionPolicy::FixedPoint => {
            let snapshot = universe.clone();
            link_pass(universe, Some(&snapshot));
        }
    }
}

/// One pass over every collection, record and field.
///
/// With `snapshot = None`, lookups observe the live, partially-linked
/// universe (single-pass semantics). With a snapshot, lookups observe the
/// pre-link state.
fn link_pass(universe: &mut DataUniverse, snapshot: Option<&DataUniverse>) {
    for kind in CollectionKind::ALL {
        let ids: Vec<String> = universe.collection(kind).ids().cloned().collect();
        for id in ids {
            let field_names: Vec<String> = match universe
                .collection(kind)
                .get(&id)
                .and_then(Value::as_object)
            {
                Some(record) => record.keys().cloned().collect(),
                None => continue,
            };

            for field in field_names {
                link_field(universe, snapshot, kind, &id, &field);
            }
        }
    }
}

/// Resolve a single field of a single record, if it is a reference.
fn link_field(
    universe: &mut DataUniverse,
    snapshot: Option<&DataUniverse>,
    kind: CollectionKind,
    id: &str,
    field: &str,
) {
    let Some(current) = universe
        .collection(kind)
        .get(id)
        .and_then(|record| record.get(field))
        .cloned()
    else {
        return;
    };

    if current.is_null() {
        return;
    }

    // Sample value: first element for sequences; empty sequences are skipped.
    let sample = match &current {
        Value::Array(items) => match items.first() {
            Some(first) => first,
            None => return,
        },
        other => other,
    };

    let Some(target) = classify_field(field, sample) else {
        return;
    };

    let new_value = {
        let source: &DataUniverse = snapshot.unwrap_or(universe);
        let target_collection = source.collection(target);
        match current {
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| {
                        if let Value::String(id_ref) = &item {
                            if let Some(record) = target_collection.get(id_ref) {
                                return record.clone();
                            }
                        }
                        item
                    })
                    .collect(),
            ),
            Value::String(id_ref) => match target_collection.get(&id_ref) {
                Some(record) => record.clone(),
                None => Value::String(id_ref),
            },
            other => other,
        }
    };

    if let Some(Value::Object(record)) = universe.collection_mut(kind).get_mut(id) {
        record.insert(field.to_string(), new_value);
    }
}
