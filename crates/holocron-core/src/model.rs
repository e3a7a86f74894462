//! Data model: the fixed collection universe, identifier-keyed collections,
//! and the `DataUniverse` aggregate that owns all six of them.
//!
//! Records are untyped JSON objects keyed by their `url` field. Both the
//! record-level and collection-level maps rely on serde_json's
//! `preserve_order` feature so iteration follows page-arrival order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::UnknownCollection;

/// Path marker the remote API uses for same-universe resource links.
///
/// A string field containing this marker is a candidate cross-collection
/// reference.
pub const API_MARKER: &str = "https://swapi.co/api/";

/// One record: a field-name to value mapping, where exactly one field (the
/// `url` field) holds the record's own identifier.
pub type Record = Map<String, Value>;

/// The fixed, closed universe of collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Characters,
    Planets,
    Species,
    Starships,
    Films,
    Vehicles,
}

impl CollectionKind {
    /// All collections, in the fixed enumeration order used by the linker.
    pub const ALL: [CollectionKind; 6] = [
        CollectionKind::Characters,
        CollectionKind::Planets,
        CollectionKind::Species,
        CollectionKind::Starships,
        CollectionKind::Films,
        CollectionKind::Vehicles,
    ];

    /// Local collection name: cache file stem, linker target name, query key.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Characters => "characters",
            CollectionKind::Planets => "planets",
            CollectionKind::Species => "species",
            CollectionKind::Starships => "starships",
            CollectionKind::Films => "films",
            CollectionKind::Vehicles => "vehicles",
        }
    }

    /// Path segment on the remote API.
    ///
    /// The remote exposes characters under `people`. Linking only knows the
    /// local names, so a reference URL pointing at `.../people/N/` resolves
    /// only when the field itself is named `characters`.
    pub fn remote_path(&self) -> &'static str {
        match self {
            CollectionKind::Characters => "people",
            other => other.as_str(),
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "characters" => Ok(CollectionKind::Characters),
            "planets" => Ok(CollectionKind::Planets),
            "species" => Ok(CollectionKind::Species),
            "starships" => Ok(CollectionKind::Starships),
            "films" => Ok(CollectionKind::Films),
            "vehicles" => Ok(CollectionKind::Vehicles),
            other => Err(UnknownCollection(other.to_string())),
        }
    }
}

/// Extract a record's identifier: the `url` field when present, otherwise
/// the first field whose name contains `url` and holds a string.
pub fn record_id(record: &Record) -> Option<&str> {
    if let Some(Value::String(id)) = record.get("url") {
        return Some(id);
    }
    record
        .iter()
        .find(|(name, value)| name.contains("url") && value.is_string())
        .and_then(|(_, value)| value.as_str())
}

/// An identifier-keyed set of records of one kind.
///
/// Insertion order is page-arrival order and is preserved for iteration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    records: Map<String, Value>,
}

impl Collection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record keyed by its own identifier field.
    ///
    /// Returns the identifier used, or `None` when the record carries no
    /// identifier field (the record is dropped). A duplicate identifier
    /// silently replaces the earlier record.
    pub fn insert_record(&mut self, record: Record) -> Option<String> {
        let id = record_id(&record)?.to_string();
        self.records.insert(id.clone(), Value::Object(record));
        Some(id)
    }

    /// Look up a record by identifier.
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.records.get(id)
    }

    /// Mutable access to a record by identifier.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Value> {
        self.records.get_mut(id)
    }

    /// Identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.records.keys()
    }

    /// Records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &Value> {
        self.records.values()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Record> for Collection {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut collection = Collection::new();
        for record in iter {
            collection.insert_record(record);
        }
        collection
    }
}

/// The one explicitly owned aggregate holding all six collections.
///
/// Constructed empty, populated by the gather coordinator, linked exactly
/// once, then read-only for the remainder of the process.
#[derive(Debug, Clone, Default)]
pub struct DataUniverse {
    collections: [Collection; 6],
    linked: bool,
}

impl DataUniverse {
    /// Create an empty universe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow one collection.
    pub fn collection(&self, kind: CollectionKind) -> &Collection {
        &self.collections[kind.index()]
    }

    /// Mutably borrow one collection.
    pub fn collection_mut(&mut self, kind: CollectionKind) -> &mut Collection {
        &mut self.collections[kind.index()]
    }

    /// Replace one collection wholesale (used by the coordinator as each
    /// gather completes).
    pub fn set_collection(&mut self, kind: CollectionKind, collection: Collection) {
        self.collections[kind.index()] = collection;
    }

    /// Collections in the fixed enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (CollectionKind, &Collection)> {
        CollectionKind::ALL
            .iter()
            .map(move |kind| (*kind, self.collection(*kind)))
    }

    /// Total record count across all collections.
    pub fn total_records(&self) -> usize {
        self.collections.iter().map(Collection::len).sum()
    }

    /// Whether the linker has run.
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Mark the universe as linked. Called once by the coordinator, after
    /// which no further mutation is allowed.
    pub fn mark_linked(&mut self) {
        self.linked = true;
    }
}
