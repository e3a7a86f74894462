//! Write-once snapshot cache.
//!
//! One JSON file per collection under a fixed directory. Presence of a
//! non-empty snapshot is the sole cache-hit signal; a snapshot is never
//! overwritten once written, so `save` is safe to call unconditionally
//! after every successful gather.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::CacheError;
use crate::model::{Collection, CollectionKind};

/// Snapshot file extension.
const SNAPSHOT_EXT: &str = "cache";

/// Durable store for per-collection snapshots.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the snapshot file for a collection.
    pub fn snapshot_path(&self, kind: CollectionKind) -> PathBuf {
        self.dir
            .join(format!("{}.{}", kind.as_str(), SNAPSHOT_EXT))
    }

    /// Whether a snapshot file exists for a collection.
    pub fn exists(&self, kind: CollectionKind) -> bool {
        self.snapshot_path(kind).exists()
    }

    /// Load a collection snapshot.
    ///
    /// Returns `None` when the file is missing, unreadable, unparseable, or
    /// deserializes to an empty collection. Empty snapshots count as misses
    /// so a failed earlier run cannot pin a collection to zero records.
    pub fn load(&self, kind: CollectionKind) -> Option<Collection> {
        let path = self.snapshot_path(kind);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(collection = %kind, path = %path.display(), error = %e, "failed to read snapshot, treating as miss");
                return None;
            }
        };

        let collection: Collection = match serde_json::from_str(&content) {
            Ok(collection) => collection,
            Err(e) => {
                warn!(collection = %kind, path = %path.display(), error = %e, "corrupt snapshot, treating as miss");
                return None;
            }
        };

        if collection.is_empty() {
            debug!(collection = %kind, "snapshot is empty, treating as miss");
            return None;
        }

        debug!(collection = %kind, records = collection.len(), "loaded snapshot");
        Some(collection)
    }

    /// Persist a collection snapshot.
    ///
    /// Returns `Ok(false)` without touching disk when a snapshot already
    /// exists (write-once), `Ok(true)` after a successful write. Write
    /// failures are reported to the caller but must not abort gathering.
    pub fn save(&self, kind: CollectionKind, collection: &Collection) -> Result<bool, CacheError> {
        let path = self.snapshot_path(kind);
        if path.exists() {
            debug!(collection = %kind, "snapshot already present, not overwriting");
            return Ok(false);
        }

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| CacheError::create_dir(&self.dir, e))?;
        }

        let content = serde_json::to_string(collection)
            .map_err(|e| CacheError::serialize(kind.as_str(), e))?;
        fs::write(&path, content).map_err(|e| CacheError::write(&path, e))?;

        debug!(collection = %kind, records = collection.len(), path = %path.display(), "saved snapshot");
        Ok(true)
    }

    /// Delete the snapshot for a collection.
    ///
    /// Returns whether a file was removed.
    pub fn remove(&self, kind: CollectionKind) -> std::io::Result<bool> {
        let path = self.snapshot_path(kind);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_collection() -> Collection {
        let mut c = Collection::new();
        for (id, name) in [("P1", "Tatooine"), ("P2", "Alderaan")] {
            c.insert_record(json!({"url": id, "name": name}).as_object().unwrap().clone());
        }
        c
    }

    #[test]
    fn test_load_missing_is_none() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());
        assert!(store.load(CollectionKind::Planets).is_none());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path().join("data"));

        let collection = sample_collection();
        assert!(store.save(CollectionKind::Planets, &collection).unwrap());

        let loaded = store.load(CollectionKind::Planets).unwrap();
        assert_eq!(loaded, collection);
    }

    #[test]
    fn test_save_is_write_once() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());

        let first = sample_collection();
        assert!(store.save(CollectionKind::Planets, &first).unwrap());

        let mut second = Collection::new();
        second.insert_record(json!({"url": "P9", "name": "Hoth"}).as_object().unwrap().clone());

        // Second save reports success but leaves the snapshot untouched.
        assert!(!store.save(CollectionKind::Planets, &second).unwrap());
        assert_eq!(store.load(CollectionKind::Planets).unwrap(), first);
    }

    #[test]
    fn test_corrupt_snapshot_is_miss() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());

        std::fs::write(store.snapshot_path(CollectionKind::Films), "{not json").unwrap();
        assert!(store.load(CollectionKind::Films).is_none());
    }

    #[test]
    fn test_empty_snapshot_is_miss() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());

        std::fs::write(store.snapshot_path(CollectionKind::Films), "{}").unwrap();
        assert!(store.load(CollectionKind::Films).is_none());
        // The empty file still exists, so save stays a no-op; an operator
        // must clean it to force a re-cache. Matches write-once semantics.
        assert!(store.exists(CollectionKind::Films));
    }

    #[test]
    fn test_remove_snapshot() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());

        store.save(CollectionKind::Planets, &sample_collection()).unwrap();
        assert!(store.remove(CollectionKind::Planets).unwrap());
        assert!(!store.remove(CollectionKind::Planets).unwrap());
        assert!(store.load(CollectionKind::Planets).is_none());
    }

    #[test]
    fn test_save_creates_directory() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path().join("nested").join("data"));

        assert!(store.save(CollectionKind::Vehicles, &sample_collection()).unwrap());
        assert!(store.snapshot_path(CollectionKind::Vehicles).exists());
    }
}
