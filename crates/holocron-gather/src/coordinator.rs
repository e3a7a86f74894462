//! Gather coordinator.
//!
//! Launches one gather task per collection, waits for all of them on a
//! `JoinSet` (the barrier is the set draining, so completion is structurally
//! exactly-once per collection), then links the universe exactly once.
//! Completion of `gather_all` is the readiness signal: the query boundary is
//! safe to expose only afterwards.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info};

use holocron_core::{link, CacheStore, CollectionKind, DataUniverse, ResolutionPolicy};

use crate::error::UniverseError;
use crate::gatherer::Gatherer;
use crate::source::PageSource;

/// Per-collection summary of a gather run.
#[derive(Debug, Clone)]
pub struct GatherReport {
    pub kind: CollectionKind,
    pub records: usize,
    pub from_cache: bool,
    pub complete: bool,
}

/// A finished gather run: the linked universe plus per-collection reports.
#[derive(Debug)]
pub struct GatherRun {
    pub universe: DataUniverse,
    pub reports: Vec<GatherReport>,
}

/// Runs the gather-link pipeline over the whole collection universe.
pub struct Coordinator {
    gatherer: Gatherer,
    policy: ResolutionPolicy,
}

impl Coordinator {
    /// Create a coordinator.
    pub fn new(
        source: Arc<dyn PageSource>,
        cache: Arc<CacheStore>,
        policy: ResolutionPolicy,
    ) -> Self {
        Self {
            gatherer: Gatherer::new(source, cache),
            policy,
        }
    }

    /// Gather every collection concurrently, then link.
    ///
    /// Collections gather independently of one another; within each, pages
    /// are sequential. A collection truncated by network failure still
    /// reaches the barrier (possibly empty). The linker runs exactly once,
    /// after the barrier, before this future resolves.
    pub async fn gather_all(&self) -> Result<GatherRun, UniverseError> {
        info!("gathering all collections");

        let mut tasks = JoinSet::new();
        for kind in CollectionKind::ALL {
            let gatherer = self.gatherer.clone();
            tasks.spawn(async move { gatherer.gather(kind).await });
        }

        let mut universe = DataUniverse::new();
        let mut reports = Vec::with_capacity(CollectionKind::ALL.len());

        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.map_err(|e| UniverseError::task_join(e.to_string()))?;
            debug!(collection = %outcome.kind, records = outcome.collection.len(), "collection reached barrier");
            reports.push(GatherReport {
                kind: outcome.kind,
                records: outcome.collection.len(),
                from_cache: outcome.from_cache,
                complete: outcome.complete,
            });
            universe.set_collection(outcome.kind, outcome.collection);
        }

        // Barrier passed: every collection is in place, link once.
        link(&mut universe, self.policy);
        universe.mark_linked();

        // Completion order is nondeterministic; report in enumeration order.
        reports.sort_by_key(|r| r.kind as usize);

        info!(records = universe.total_records(), policy = %self.policy, "universe linked and ready");
        Ok(GatherRun { universe, reports })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::source::Page;
    use async_trait::async_trait;
    use serde_json::json;
    use tempfile::TempDir;

    /// One single-page collection universe: every collection returns one
    /// record whose identifier is a resource URL, with cross-references
    /// between characters and planets.
    struct TinyUniverseSource {
        fail: Option<CollectionKind>,
    }

    fn rid(kind: CollectionKind, n: u32) -> String {
        format!("{}{}/{}/", holocron_core::API_MARKER, kind.remote_path(), n)
    }

    #[async_trait]
    impl PageSource for TinyUniverseSource {
        async fn fetch_page(&self, kind: CollectionKind, _page: u32) -> Result<Page, FetchError> {
            if self.fail == Some(kind) {
                return Err(FetchError::status(500));
            }

            let record = match kind {
                CollectionKind::Characters => json!({
                    "url": rid(kind, 1),
                    "name": "Luke Skywalker",
                    "homeworld": rid(CollectionKind::Planets, 1),
                }),
                CollectionKind::Planets => json!({
                    "url": rid(kind, 1),
                    "name": "Tatooine",
                }),
                other => json!({
                    "url": rid(other, 1),
                    "name": other.as_str(),
                }),
            };

            Ok(Page {
                results: vec![record.as_object().unwrap().clone()],
                next: None,
            })
        }
    }

    #[tokio::test]
    async fn test_gather_all_populates_and_links_every_collection() {
        let temp = TempDir::new().unwrap();
        let coordinator = Coordinator::new(
            Arc::new(TinyUniverseSource { fail: None }),
            Arc::new(CacheStore::new(temp.path())),
            ResolutionPolicy::SinglePass,
        );

        let run = coordinator.gather_all().await.unwrap();

        assert!(run.universe.is_linked());
        assert_eq!(run.reports.len(), 6);
        assert_eq!(run.universe.total_records(), 6);

        // Reports come back in enumeration order regardless of completion order.
        let kinds: Vec<CollectionKind> = run.reports.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, CollectionKind::ALL);

        // Linking ran after the barrier: the reference is an inline object.
        let luke = run
            .universe
            .collection(CollectionKind::Characters)
            .get(&rid(CollectionKind::Characters, 1))
            .unwrap();
        assert_eq!(luke["homeworld"]["name"], "Tatooine");
    }

    #[tokio::test]
    async fn test_failed_collection_still_reaches_barrier() {
        let temp = TempDir::new().unwrap();
        let coordinator = Coordinator::new(
            Arc::new(TinyUniverseSource {
                fail: Some(CollectionKind::Planets),
            }),
            Arc::new(CacheStore::new(temp.path())),
            ResolutionPolicy::SinglePass,
        );

        let run = coordinator.gather_all().await.unwrap();

        // The failing collection is present, empty, and marked incomplete.
        let planets = run
            .reports
            .iter()
            .find(|r| r.kind == CollectionKind::Planets)
            .unwrap();
        assert!(!planets.complete);
        assert_eq!(planets.records, 0);

        // Its reference target being absent leaves the identifier bare.
        let luke = run
            .universe
            .collection(CollectionKind::Characters)
            .get(&rid(CollectionKind::Characters, 1))
            .unwrap();
        assert_eq!(luke["homeworld"], json!(rid(CollectionKind::Planets, 1)));
    }
}
