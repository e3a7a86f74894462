//! Per-collection paginated gatherer.
//!
//! Cache first: a present, non-empty snapshot short-circuits the network
//! entirely. Otherwise pages are walked strictly sequentially until the
//! remote reports no further page or a request fails; only a fully
//! successful walk is cached.

use std::sync::Arc;

use tracing::{debug, info, warn};

use holocron_core::{CacheStore, Collection, CollectionKind};

use crate::source::PageSource;

/// Result of gathering one collection.
#[derive(Debug, Clone)]
pub struct GatherOutcome {
    pub kind: CollectionKind,
    pub collection: Collection,
    /// Whether the collection came from a cache snapshot
    pub from_cache: bool,
    /// False when pagination was truncated by a failed or timed-out page
    pub complete: bool,
}

/// Gathers collections from a page source, consulting the cache first.
#[derive(Clone)]
pub struct Gatherer {
    source: Arc<dyn PageSource>,
    cache: Arc<CacheStore>,
}

impl Gatherer {
    /// Create a gatherer over a page source and cache store.
    pub fn new(source: Arc<dyn PageSource>, cache: Arc<CacheStore>) -> Self {
        Self { source, cache }
    }

    /// Gather one collection end to end.
    ///
    /// Never fails: network errors truncate pagination and are logged, and
    /// the outcome carries whatever records were collected (possibly none).
    pub async fn gather(&self, kind: CollectionKind) -> GatherOutcome {
        if let Some(collection) = self.cache.load(kind) {
            info!(collection = %kind, records = collection.len(), "loaded from cache");
            return GatherOutcome {
                kind,
                collection,
                from_cache: true,
                complete: true,
            };
        }

        let (collection, complete) = self.walk_pages(kind).await;

        // Partial walks are never cached: the snapshot must only ever hold a
        // complete collection.
        if complete {
            match self.cache.save(kind, &collection) {
                Ok(true) => debug!(collection = %kind, "snapshot saved"),
                Ok(false) => debug!(collection = %kind, "snapshot already present"),
                Err(e) => warn!(collection = %kind, error = %e, "failed to save snapshot"),
            }
        }

        info!(
            collection = %kind,
            records = collection.len(),
            complete,
            "done gathering"
        );

        GatherOutcome {
            kind,
            collection,
            from_cache: false,
            complete,
        }
    }

    /// Walk pages 1, 2, 3… sequentially, folding results into a collection.
    async fn walk_pages(&self, kind: CollectionKind) -> (Collection, bool) {
        let mut collection = Collection::new();
        let mut page_number = 1u32;
        let mut complete = true;

        loop {
            match self.source.fetch_page(kind, page_number).await {
                Ok(page) => {
                    let has_next = page.has_next();
                    for record in page.results {
                        if collection.insert_record(record).is_none() {
                            warn!(collection = %kind, page = page_number, "record without identifier field, skipped");
                        }
                    }
                    if !has_next {
                        break;
                    }
                    page_number += 1;
                }
                Err(e) => {
                    warn!(
                        collection = %kind,
                        page = page_number,
                        error = %e,
                        "page fetch failed, truncating pagination"
                    );
                    complete = false;
                    break;
                }
            }
        }

        (collection, complete)
    }
}
