//! Holocron Core - Data model, caching, linking and querying
//!
//! This crate provides the in-memory side of the aggregator:
//! - The fixed six-collection universe and its identifier-keyed records
//! - Write-once JSON snapshot caching per collection
//! - Cross-reference linking of resource URLs into inline record objects
//! - Filtered query evaluation over the linked universe
//!
//! Network gathering lives in `holocron-gather`; this crate has no I/O
//! beyond the snapshot files.

pub mod cache;
pub mod error;
pub mod linker;
pub mod model;
pub mod query;

// Re-exports for convenience
pub use cache::CacheStore;
pub use error::{CacheError, QueryError, UnknownCollection, UnknownPolicy};
pub use linker::{classify_field, link, ResolutionPolicy};
pub use model::{record_id, Collection, CollectionKind, DataUniverse, Record, API_MARKER};
pub use query::{parse_filter, query, Filter};
