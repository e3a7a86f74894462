//! Holocron Gather - Paginated remote gathering
//!
//! This crate walks the remote API's paged listings and assembles the
//! in-memory universe:
//! - `PageSource` trait and the reqwest-backed `HttpPageSource`
//! - Per-collection `Gatherer` with cache-first semantics
//! - `Coordinator` spawning one gather task per collection, with a
//!   join-all barrier gating the one-time linking pass

pub mod coordinator;
pub mod error;
pub mod gatherer;
pub mod source;

// Re-exports for convenience
pub use coordinator::{Coordinator, GatherReport, GatherRun};
pub use error::{FetchError, UniverseError};
pub use gatherer::{GatherOutcome, Gatherer};
pub use source::{HttpPageSource, Page, PageSource, DEFAULT_TIMEOUT_MS};
