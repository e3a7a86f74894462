//! Gather error types.

use thiserror::Error;

/// Errors that can occur while fetching one page of a remote listing.
///
/// These are caught by the gatherer: a failed page ends that collection's
/// pagination early and is logged, never propagated as a hard failure.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// Request error below the HTTP layer
    #[error("network error: {0}")]
    Network(String),

    /// Request exceeded the fixed per-page timeout
    #[error("page request timed out")]
    Timeout,

    /// Remote answered with a non-success status
    #[error("remote returned status {status}")]
    Status { status: u16 },

    /// Response body was not a valid page listing
    #[error("invalid page body: {0}")]
    InvalidBody(String),
}

impl FetchError {
    /// Create a Status error.
    pub fn status(status: u16) -> Self {
        Self::Status { status }
    }

    /// Create an InvalidBody error.
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::InvalidBody(message.into())
    }
}

/// Errors surfaced by the gather coordinator.
///
/// Per-collection network failures never appear here; the only hard failure
/// is a gather task that panicked or was aborted.
#[derive(Error, Debug)]
pub enum UniverseError {
    /// A spawned gather task failed to join
    #[error("gather task failed: {message}")]
    TaskJoin { message: String },
}

impl UniverseError {
    /// Create a TaskJoin error.
    pub fn task_join(message: impl Into<String>) -> Self {
        Self::TaskJoin {
            message: message.into(),
        }
    }
}
