//! Core error types.

use std::path::PathBuf;
use thiserror::Error;

/// A collection name outside the fixed universe.
///
/// This is the only process-fatal condition in the system: referencing an
/// unknown collection from the serving layer is a misconfiguration and must
/// fail fast at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown collection '{0}' (expected one of: characters, planets, species, starships, films, vehicles)")]
pub struct UnknownCollection(pub String);

/// A resolution policy name outside the supported set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown resolution policy '{0}' (expected 'single-pass' or 'fixed-point')")]
pub struct UnknownPolicy(pub String);

/// Errors that can occur while persisting cache snapshots.
///
/// Load-side failures are deliberately not represented here: a snapshot that
/// is missing, unreadable or malformed is treated as a cache miss, not an
/// error.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache directory could not be created
    #[error("failed to create cache directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Snapshot file could not be written
    #[error("failed to write snapshot '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Collection could not be serialized
    #[error("failed to serialize snapshot for '{collection}': {source}")]
    Serialize {
        collection: String,
        source: serde_json::Error,
    },
}

impl CacheError {
    /// Create a CreateDir error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Create a Write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Create a Serialize error.
    pub fn serialize(collection: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialize {
            collection: collection.into(),
            source,
        }
    }
}

/// Errors surfaced to callers of the query evaluator.
///
/// These are request-level errors: a malformed filter fails the one query
/// that carried it and nothing else.
#[derive(Error, Debug)]
pub enum QueryError {
    /// Filter expression is not valid JSON after quote normalization
    #[error("malformed filter expression: {message}")]
    Parse { message: String },

    /// Filter parsed but is not a flat string-to-string mapping
    #[error("invalid filter: {message}")]
    InvalidFilter { message: String },
}

impl QueryError {
    /// Create a Parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an InvalidFilter error.
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            message: message.into(),
        }
    }
}
