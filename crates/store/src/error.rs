//! Storage error types

use std::io;
use std::path::Path;
use thiserror::Error;

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the log and snapshot stores
///
/// Read paths never return these: a missing or corrupt file degrades to an
/// empty history. Write failures are surfaced so the caller can log them
/// and decide whether to continue.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read or write a storage file
    #[error("storage I/O failed for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Failed to encode a record
    #[error("failed to encode record: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Create an Io error for a path
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
