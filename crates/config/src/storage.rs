//! Storage configuration
//!
//! Where the price log and snapshot live. File names are fixed; only the
//! directory moves.

use std::path::PathBuf;

use serde::Deserialize;

/// Append-only price log, one JSON entry per line
pub const LOG_FILE: &str = "price_log.jsonl";

/// Current-state snapshot document
pub const SNAPSHOT_FILE: &str = "price_history.json";

/// Storage configuration
///
/// # Example
///
/// ```toml
/// [storage]
/// dir = "data"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding both store files
    /// Default: data
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
        }
    }
}

impl StorageConfig {
    /// Path of the append-only price log
    pub fn log_path(&self) -> PathBuf {
        self.dir.join(LOG_FILE)
    }

    /// Path of the snapshot document
    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_FILE)
    }
}
