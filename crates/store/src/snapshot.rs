//! Current-state snapshot store
//!
//! A single JSON document mapping hotel code to the latest known state,
//! replaced wholesale on every run. Reads degrade to an empty map on any
//! failure; writes go through a temp file and a rename so a crash mid-write
//! cannot corrupt previously good data.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Result, StoreError};
use crate::types::SnapshotEntry;

/// Handle to the snapshot document
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a handle for the snapshot at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this store reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current snapshot
    ///
    /// A missing, unreadable, or unparseable file yields an empty map. The
    /// snapshot is derived state; assuming "no history" is always safe.
    pub fn load(&self) -> BTreeMap<String, SnapshotEntry> {
        if !self.path.exists() {
            return BTreeMap::new();
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read snapshot, treating as empty");
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to parse snapshot, treating as empty");
                BTreeMap::new()
            }
        }
    }

    /// Replace the snapshot document
    ///
    /// Writes to a sibling temp file and renames it over the target, so
    /// readers either see the old document or the new one, never a
    /// truncated mix.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if encoding or any file operation fails. The
    /// previous document survives a failed save.
    pub fn save(&self, entries: &BTreeMap<String, SnapshotEntry>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;
