//! Append-only price log
//!
//! One JSONL line per run. Each line is independently parseable, so a
//! corrupt line (e.g. a truncated trailing write) costs exactly that line
//! and nothing else. The log is the source of truth for all-time-low
//! queries; it is never rewritten.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use tracing::warn;

use crate::error::{Result, StoreError};
use crate::types::{LogEntry, Observation, PricePoint};

/// Handle to the append-only JSONL price log
///
/// Holds only the path; every operation opens the file fresh. Runs are
/// daily and entries are small, so there is nothing to keep open.
#[derive(Debug, Clone)]
pub struct PriceLog {
    path: PathBuf,
}

impl PriceLog {
    /// Create a handle for the log at `path`. The file does not need to
    /// exist yet; the first append creates it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this log reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durably append one entry for a run
    ///
    /// Duplicate hotel codes in the input are dropped, first occurrence
    /// wins. The parent directory is created on demand.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the entry cannot be encoded or the file
    /// cannot be written. The caller surfaces this; an append failure must
    /// not crash a run.
    pub fn append(&self, observations: &[Observation], date: NaiveDate) -> Result<()> {
        let entry = LogEntry::for_run(date, Utc::now(), observations);
        let line = serde_json::to_string(&entry)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;

        file.write_all(line.as_bytes())
            .and_then(|()| file.write_all(b"\n"))
            .map_err(|e| StoreError::io(&self.path, e))?;

        Ok(())
    }

    /// Read every entry in append order
    ///
    /// A missing or unreadable file yields an empty history, and lines that
    /// fail to parse are skipped with a warning. Losing history degrades
    /// classification to "everything is new"; it never blocks a run.
    pub fn read_all(&self) -> Vec<LogEntry> {
        if !self.path.exists() {
            return Vec::new();
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read price log, treating as empty");
                return Vec::new();
            }
        };

        let mut entries = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<LogEntry>(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        line = idx + 1,
                        error = %e,
                        "skipping unparseable log line"
                    );
                }
            }
        }
        entries
    }

    /// Per-hotel price series in append order, for trend views
    ///
    /// Takes at most one point per entry per the log's dedupe guarantee.
    /// With `last = Some(n)` only the most recent `n` points are kept.
    pub fn history_for(&self, code: &str, last: Option<usize>) -> Vec<PricePoint> {
        let mut points: Vec<PricePoint> = self
            .read_all()
            .into_iter()
            .filter_map(|entry| {
                let hotel = entry.hotels.into_iter().find(|h| h.code == code)?;
                Some(PricePoint {
                    date: entry.date,
                    price: hotel.price,
                    earliest: hotel.earliest,
                    credit: hotel.credit,
                })
            })
            .collect();

        if let Some(n) = last
            && points.len() > n
        {
            points.drain(..points.len() - n);
        }
        points
    }
}

#[cfg(test)]
#[path = "log_test.rs"]
mod log_test;
