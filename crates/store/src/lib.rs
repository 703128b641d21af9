//! Price history storage and all-time-low tracking
//!
//! The core of staylow: an append-only price log, a current-state snapshot,
//! the all-time-low query, and the classification of a freshly observed
//! price against history.
//!
//! # Storage Layout
//!
//! Two files under a data directory, both owned by explicit store handles
//! (no ambient paths):
//!
//! ```text
//! data/
//! ├── price_log.jsonl       # one log entry per run, append-only
//! └── price_history.json    # current snapshot, replaced wholesale
//! ```
//!
//! The log is the source of truth. The snapshot is a fast read path for
//! dashboards and is always derivable from the log.
//!
//! # Write Order
//!
//! A run appends to the log first and saves the snapshot second. A crash
//! between the two loses only the derived snapshot, never history.
//!
//! # Example
//!
//! ```no_run
//! use staylow_store::{classify, price_floor, PriceLog, Verdict};
//!
//! let log = PriceLog::new("data/price_log.jsonl");
//! let entries = log.read_all();
//! let today = chrono::Utc::now().date_naive();
//! let floor = price_floor(&entries, "grand hyatt seoul", Some(today));
//! match classify(275, floor) {
//!     Verdict::RecordLow { delta, .. } => println!("record low, ${delta} below"),
//!     _ => {}
//! }
//! ```

mod classify;
mod code;
mod error;
mod log;
mod query;
mod snapshot;
mod types;

pub use classify::{Verdict, classify};
pub use code::hotel_code;
pub use error::{Result, StoreError};
pub use log::PriceLog;
pub use query::price_floor;
pub use snapshot::SnapshotStore;
pub use types::{LogEntry, LoggedPrice, Observation, PriceFloor, PricePoint, SnapshotEntry};
