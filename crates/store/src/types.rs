//! Domain records shared across the log, snapshot, and query layers

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One hotel's state as seen in a single run
///
/// Produced by the scraping boundary after validation (non-empty name,
/// positive price). The `code` is derived from `name` via
/// [`hotel_code`](crate::hotel_code) and is the only join key between the
/// log, the snapshot, and cross-source matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Normalized hotel identifier, stable across runs and sources
    pub code: String,

    /// Display name as scraped; not used for joining
    pub name: String,

    /// Nightly price in whole dollars, always positive
    pub price: u32,

    /// Earliest available date, when the source reports one
    pub earliest: Option<NaiveDate>,

    /// On-site credit in dollars, when the source reports one
    pub credit: Option<u32>,

    /// Deep link to the listing
    pub url: Option<String>,
}

/// Per-hotel slice of a log entry
///
/// The log keeps price history, not a link index, so `url` is dropped here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedPrice {
    pub code: String,
    pub name: String,
    pub price: u32,
    pub earliest: Option<NaiveDate>,
    pub credit: Option<u32>,
}

impl From<&Observation> for LoggedPrice {
    fn from(obs: &Observation) -> Self {
        Self {
            code: obs.code.clone(),
            name: obs.name.clone(),
            price: obs.price,
            earliest: obs.earliest,
            credit: obs.credit,
        }
    }
}

/// One immutable record of all hotels observed on a given run
///
/// Serialized as a single JSONL line. Multiple entries may exist for the
/// same date when the job runs more than once per day; the query layer
/// treats them as one logical day for exclusion but lets every entry
/// contribute candidates to the min-search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Calendar date of the run
    pub date: NaiveDate,

    /// Exact time the entry was written
    pub timestamp: DateTime<Utc>,

    /// At most one observation per hotel code, first occurrence wins
    pub hotels: Vec<LoggedPrice>,
}

impl LogEntry {
    /// Build an entry for a run, deduplicating by hotel code
    pub fn for_run(date: NaiveDate, timestamp: DateTime<Utc>, observations: &[Observation]) -> Self {
        let mut hotels: Vec<LoggedPrice> = Vec::with_capacity(observations.len());
        for obs in observations {
            if hotels.iter().any(|h| h.code == obs.code) {
                continue;
            }
            hotels.push(LoggedPrice::from(obs));
        }
        Self {
            date,
            timestamp,
            hotels,
        }
    }
}

/// Current best-known state for one hotel, keyed by code in the snapshot
///
/// Replaced wholesale each run. Never authoritative over the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub price: u32,
    pub name: String,
    pub earliest: Option<NaiveDate>,

    /// Recomputed each run as `min(today's price, historical floor)`
    pub all_time_low: u32,

    /// Date of the run that wrote this entry
    pub updated: NaiveDate,

    /// Observed credit, or the configured default when the source had none
    pub credit: u32,

    /// True when `credit` is the default rather than an observed value
    pub credit_inferred: bool,
}

impl SnapshotEntry {
    /// Build the snapshot entry a run writes for one observation
    ///
    /// `floor` is the all-time low excluding today, `None` for a hotel with
    /// no history. A missing credit falls back to `default_credit` and is
    /// flagged so dashboards can distinguish observed from assumed values.
    pub fn from_observation(
        obs: &Observation,
        floor: Option<&PriceFloor>,
        default_credit: u32,
        today: NaiveDate,
    ) -> Self {
        let all_time_low = floor.map_or(obs.price, |f| obs.price.min(f.price));
        let (credit, credit_inferred) = match obs.credit {
            Some(credit) => (credit, false),
            None => (default_credit, true),
        };
        Self {
            price: obs.price,
            name: obs.name.clone(),
            earliest: obs.earliest,
            all_time_low,
            updated: today,
            credit,
            credit_inferred,
        }
    }
}

/// All-time-low query result: the minimum price and where it was seen
///
/// Derived from the log, never stored. Ties are broken toward the first
/// occurrence in append order, so `date` is the earliest date the minimum
/// was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFloor {
    pub price: u32,
    pub date: NaiveDate,

    /// Earliest available date recorded alongside the minimum
    pub earliest: Option<NaiveDate>,
}

/// One point of a per-hotel price series, for trend views
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: u32,
    pub earliest: Option<NaiveDate>,
    pub credit: Option<u32>,
}
