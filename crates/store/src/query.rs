//! Price-floor queries over the log
//!
//! The log is the source of truth; the floor is recomputed from it on every
//! call rather than cached, so a corrected or trimmed log is reflected
//! immediately.

use chrono::NaiveDate;

use crate::types::{LogEntry, PriceFloor};

/// Find the all-time-low price for one hotel
///
/// Scans `entries` in order and keeps the first strictly-lowest price, so a
/// tie resolves to the earliest occurrence. Entries dated `exclude` are
/// skipped entirely; passing today's date here yields the historical floor a
/// fresh observation should be judged against, even if today's prices were
/// already logged.
///
/// Returns `None` when the hotel has no (remaining) history.
pub fn price_floor(
    entries: &[LogEntry],
    code: &str,
    exclude: Option<NaiveDate>,
) -> Option<PriceFloor> {
    let mut best: Option<PriceFloor> = None;

    for entry in entries {
        if exclude == Some(entry.date) {
            continue;
        }
        let Some(hotel) = entry.hotels.iter().find(|h| h.code == code) else {
            continue;
        };
        if best.is_none_or(|b| hotel.price < b.price) {
            best = Some(PriceFloor {
                price: hotel.price,
                date: entry.date,
                earliest: hotel.earliest,
            });
        }
    }

    best
}
