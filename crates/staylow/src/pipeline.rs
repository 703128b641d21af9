//! The daily update pipeline
//!
//! One run: fetch listings from both sources, classify every hotel against
//! its historical price floor, persist the run, and deliver the report.
//!
//! Failure handling is graded by what the failure costs:
//! - primary fetch failure aborts the run before any state changes and
//!   sends a short notice instead of a report
//! - secondary fetch failure only costs promo annotations
//! - storage failures are logged and the run continues from in-memory data
//! - delivery failures are logged per chunk; history is already persisted
//!
//! Write order is fixed: the append-only log first (source of truth), the
//! derived snapshot second. A crash between the two loses nothing that
//! cannot be recomputed.

use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, error, info, warn};

use staylow_matching::{SequenceRatio, pair};
use staylow_notify::Messenger;
use staylow_report::{ClassifiedListing, assemble, split_for_delivery};
use staylow_scrape::{Listing, ListingSource, Offer, OfferSource};
use staylow_store::{
    Observation, PriceLog, SnapshotEntry, SnapshotStore, Verdict, classify, hotel_code,
    price_floor,
};

/// Everything a run needs beyond its collaborators
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Report header title
    pub title: String,

    /// Maximum characters per delivered chunk
    pub chunk_size: usize,

    /// Credit assumed when a listing reports none
    pub default_credit: u32,

    /// Similarity score a promo match must strictly exceed
    pub threshold: f64,

    /// Calendar date this run is recorded under
    pub today: NaiveDate,

    /// Timestamp rendered in the report header
    pub now: NaiveDateTime,
}

/// Category counts for one completed run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Distinct hotels observed after deduplication
    pub observed: usize,

    /// Hotels that picked up a promo annotation
    pub promos_matched: usize,

    pub new: usize,
    pub record_lows: usize,
    pub rises: usize,
    pub unchanged: usize,

    pub chunks_delivered: usize,
    pub chunks_failed: usize,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Report assembled and handed to delivery (or printed without a
    /// messenger)
    Completed(RunSummary),

    /// Primary fetch failed: notice sent, stores untouched
    Aborted,
}

/// Execute one full update run
///
/// `secondary` is `None` when the promo source is disabled. `messenger` is
/// `None` for a dry run; chunks go to stdout instead.
pub async fn run_once<P, S, M>(
    primary: &P,
    secondary: Option<&S>,
    messenger: Option<&M>,
    log: &PriceLog,
    snapshot: &SnapshotStore,
    options: &RunOptions,
) -> RunOutcome
where
    P: ListingSource,
    S: OfferSource,
    M: Messenger,
{
    let listings = match primary.fetch().await {
        Ok(listings) => listings,
        Err(e) => {
            warn!(source = primary.name(), error = %e, "primary fetch failed, aborting run");
            let notice = format!(
                "⚠️ <b>{}</b>\nFetching hotel prices failed; no update this run.",
                options.title
            );
            deliver_chunk(messenger, &notice).await;
            return RunOutcome::Aborted;
        }
    };

    let offers = match secondary {
        Some(source) => match source.fetch().await {
            Ok(offers) => offers,
            Err(e) => {
                warn!(
                    source = source.name(),
                    error = %e,
                    "secondary fetch failed, continuing without promos"
                );
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let observations = to_observations(listings);
    info!(
        hotels = observations.len(),
        offers = offers.len(),
        date = %options.today,
        "fetched listings"
    );

    let pairings = pair(
        &observations,
        &offers,
        |obs: &Observation| obs.code.clone(),
        |offer: &Offer| hotel_code(&offer.name),
        &SequenceRatio,
        options.threshold,
    );

    // Classification excludes today's log entries, so a rerun on the same
    // day still judges against genuine history.
    let entries = log.read_all();
    let mut summary = RunSummary {
        observed: observations.len(),
        ..RunSummary::default()
    };
    let mut items = Vec::with_capacity(pairings.len());
    let mut snapshot_entries: BTreeMap<String, SnapshotEntry> = BTreeMap::new();

    for pairing in &pairings {
        let obs = pairing.primary;
        let floor = price_floor(&entries, &obs.code, Some(options.today));
        let verdict = classify(obs.price, floor);

        match verdict {
            Verdict::New => summary.new += 1,
            Verdict::RecordLow { .. } => summary.record_lows += 1,
            Verdict::Rise { .. } => summary.rises += 1,
            Verdict::Unchanged { .. } => summary.unchanged += 1,
        }

        snapshot_entries.insert(
            obs.code.clone(),
            SnapshotEntry::from_observation(
                obs,
                floor.as_ref(),
                options.default_credit,
                options.today,
            ),
        );

        let promo = pairing.secondary.and_then(|offer| offer.promo.clone());
        if promo.is_some() {
            summary.promos_matched += 1;
        }

        items.push(ClassifiedListing {
            observation: obs,
            verdict,
            promo,
        });
    }

    // Log first: it is the source of truth the snapshot derives from.
    if let Err(e) = log.append(&observations, options.today) {
        error!(error = %e, "failed to append price log, continuing with in-memory data");
    }
    if let Err(e) = snapshot.save(&snapshot_entries) {
        error!(error = %e, "failed to save snapshot, continuing");
    }

    let payload = assemble(&items, &options.title, options.default_credit, options.now);
    for chunk in split_for_delivery(&payload, options.chunk_size) {
        if deliver_chunk(messenger, &chunk).await {
            summary.chunks_delivered += 1;
        } else {
            summary.chunks_failed += 1;
        }
    }

    info!(
        record_lows = summary.record_lows,
        new = summary.new,
        rises = summary.rises,
        unchanged = summary.unchanged,
        promos = summary.promos_matched,
        chunks = summary.chunks_delivered,
        failed_chunks = summary.chunks_failed,
        "run complete"
    );

    RunOutcome::Completed(summary)
}

/// Validate listings into observations, deduplicating by hotel code
///
/// First occurrence wins, matching the log's own dedupe rule, so a hotel
/// returned by two city searches keeps its first listing.
fn to_observations(listings: Vec<Listing>) -> Vec<Observation> {
    let mut seen = HashSet::new();
    let mut observations = Vec::with_capacity(listings.len());

    for listing in listings {
        let code = hotel_code(&listing.name);
        if code.is_empty() {
            debug!(name = %listing.name, "skipping listing with no usable name");
            continue;
        }
        if !seen.insert(code.clone()) {
            debug!(code = %code, "skipping duplicate listing");
            continue;
        }
        observations.push(Observation {
            code,
            name: listing.name,
            price: listing.price,
            earliest: listing.earliest,
            credit: listing.credit,
            url: listing.url,
        });
    }

    observations
}

/// Deliver one chunk, or print it when running without a messenger
async fn deliver_chunk<M: Messenger>(messenger: Option<&M>, text: &str) -> bool {
    match messenger {
        Some(messenger) => match messenger.deliver(text).await {
            Ok(()) => true,
            Err(e) => {
                error!(messenger = messenger.name(), error = %e, "delivery failed");
                false
            }
        },
        None => {
            println!("{text}");
            true
        }
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;
