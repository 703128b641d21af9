//! Tests for the update pipeline
//!
//! Sources and delivery are stubbed; storage runs against a temp dir so
//! every persistence claim is checked on real files.

use std::sync::Mutex;

use tempfile::TempDir;

use staylow_notify::NotifyError;
use staylow_scrape::SourceError;

use super::*;

// =============================================================================
// Stubs
// =============================================================================

struct StubListings {
    listings: Vec<Listing>,
    fail: bool,
}

impl StubListings {
    fn returning(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            listings: Vec::new(),
            fail: true,
        }
    }
}

impl ListingSource for StubListings {
    fn name(&self) -> &'static str {
        "stub-listings"
    }

    async fn fetch(&self) -> Result<Vec<Listing>, SourceError> {
        if self.fail {
            return Err(SourceError::empty("stub-listings"));
        }
        Ok(self.listings.clone())
    }
}

struct StubOffers {
    offers: Vec<Offer>,
    fail: bool,
}

impl StubOffers {
    fn returning(offers: Vec<Offer>) -> Self {
        Self {
            offers,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            offers: Vec::new(),
            fail: true,
        }
    }
}

impl OfferSource for StubOffers {
    fn name(&self) -> &'static str {
        "stub-offers"
    }

    async fn fetch(&self) -> Result<Vec<Offer>, SourceError> {
        if self.fail {
            return Err(SourceError::empty("stub-offers"));
        }
        Ok(self.offers.clone())
    }
}

#[derive(Default)]
struct RecordingMessenger {
    sent: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingMessenger {
    fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl Messenger for RecordingMessenger {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn deliver(&self, text: &str) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Api {
                status: 400,
                description: "Bad Request: chat not found".to_string(),
            });
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn listing(name: &str, price: u32) -> Listing {
    Listing {
        name: name.to_string(),
        price,
        earliest: None,
        credit: None,
        url: None,
    }
}

fn offer(name: &str, promo: &str) -> Offer {
    Offer {
        name: name.to_string(),
        promo: Some(promo.to_string()),
    }
}

fn observation(name: &str, price: u32) -> Observation {
    Observation {
        code: hotel_code(name),
        name: name.to_string(),
        price,
        earliest: None,
        credit: None,
        url: None,
    }
}

fn stores(dir: &TempDir) -> (PriceLog, SnapshotStore) {
    (
        PriceLog::new(dir.path().join("price_log.jsonl")),
        SnapshotStore::new(dir.path().join("price_history.json")),
    )
}

fn options() -> RunOptions {
    RunOptions {
        title: "Korea FHR Hotel Prices".to_string(),
        chunk_size: 4000,
        default_credit: 100,
        threshold: 0.6,
        today: "2024-02-01".parse().unwrap(),
        now: "2024-02-01T09:30:00".parse().unwrap(),
    }
}

fn completed(outcome: RunOutcome) -> RunSummary {
    match outcome {
        RunOutcome::Completed(summary) => summary,
        RunOutcome::Aborted => panic!("expected a completed run"),
    }
}

// =============================================================================
// Classification and persistence
// =============================================================================

#[tokio::test]
async fn test_first_run_marks_every_hotel_new() {
    let dir = TempDir::new().unwrap();
    let (log, snapshot) = stores(&dir);
    let primary =
        StubListings::returning(vec![listing("Grand Hyatt Seoul", 320), listing("Conrad Seoul", 300)]);
    let messenger = RecordingMessenger::default();

    let outcome = run_once(
        &primary,
        None::<&StubOffers>,
        Some(&messenger),
        &log,
        &snapshot,
        &options(),
    )
    .await;

    let summary = completed(outcome);
    assert_eq!(summary.observed, 2);
    assert_eq!(summary.new, 2);
    assert_eq!(summary.record_lows, 0);
    assert_eq!(summary.chunks_delivered, 1);

    let entries = log.read_all();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].hotels.len(), 2);

    let saved = snapshot.load();
    assert_eq!(saved.len(), 2);
    let hyatt = &saved["grand hyatt seoul"];
    assert_eq!(hyatt.price, 320);
    assert_eq!(hyatt.all_time_low, 320);

    let sent = messenger.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("🆕 New listings (2)"));
}

#[tokio::test]
async fn test_record_low_against_prior_history() {
    let dir = TempDir::new().unwrap();
    let (log, snapshot) = stores(&dir);
    log.append(
        &[observation("Grand Hyatt Seoul", 320)],
        "2024-01-10".parse().unwrap(),
    )
    .unwrap();

    let primary = StubListings::returning(vec![listing("Grand Hyatt Seoul", 275)]);
    let messenger = RecordingMessenger::default();

    let outcome = run_once(
        &primary,
        None::<&StubOffers>,
        Some(&messenger),
        &log,
        &snapshot,
        &options(),
    )
    .await;

    let summary = completed(outcome);
    assert_eq!(summary.record_lows, 1);
    assert_eq!(summary.new, 0);

    let message = messenger.sent().remove(0);
    assert!(message.contains("🔥 Record low! Grand Hyatt Seoul"));
    assert!(message.contains("Previous low: $320"));

    // New record becomes the stored all-time low
    assert_eq!(snapshot.load()["grand hyatt seoul"].all_time_low, 275);
}

#[tokio::test]
async fn test_rise_and_unchanged_classification() {
    let dir = TempDir::new().unwrap();
    let (log, snapshot) = stores(&dir);
    log.append(
        &[
            observation("Grand Hyatt Seoul", 300),
            observation("Signiel Seoul", 450),
        ],
        "2024-01-10".parse().unwrap(),
    )
    .unwrap();

    let primary = StubListings::returning(vec![
        listing("Grand Hyatt Seoul", 320),
        listing("Signiel Seoul", 450),
    ]);
    let messenger = RecordingMessenger::default();

    let outcome = run_once(
        &primary,
        None::<&StubOffers>,
        Some(&messenger),
        &log,
        &snapshot,
        &options(),
    )
    .await;

    let summary = completed(outcome);
    assert_eq!(summary.rises, 1);
    assert_eq!(summary.unchanged, 1);

    let message = messenger.sent().remove(0);
    assert!(message.contains("🔺 Price rises (1)"));
    assert!(message.contains("📌 Unchanged (1)"));

    // A rise never lowers the recorded floor
    assert_eq!(snapshot.load()["grand hyatt seoul"].all_time_low, 300);
}

#[tokio::test]
async fn test_same_day_rerun_judges_against_prior_days() {
    let dir = TempDir::new().unwrap();
    let (log, snapshot) = stores(&dir);
    log.append(
        &[observation("Grand Hyatt Seoul", 320)],
        "2024-01-10".parse().unwrap(),
    )
    .unwrap();
    // An earlier run today already logged the lower price; it must not
    // count as history for the rerun.
    log.append(
        &[observation("Grand Hyatt Seoul", 275)],
        "2024-02-01".parse().unwrap(),
    )
    .unwrap();

    let primary = StubListings::returning(vec![listing("Grand Hyatt Seoul", 275)]);
    let messenger = RecordingMessenger::default();

    let outcome = run_once(
        &primary,
        None::<&StubOffers>,
        Some(&messenger),
        &log,
        &snapshot,
        &options(),
    )
    .await;

    let summary = completed(outcome);
    assert_eq!(summary.record_lows, 1);
    assert_eq!(summary.unchanged, 0);
    assert!(messenger.sent()[0].contains("Previous low: $320"));

    assert_eq!(log.read_all().len(), 3);
}

#[tokio::test]
async fn test_duplicate_listings_keep_first() {
    let dir = TempDir::new().unwrap();
    let (log, snapshot) = stores(&dir);
    let primary = StubListings::returning(vec![
        listing("Grand Hyatt Seoul", 320),
        listing("Grand Hyatt Seoul", 280),
    ]);
    let messenger = RecordingMessenger::default();

    let outcome = run_once(
        &primary,
        None::<&StubOffers>,
        Some(&messenger),
        &log,
        &snapshot,
        &options(),
    )
    .await;

    assert_eq!(completed(outcome).observed, 1);
    assert_eq!(snapshot.load()["grand hyatt seoul"].price, 320);
}

#[tokio::test]
async fn test_unusable_names_are_skipped() {
    let dir = TempDir::new().unwrap();
    let (log, snapshot) = stores(&dir);
    let primary = StubListings::returning(vec![listing("###", 320)]);
    let messenger = RecordingMessenger::default();

    let outcome = run_once(
        &primary,
        None::<&StubOffers>,
        Some(&messenger),
        &log,
        &snapshot,
        &options(),
    )
    .await;

    assert_eq!(completed(outcome).observed, 0);
    assert!(snapshot.load().is_empty());
    // Header-only report still goes out
    assert!(messenger.sent()[0].starts_with("📅"));
}

// =============================================================================
// Failure handling
// =============================================================================

#[tokio::test]
async fn test_primary_failure_aborts_and_leaves_stores_untouched() {
    let dir = TempDir::new().unwrap();
    let (log, snapshot) = stores(&dir);
    let primary = StubListings::failing();
    let messenger = RecordingMessenger::default();

    let outcome = run_once(
        &primary,
        None::<&StubOffers>,
        Some(&messenger),
        &log,
        &snapshot,
        &options(),
    )
    .await;

    assert_eq!(outcome, RunOutcome::Aborted);
    assert!(log.read_all().is_empty());
    assert!(snapshot.load().is_empty());

    let sent = messenger.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("no update this run"));
}

#[tokio::test]
async fn test_secondary_failure_continues_without_promos() {
    let dir = TempDir::new().unwrap();
    let (log, snapshot) = stores(&dir);
    let primary = StubListings::returning(vec![listing("Conrad Seoul", 300)]);
    let secondary = StubOffers::failing();
    let messenger = RecordingMessenger::default();

    let outcome = run_once(
        &primary,
        Some(&secondary),
        Some(&messenger),
        &log,
        &snapshot,
        &options(),
    )
    .await;

    let summary = completed(outcome);
    assert_eq!(summary.observed, 1);
    assert_eq!(summary.promos_matched, 0);
    assert!(!messenger.sent()[0].contains("🎁"));
    assert_eq!(log.read_all().len(), 1);
}

#[tokio::test]
async fn test_delivery_failure_preserves_history() {
    let dir = TempDir::new().unwrap();
    let (log, snapshot) = stores(&dir);
    let primary = StubListings::returning(vec![listing("Conrad Seoul", 300)]);
    let messenger = RecordingMessenger::failing();

    let outcome = run_once(
        &primary,
        None::<&StubOffers>,
        Some(&messenger),
        &log,
        &snapshot,
        &options(),
    )
    .await;

    let summary = completed(outcome);
    assert_eq!(summary.chunks_delivered, 0);
    assert_eq!(summary.chunks_failed, 1);

    // History was written before delivery was attempted
    assert_eq!(log.read_all().len(), 1);
    assert_eq!(snapshot.load().len(), 1);
}

// =============================================================================
// Promo matching and chunking
// =============================================================================

#[tokio::test]
async fn test_promos_attach_only_to_matching_hotels() {
    let dir = TempDir::new().unwrap();
    let (log, snapshot) = stores(&dir);
    let primary = StubListings::returning(vec![
        listing("Conrad Seoul", 300),
        listing("Signiel Seoul", 450),
    ]);
    let secondary = StubOffers::returning(vec![offer(
        "Conrad Seoul Hotel",
        "Complimentary third night",
    )]);
    let messenger = RecordingMessenger::default();

    let outcome = run_once(
        &primary,
        Some(&secondary),
        Some(&messenger),
        &log,
        &snapshot,
        &options(),
    )
    .await;

    assert_eq!(completed(outcome).promos_matched, 1);

    let message = messenger.sent().remove(0);
    assert_eq!(message.matches("🎁").count(), 1);
    assert!(message.contains("🎁 Complimentary third night"));
}

#[tokio::test]
async fn test_report_splits_into_bounded_chunks() {
    let dir = TempDir::new().unwrap();
    let (log, snapshot) = stores(&dir);
    let primary = StubListings::returning(vec![
        listing("Grand Hyatt Seoul", 320),
        listing("Conrad Seoul", 300),
    ]);
    let messenger = RecordingMessenger::default();

    let mut opts = options();
    opts.chunk_size = 80;

    let outcome = run_once(
        &primary,
        None::<&StubOffers>,
        Some(&messenger),
        &log,
        &snapshot,
        &opts,
    )
    .await;

    let summary = completed(outcome);
    let sent = messenger.sent();
    assert!(sent.len() > 1);
    assert_eq!(summary.chunks_delivered, sent.len());
    assert!(sent.iter().all(|chunk| chunk.chars().count() <= 80));

    let whole = sent.concat();
    assert!(whole.contains("Grand Hyatt Seoul"));
    assert!(whole.contains("Conrad Seoul"));
}

#[tokio::test]
async fn test_dry_run_still_persists_history() {
    let dir = TempDir::new().unwrap();
    let (log, snapshot) = stores(&dir);
    let primary = StubListings::returning(vec![listing("Conrad Seoul", 300)]);

    let outcome = run_once(
        &primary,
        None::<&StubOffers>,
        None::<&RecordingMessenger>,
        &log,
        &snapshot,
        &options(),
    )
    .await;

    let summary = completed(outcome);
    assert_eq!(summary.chunks_delivered, 1);
    assert_eq!(log.read_all().len(), 1);
    assert_eq!(snapshot.load().len(), 1);
}
