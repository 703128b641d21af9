//! Tests for report assembly

use chrono::{NaiveDate, NaiveDateTime};
use staylow_store::{Observation, PriceFloor, Verdict, hotel_code};

use super::*;

const TITLE: &str = "Korea FHR Hotel Prices";
const DEFAULT_CREDIT: u32 = 100;

fn date(s: &str) -> NaiveDate {
    s.parse().expect("test date should parse")
}

fn now() -> NaiveDateTime {
    "2024-02-01T09:30:00".parse().expect("test time should parse")
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

fn floor(price: u32, on: &str) -> PriceFloor {
    PriceFloor {
        price,
        date: date(on),
        earliest: None,
    }
}

// =============================================================================
// Header and sections
// =============================================================================

#[test]
fn test_header_only_when_no_items() {
    let payload = assemble(&[], TITLE, DEFAULT_CREDIT, now());
    assert_eq!(
        payload,
        "📅 <b>Korea FHR Hotel Prices</b>\nUpdated: 2024-02-01 09:30\n"
    );
}

#[test]
fn test_empty_categories_are_omitted() {
    let obs = observation("Grand Hyatt Seoul", 330);
    let items = [ClassifiedListing {
        observation: &obs,
        verdict: Verdict::Rise {
            floor: floor(290, "2024-01-10"),
            delta: 40,
        },
        promo: None,
    }];

    let payload = assemble(&items, TITLE, DEFAULT_CREDIT, now());

    assert!(payload.contains("🔺 Price rises (1)"));
    assert!(!payload.contains("Record lows"));
    assert!(!payload.contains("New listings"));
    assert!(!payload.contains("Unchanged"));
}

#[test]
fn test_sections_render_in_fixed_order() {
    let rise = observation("Conrad Seoul", 330);
    let unchanged = observation("Signiel Seoul", 450);
    let record = observation("Grand Hyatt Seoul", 275);
    let fresh = observation("Park Hyatt Busan", 260);

    // Input deliberately scrambled
    let items = [
        ClassifiedListing {
            observation: &unchanged,
            verdict: Verdict::Unchanged {
                floor: floor(450, "2024-01-10"),
            },
            promo: None,
        },
        ClassifiedListing {
            observation: &rise,
            verdict: Verdict::Rise {
                floor: floor(290, "2024-01-10"),
                delta: 40,
            },
            promo: None,
        },
        ClassifiedListing {
            observation: &fresh,
            verdict: Verdict::New,
            promo: None,
        },
        ClassifiedListing {
            observation: &record,
            verdict: Verdict::RecordLow {
                floor: floor(290, "2024-01-10"),
                delta: 15,
            },
            promo: None,
        },
    ];

    let payload = assemble(&items, TITLE, DEFAULT_CREDIT, now());

    let record_at = payload.find("Record lows").expect("record section");
    let new_at = payload.find("New listings").expect("new section");
    let rise_at = payload.find("Price rises").expect("rise section");
    let unchanged_at = payload.find("Unchanged").expect("unchanged section");

    assert!(record_at < new_at);
    assert!(new_at < rise_at);
    assert!(rise_at < unchanged_at);
}

#[test]
fn test_section_count_matches_items() {
    let a = observation("Conrad Seoul", 300);
    let b = observation("Signiel Seoul", 450);
    let c = observation("Park Hyatt Busan", 260);
    let items = [
        ClassifiedListing {
            observation: &a,
            verdict: Verdict::New,
            promo: None,
        },
        ClassifiedListing {
            observation: &b,
            verdict: Verdict::New,
            promo: None,
        },
        ClassifiedListing {
            observation: &c,
            verdict: Verdict::New,
            promo: None,
        },
    ];

    let payload = assemble(&items, TITLE, DEFAULT_CREDIT, now());
    assert!(payload.contains("<b>🆕 New listings (3)</b>"));
}

#[test]
fn test_items_are_separated_by_a_blank_line() {
    let a = observation("Conrad Seoul", 300);
    let b = observation("Signiel Seoul", 450);
    let items = [
        ClassifiedListing {
            observation: &a,
            verdict: Verdict::New,
            promo: None,
        },
        ClassifiedListing {
            observation: &b,
            verdict: Verdict::New,
            promo: None,
        },
    ];

    let payload = assemble(&items, TITLE, DEFAULT_CREDIT, now());
    assert!(payload.contains("💳 Credit: $100\n\n🆕 Signiel Seoul"));
}

// =============================================================================
// Item rendering
// =============================================================================

#[test]
fn test_new_listing_renders_every_field() {
    let mut obs = observation("Grand Hyatt Seoul", 320);
    obs.earliest = Some(date("2025-01-05"));
    obs.credit = Some(120);
    obs.url = Some("https://maxfhr.com/hotels/grand-hyatt-seoul".to_string());

    let items = [ClassifiedListing {
        observation: &obs,
        verdict: Verdict::New,
        promo: Some("15% off".to_string()),
    }];

    let payload = assemble(&items, TITLE, DEFAULT_CREDIT, now());

    assert_eq!(
        payload,
        "📅 <b>Korea FHR Hotel Prices</b>\nUpdated: 2024-02-01 09:30\n\
         \n<b>🆕 New listings (1)</b>\n\n\
         🆕 <a href='https://maxfhr.com/hotels/grand-hyatt-seoul'>Grand Hyatt Seoul</a>\n\
         💰 Price: <b>$320</b> (2025-01-05)\n\
         💳 Credit: $120\n\
         🎁 15% off"
    );
}

#[test]
fn test_record_low_shows_floor_and_banner() {
    let obs = observation("Grand Hyatt Seoul", 275);
    let mut low = floor(290, "2024-01-10");
    low.earliest = Some(date("2025-01-03"));

    let items = [ClassifiedListing {
        observation: &obs,
        verdict: Verdict::RecordLow {
            floor: low,
            delta: 15,
        },
        promo: None,
    }];

    let payload = assemble(&items, TITLE, DEFAULT_CREDIT, now());

    assert!(payload.contains("🔥 Record low! Grand Hyatt Seoul"));
    assert!(payload.contains("🔻 Previous low: $290 (2025-01-03)"));
    assert!(payload.contains("✨ <b>All-time low</b>"));
}

#[test]
fn test_rise_never_carries_a_promo() {
    let obs = observation("Conrad Seoul", 330);
    let items = [ClassifiedListing {
        observation: &obs,
        verdict: Verdict::Rise {
            floor: floor(290, "2024-01-10"),
            delta: 40,
        },
        promo: Some("Complimentary third night".to_string()),
    }];

    let payload = assemble(&items, TITLE, DEFAULT_CREDIT, now());

    assert!(payload.contains("🔺 Previous low: $290"));
    assert!(!payload.contains("🎁"));
}

#[test]
fn test_unchanged_keeps_floor_and_promo() {
    let obs = observation("Signiel Seoul", 450);
    let items = [ClassifiedListing {
        observation: &obs,
        verdict: Verdict::Unchanged {
            floor: floor(450, "2024-01-10"),
        },
        promo: Some("Special Offer.2".to_string()),
    }];

    let payload = assemble(&items, TITLE, DEFAULT_CREDIT, now());

    assert!(payload.contains("🏨 Signiel Seoul"));
    assert!(payload.contains("🔻 Previous low: $450"));
    assert!(payload.contains("🎁 Special Offer"));
}

#[test]
fn test_missing_credit_falls_back_to_default() {
    let obs = observation("Conrad Seoul", 300);
    let items = [ClassifiedListing {
        observation: &obs,
        verdict: Verdict::New,
        promo: None,
    }];

    let payload = assemble(&items, TITLE, DEFAULT_CREDIT, now());
    assert!(payload.contains("💳 Credit: $100"));
}

#[test]
fn test_name_without_url_renders_unlinked() {
    let obs = observation("Conrad Seoul", 300);
    let items = [ClassifiedListing {
        observation: &obs,
        verdict: Verdict::New,
        promo: None,
    }];

    let payload = assemble(&items, TITLE, DEFAULT_CREDIT, now());
    assert!(payload.contains("🆕 Conrad Seoul\n"));
    assert!(!payload.contains("<a href"));
}
