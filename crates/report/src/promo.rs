//! Promotional text normalization
//!
//! Offer text arrives with footnote markers (".1", ".2") and a verbose
//! booking-window sentence. Rendering strips the markers and rewrites the
//! window with ISO dates so report lines stay compact.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Footnote markers appended to offer sentences
static FOOTNOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\d+").unwrap());

/// Booking window with M/D/YYYY dates
static BOOKING_WINDOW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Book by (\d{2}/\d{2}/\d{4}) for travel by (\d{2}/\d{2}/\d{4})").unwrap()
});

/// The booking-window tail, replaced wholesale once the dates are out
static BOOKING_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*Book by.*").unwrap());

/// Normalize raw offer text for a report line
///
/// Strips footnote markers, rewrites "Book by MM/DD/YYYY for travel by
/// MM/DD/YYYY" as a parenthetical with ISO dates, and collapses the text
/// onto one line. Text with no recognized window passes through otherwise
/// unchanged.
pub fn normalize_promo(text: &str) -> String {
    let stripped = FOOTNOTE.replace_all(text, "");

    let rendered = match BOOKING_WINDOW.captures(&stripped) {
        Some(caps) => match (parse_mdy(&caps[1]), parse_mdy(&caps[2])) {
            (Some(book), Some(travel)) => {
                let window = format!(" (book by {book}, travel by {travel})");
                BOOKING_TAIL.replace(&stripped, window.as_str()).into_owned()
            }
            _ => stripped.into_owned(),
        },
        None => stripped.into_owned(),
    };

    rendered.replace('\n', " ").trim().to_string()
}

fn parse_mdy(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%m/%d/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footnote_markers_are_stripped() {
        assert_eq!(
            normalize_promo("Complimentary third night.1"),
            "Complimentary third night"
        );
    }

    #[test]
    fn test_booking_window_is_rewritten_with_iso_dates() {
        let raw = "Complimentary third night.1 Book by 12/31/2025 for travel by 03/31/2026";
        assert_eq!(
            normalize_promo(raw),
            "Complimentary third night (book by 2025-12-31, travel by 2026-03-31)"
        );
    }

    #[test]
    fn test_text_without_window_passes_through() {
        assert_eq!(normalize_promo("15% off"), "15% off");
    }

    #[test]
    fn test_invalid_window_dates_keep_the_text() {
        let raw = "25% off Book by 13/45/2025 for travel by 03/31/2026";
        assert_eq!(normalize_promo(raw), raw);
    }

    #[test]
    fn test_newlines_collapse_to_spaces() {
        assert_eq!(
            normalize_promo("Special Offer\nEnds soon"),
            "Special Offer Ends soon"
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(normalize_promo("  25% off  "), "25% off");
    }
}
