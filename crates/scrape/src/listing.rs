//! Listing shapes produced by the sources

use chrono::NaiveDate;

/// One priced hotel row from the primary source
///
/// Rows that fail validation at the parse boundary (no name, no parseable
/// positive price) are dropped there, so a `Listing` always carries both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Display name as scraped
    pub name: String,

    /// Nightly price in whole dollars
    pub price: u32,

    /// Earliest available date, when the card shows one
    pub earliest: Option<NaiveDate>,

    /// On-site credit in dollars, when the card shows one
    pub credit: Option<u32>,

    /// Deep link to the listing
    pub url: Option<String>,
}

/// One hotel row from the offer source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    /// Display name as scraped
    pub name: String,

    /// Raw promotional text; rendering normalizes it later
    pub promo: Option<String>,
}
