//! MaxFHR listing source
//!
//! Queries the MaxFHR search endpoint once per configured city and parses
//! the returned result cards into [`Listing`]s. Cards are semi-structured:
//! the hotel name sits on the first line of the card text, and the price,
//! first-available date, and property credit are picked out of the
//! remaining lines by pattern.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::SourceError;
use crate::listing::Listing;
use crate::resilience::{RetryPolicy, fetch_with_retry};
use crate::source::{ListingSource, USER_AGENT};

/// Price amount, e.g. "From $320 per night"
static PRICE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$(\d+)").unwrap());

/// First-available date in M/D/YYYY form, e.g. "1/5/2025"
static FIRST_AVAILABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").unwrap());

/// Property credit amount, e.g. "USD$100 property credit"
static CREDIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"USD\$(\d+)").unwrap());

/// MaxFHR source configuration
#[derive(Debug, Clone)]
pub struct MaxFhrConfig {
    /// Site base URL
    pub base_url: String,
    /// Cities to search, one request each
    pub cities: Vec<String>,
    /// Retry policy covering the whole sweep
    pub policy: RetryPolicy,
}

impl Default for MaxFhrConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maxfhr.com".to_string(),
            cities: vec![
                "Seoul".to_string(),
                "Busan".to_string(),
                "Jeju".to_string(),
            ],
            policy: RetryPolicy::default(),
        }
    }
}

/// MaxFHR listing source backed by the site's search endpoint
pub struct MaxFhr {
    config: MaxFhrConfig,
    client: reqwest::Client,
}

impl MaxFhr {
    /// Create the source with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails (e.g., TLS or proxy
    /// misconfiguration)
    pub fn new(config: MaxFhrConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.policy.timeout())
            .build()
            .map_err(|e| SourceError::Init(format!("maxfhr HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Fetch and parse one city's search results (single attempt)
    async fn fetch_city(&self, city: &str) -> Result<Vec<Listing>, SourceError> {
        let url = format!("{}/api/search", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("city", city)])
            .send()
            .await?
            .error_for_status()?;
        let page: SearchResponse = response.json().await?;

        Ok(page
            .results
            .iter()
            .filter_map(|card| parse_result(card, &self.config.base_url))
            .collect())
    }

    /// Sweep every configured city (single attempt)
    ///
    /// An empty sweep is an error so the retry loop can have another go;
    /// the site intermittently serves empty result pages.
    async fn fetch_all(&self) -> Result<Vec<Listing>, SourceError> {
        let mut listings = Vec::new();
        for city in &self.config.cities {
            let mut found = self.fetch_city(city).await?;
            debug!(source = "maxfhr", city = %city, count = found.len(), "parsed city results");
            listings.append(&mut found);
        }

        if listings.is_empty() {
            return Err(SourceError::empty("maxfhr"));
        }
        Ok(listings)
    }
}

impl ListingSource for MaxFhr {
    fn name(&self) -> &'static str {
        "maxfhr"
    }

    async fn fetch(&self) -> Result<Vec<Listing>, SourceError> {
        fetch_with_retry(&self.config.policy, "maxfhr", || self.fetch_all()).await
    }
}

/// Parse one result card into a listing
///
/// Returns `None` for cards badged as The Hotel Collection (only FHR rates
/// are tracked) and for cards missing a name or a parseable positive price.
/// A missing deep link falls back to the site base URL so report links
/// always resolve somewhere.
pub(crate) fn parse_result(card: &HotelCard, fallback_url: &str) -> Option<Listing> {
    let name = card
        .text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())?;

    let program = card.program.to_lowercase();
    if program.contains("thc") || program.contains("hotel collection") {
        debug!(source = "maxfhr", name = %name, "skipping non-FHR card");
        return None;
    }

    let price: u32 = PRICE
        .captures(&card.text)
        .and_then(|caps| caps[1].parse().ok())
        .filter(|price| *price > 0)?;

    let earliest = FIRST_AVAILABLE.captures(&card.text).and_then(|caps| {
        let month = caps[1].parse().ok()?;
        let day = caps[2].parse().ok()?;
        let year = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    });

    let credit = CREDIT
        .captures(&card.text)
        .and_then(|caps| caps[1].parse().ok());

    let url = card
        .url
        .as_deref()
        .filter(|url| !url.is_empty())
        .unwrap_or(fallback_url);

    Some(Listing {
        name: name.to_string(),
        price,
        earliest,
        credit,
        url: Some(url.to_string()),
    })
}

// --- API Response Types ---

/// Search endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub(crate) results: Vec<HotelCard>,
}

/// One rendered result card
#[derive(Debug, Deserialize)]
pub(crate) struct HotelCard {
    /// Program badge, "FHR" or "THC"
    #[serde(default)]
    pub(crate) program: String,

    /// Card text as rendered: name on the first line, then rate,
    /// availability, and credit lines
    #[serde(default)]
    pub(crate) text: String,

    /// Deep link, absent on some cards
    pub(crate) url: Option<String>,
}
