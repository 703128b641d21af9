//! Amex FHR offer source
//!
//! Queries the destination property listing and walks each card's text
//! lines for the hotel name and any promotional offer. Cards mix brand
//! headers, location rows, and marketing copy in with the name, so the
//! walk filters those out instead of trusting a fixed layout.

use serde::Deserialize;

use crate::error::SourceError;
use crate::listing::Offer;
use crate::resilience::{RetryPolicy, fetch_with_retry};
use crate::source::{OfferSource, USER_AGENT};

/// All-caps brand and program headers that precede hotel names in cards
const BRAND_HEADERS: [&str; 12] = [
    "FINE HOTELS",
    "THE HOTEL COLLECTION",
    "ANDAZ",
    "CONRAD HOTELS & RESORTS",
    "FAIRMONT",
    "FOUR SEASONS HOTELS AND RESORTS",
    "GRAND HYATT",
    "PARK HYATT",
    "LOTTE HOTELS & RESORTS",
    "LUXURY COLLECTION",
    "IHG",
    "MARRIOTT",
];

/// Phrases that open a promotional offer line
const OFFER_LEADS: [&str; 4] = [
    "Complimentary third night",
    "Complimentary fourth night",
    "% off",
    "Special Offer",
];

/// Longest line still considered a hotel name; longer lines are marketing copy
const MAX_NAME_LEN: usize = 50;

/// Amex source configuration
#[derive(Debug, Clone)]
pub struct AmexConfig {
    /// Site base URL
    pub base_url: String,
    /// Destination used for the property listing query
    pub destination: String,
    /// Retry policy for the listing fetch
    pub policy: RetryPolicy,
}

impl Default for AmexConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.americanexpress.com".to_string(),
            destination: "South Korea".to_string(),
            policy: RetryPolicy::default(),
        }
    }
}

/// Amex property listing source
pub struct Amex {
    config: AmexConfig,
    client: reqwest::Client,
}

impl Amex {
    /// Create the source with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails
    pub fn new(config: AmexConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.policy.timeout())
            .build()
            .map_err(|e| SourceError::Init(format!("amex HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Fetch and parse the destination's property cards (single attempt)
    async fn fetch_properties(&self) -> Result<Vec<Offer>, SourceError> {
        let url = format!("{}/api/travel/properties", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("destination", self.config.destination.as_str())])
            .send()
            .await?
            .error_for_status()?;
        let page: PropertiesResponse = response.json().await?;

        let offers: Vec<Offer> = page
            .properties
            .iter()
            .filter_map(|property| parse_card(&property.text))
            .collect();

        if offers.is_empty() {
            return Err(SourceError::empty("amex"));
        }
        Ok(offers)
    }
}

impl OfferSource for Amex {
    fn name(&self) -> &'static str {
        "amex"
    }

    async fn fetch(&self) -> Result<Vec<Offer>, SourceError> {
        fetch_with_retry(&self.config.policy, "amex", || self.fetch_properties()).await
    }
}

/// Parse one property card's text into an offer
///
/// The name is the first line that is not a brand header, a location row,
/// or marketing copy. The promo is the first line carrying a known offer
/// lead, joined with the booking-window line directly after it when one is
/// present. Cards with no usable name line are dropped.
pub(crate) fn parse_card(text: &str) -> Option<Offer> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let name = lines.iter().copied().find(|line| {
        if is_brand_header(line) {
            return false;
        }
        if line.contains("South Korea") || *line == "Korea" {
            return false;
        }
        if line.chars().count() > MAX_NAME_LEN {
            return false;
        }
        !line.starts_with("Book") && !line.starts_with("Complimentary")
    })?;

    let mut promo_parts: Vec<&str> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if OFFER_LEADS.iter().any(|lead| line.contains(lead)) {
            promo_parts.push(line);
            if let Some(next) = lines.get(i + 1)
                && (next.contains("Book by") || next.contains("for travel"))
            {
                promo_parts.push(next);
            }
            break;
        }
    }

    Some(Offer {
        name: name.to_string(),
        promo: (!promo_parts.is_empty()).then(|| promo_parts.join(" ")),
    })
}

/// Whether a line is an all-caps brand or program header
fn is_brand_header(line: &str) -> bool {
    let has_letters = line.chars().any(|c| c.is_alphabetic());
    let all_upper = !line.chars().any(|c| c.is_lowercase());
    has_letters && all_upper && BRAND_HEADERS.iter().any(|header| line.contains(header))
}

// --- API Response Types ---

/// Property listing response
#[derive(Debug, Deserialize)]
pub(crate) struct PropertiesResponse {
    #[serde(default)]
    pub(crate) properties: Vec<PropertyCard>,
}

/// One rendered property card
#[derive(Debug, Deserialize)]
pub(crate) struct PropertyCard {
    /// Card text as rendered, one field per line
    #[serde(default)]
    pub(crate) text: String,
}
