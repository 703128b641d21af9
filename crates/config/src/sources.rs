//! Scraping source configuration
//!
//! One section per travel site. MaxFHR is the primary source and supplies
//! prices; Amex supplies promotional annotations and can be disabled
//! without affecting price tracking.
//!
//! # Example
//!
//! ```toml
//! [sources.maxfhr]
//! cities = ["Seoul", "Busan"]
//!
//! [sources.amex]
//! enabled = false
//! ```

use serde::Deserialize;

/// Container for both source configurations
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Primary price source
    pub maxfhr: MaxFhrSourceConfig,

    /// Secondary promo source
    pub amex: AmexSourceConfig,
}

/// MaxFHR configuration (primary source)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MaxFhrSourceConfig {
    /// Base URL of the site
    /// Default: https://maxfhr.com
    pub base_url: String,

    /// Cities to search, one request each
    /// Default: Seoul, Busan, Jeju
    pub cities: Vec<String>,

    /// Per-request timeout in seconds
    /// Default: 30
    pub timeout_secs: u64,

    /// Fetch attempts before giving up
    /// Default: 3
    pub max_retries: u32,

    /// Base delay between retries in milliseconds, doubled per attempt
    /// Default: 1000
    pub retry_base_delay_ms: u64,
}

impl Default for MaxFhrSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maxfhr.com".to_string(),
            cities: vec![
                "Seoul".to_string(),
                "Busan".to_string(),
                "Jeju".to_string(),
            ],
            timeout_secs: 30,
            max_retries: 3,
            retry_base_delay_ms: 1000,
        }
    }
}

/// Amex travel listing configuration (secondary source)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AmexSourceConfig {
    /// Whether to fetch promotional annotations at all
    /// Default: true
    pub enabled: bool,

    /// Base URL of the site
    /// Default: https://www.americanexpress.com
    pub base_url: String,

    /// Destination filter for the property listing
    /// Default: South Korea
    pub destination: String,

    /// Per-request timeout in seconds
    /// Default: 30
    pub timeout_secs: u64,

    /// Fetch attempts before giving up
    /// Default: 3
    pub max_retries: u32,

    /// Base delay between retries in milliseconds, doubled per attempt
    /// Default: 1000
    pub retry_base_delay_ms: u64,
}

impl Default for AmexSourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://www.americanexpress.com".to_string(),
            destination: "South Korea".to_string(),
            timeout_secs: 30,
            max_retries: 3,
            retry_base_delay_ms: 1000,
        }
    }
}
