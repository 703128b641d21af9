//! Report configuration

use serde::Deserialize;

/// Report assembly configuration
///
/// # Example
///
/// ```toml
/// [report]
/// title = "Korea FHR Hotel Prices"
/// chunk_size = 4000
/// default_credit = 100
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Header title of every report
    /// Default: Korea FHR Hotel Prices
    pub title: String,

    /// Maximum characters per delivered message chunk
    /// Default: 4000 (Telegram-safe)
    pub chunk_size: usize,

    /// Credit in dollars assumed when a listing reports none
    /// Default: 100
    pub default_credit: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Korea FHR Hotel Prices".to_string(),
            chunk_size: 4000,
            default_credit: 100,
        }
    }
}
