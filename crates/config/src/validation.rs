//! Configuration validation
//!
//! Validates config consistency before a run starts:
//! - Source URLs are present and look like URLs
//! - The primary source has at least one city to search
//! - Retry counts and timeouts are sane
//! - Matching threshold is a valid similarity score
//! - Report chunk size can hold at least one character

use crate::Config;
use crate::error::{ConfigError, Result};

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_sources(config)?;
    validate_matching(config)?;
    validate_report(config)?;
    Ok(())
}

/// Validate source configurations
fn validate_sources(config: &Config) -> Result<()> {
    let maxfhr = &config.sources.maxfhr;
    validate_base_url("sources.maxfhr", &maxfhr.base_url)?;
    if maxfhr.cities.is_empty() {
        return Err(ConfigError::missing_field("sources.maxfhr", "cities"));
    }
    if maxfhr.cities.iter().any(|city| city.trim().is_empty()) {
        return Err(ConfigError::invalid_value(
            "sources.maxfhr",
            "cities",
            "city names must not be blank",
        ));
    }
    validate_fetch_limits("sources.maxfhr", maxfhr.max_retries, maxfhr.timeout_secs)?;

    // A disabled secondary source skips validation entirely.
    let amex = &config.sources.amex;
    if amex.enabled {
        validate_base_url("sources.amex", &amex.base_url)?;
        if amex.destination.trim().is_empty() {
            return Err(ConfigError::missing_field("sources.amex", "destination"));
        }
        validate_fetch_limits("sources.amex", amex.max_retries, amex.timeout_secs)?;
    }

    Ok(())
}

fn validate_base_url(section: &'static str, url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(ConfigError::missing_field(section, "base_url"));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::invalid_value(
            section,
            "base_url",
            "must start with http:// or https://",
        ));
    }
    Ok(())
}

fn validate_fetch_limits(section: &'static str, max_retries: u32, timeout_secs: u64) -> Result<()> {
    if max_retries == 0 {
        return Err(ConfigError::invalid_value(
            section,
            "max_retries",
            "must be at least 1",
        ));
    }
    if timeout_secs == 0 {
        return Err(ConfigError::invalid_value(
            section,
            "timeout_secs",
            "must be at least 1 second",
        ));
    }
    Ok(())
}

/// Validate matching configuration
fn validate_matching(config: &Config) -> Result<()> {
    if !(0.0..=1.0).contains(&config.matching.threshold) {
        return Err(ConfigError::invalid_value(
            "matching",
            "threshold",
            "must be between 0.0 and 1.0",
        ));
    }
    Ok(())
}

/// Validate report configuration
fn validate_report(config: &Config) -> Result<()> {
    if config.report.chunk_size == 0 {
        return Err(ConfigError::invalid_value(
            "report",
            "chunk_size",
            "must be a positive number of characters",
        ));
    }
    Ok(())
}
