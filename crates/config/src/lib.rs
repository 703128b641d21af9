//! staylow configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! An empty config is fully usable - only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use staylow_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[sources.maxfhr]\ncities = [\"Seoul\"]").unwrap();
//! assert_eq!(config.sources.maxfhr.cities, vec!["Seoul"]);
//! ```
//!
//! # Example Minimal Config
//!
//! ```toml
//! [storage]
//! dir = "data"
//!
//! [telegram]
//! channel_chat_id = "-1001234567890"
//! ```
//!
//! # Example Full Config
//!
//! See `configs/example.toml` for all available options.

mod error;
mod logging;
mod matching;
mod report;
mod sources;
mod storage;
mod telegram;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogLevel};
pub use matching::MatchingConfig;
pub use report::ReportConfig;
pub use sources::{AmexSourceConfig, MaxFhrSourceConfig, SourcesConfig};
pub use storage::{LOG_FILE, SNAPSHOT_FILE, StorageConfig};
pub use telegram::{DeliveryTarget, TOKEN_ENV, TelegramConfig};

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the price log and snapshot live
    pub storage: StorageConfig,

    /// Logging configuration
    pub log: LogConfig,

    /// Scraping sources (MaxFHR primary, Amex secondary)
    pub sources: SourcesConfig,

    /// Cross-source fuzzy matching
    pub matching: MatchingConfig,

    /// Report assembly
    pub report: ReportConfig,

    /// Telegram delivery
    pub telegram: TelegramConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, contains invalid TOML, or
    /// fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
