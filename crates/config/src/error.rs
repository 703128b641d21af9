//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// What went wrong loading or validating the configuration
///
/// Validation variants name their `[section]` so the message points at the
/// exact TOML table to fix.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The file is not valid TOML (or has a wrongly-typed field)
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A required field is absent or empty
    #[error("[{section}] is missing required field '{field}'")]
    MissingField {
        section: &'static str,
        field: &'static str,
    },

    /// A field is present but its value cannot be used
    #[error("[{section}] has invalid {field}: {message}")]
    InvalidValue {
        section: &'static str,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    pub fn missing_field(section: &'static str, field: &'static str) -> Self {
        Self::MissingField { section, field }
    }

    pub fn invalid_value(
        section: &'static str,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            section,
            field,
            message: message.into(),
        }
    }
}
