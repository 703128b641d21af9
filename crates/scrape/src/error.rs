//! Error types for listing sources

use thiserror::Error;

/// Errors that can occur while fetching from a listing source
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to initialize the source (e.g., HTTP client creation failed)
    #[error("failed to initialize source: {0}")]
    Init(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The source answered but no usable rows came back
    #[error("{source_name} returned no listings")]
    Empty { source_name: &'static str },

    /// All retry attempts exhausted
    #[error("{source_name} failed after {attempts} attempts: {last_error}")]
    Exhausted {
        source_name: &'static str,
        attempts: u32,
        last_error: String,
    },
}

impl SourceError {
    pub fn empty(source_name: &'static str) -> Self {
        Self::Empty { source_name }
    }

    /// Whether another attempt could plausibly succeed
    ///
    /// Empty results count as retryable: the sites intermittently serve
    /// partial pages, and a re-fetch often comes back populated.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status()
                        .is_some_and(|s| s.is_server_error() || s.as_u16() == 429)
            }
            Self::Empty { .. } => true,
            Self::Init(_) | Self::Exhausted { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_retryable() {
        assert!(SourceError::empty("maxfhr").is_retryable());
    }

    #[test]
    fn test_init_is_not_retryable() {
        assert!(!SourceError::Init("bad client".into()).is_retryable());
    }

    #[test]
    fn test_exhausted_is_not_retryable() {
        let err = SourceError::Exhausted {
            source_name: "maxfhr",
            attempts: 4,
            last_error: "maxfhr returned no listings".into(),
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_exhausted_display_names_the_source() {
        let err = SourceError::Exhausted {
            source_name: "amex",
            attempts: 4,
            last_error: "HTTP request failed".into(),
        };
        let text = err.to_string();
        assert!(text.contains("amex"));
        assert!(text.contains("4 attempts"));
    }
}
