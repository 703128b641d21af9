//! Cross-source matching configuration

use serde::Deserialize;

/// Fuzzy-matching configuration
///
/// # Example
///
/// ```toml
/// [matching]
/// threshold = 0.6
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum similarity score to pair hotels across sources; a candidate
    /// must score strictly above this value
    /// Default: 0.6
    pub threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self { threshold: 0.6 }
    }
}
