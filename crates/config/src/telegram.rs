//! Telegram delivery configuration
//!
//! The bot token is usually injected via the environment so it never lands
//! in a checked-in config file; the TOML field exists for local runs.

use serde::Deserialize;

/// Environment variable consulted when `token` is not set in TOML
pub const TOKEN_ENV: &str = "STAYLOW_BOT_TOKEN";

/// Which configured destination receives the report
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryTarget {
    /// Broadcast channel (default)
    #[default]
    Channel,
    /// Direct message
    Personal,
}

/// Telegram configuration
///
/// # Example
///
/// ```toml
/// [telegram]
/// channel_chat_id = "-1001234567890"
/// personal_chat_id = "987654321"
/// target = "channel"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token; when unset, `STAYLOW_BOT_TOKEN` is consulted
    pub token: Option<String>,

    /// Chat id of the broadcast channel
    pub channel_chat_id: Option<String>,

    /// Chat id for direct messages
    pub personal_chat_id: Option<String>,

    /// Destination selection
    /// Default: channel
    pub target: DeliveryTarget,
}

impl TelegramConfig {
    /// Resolve the bot token: explicit config wins, then the environment
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| std::env::var(TOKEN_ENV).ok())
    }

    /// Resolve the destination chat id
    ///
    /// Prefers the configured target and falls back to the other
    /// destination when the preferred one is unset.
    pub fn resolve_chat_id(&self) -> Option<&str> {
        let (preferred, fallback) = match self.target {
            DeliveryTarget::Channel => (&self.channel_chat_id, &self.personal_chat_id),
            DeliveryTarget::Personal => (&self.personal_chat_id, &self.channel_chat_id),
        };
        preferred.as_deref().or(fallback.as_deref())
    }
}
