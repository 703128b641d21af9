//! Delivery error types

use thiserror::Error;

/// Errors raised while delivering a message.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// No bot token in config or environment
    #[error("telegram bot token is not configured")]
    MissingToken,

    /// No destination chat id configured
    #[error("no telegram chat id is configured")]
    MissingChatId,

    /// HTTP client construction failed
    #[error("failed to initialize messenger: {0}")]
    Init(String),

    /// Transport-level failure (connect, timeout, TLS)
    #[error("telegram request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Telegram rejected the message
    #[error("telegram rejected message (HTTP {status}): {description}")]
    Api { status: u16, description: String },
}
