//! Telegram Bot API messenger
//!
//! Delivers report chunks via `sendMessage` with HTML parse mode. The bot
//! token is baked into the request URL at construction time and is never
//! logged.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::NotifyError;
use crate::messenger::Messenger;

/// Bot API host
const TELEGRAM_API: &str = "https://api.telegram.org";

/// Per-request timeout
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Messenger backed by the Telegram Bot API
pub struct Telegram {
    endpoint: String,
    chat_id: String,
    client: reqwest::Client,
}

impl Telegram {
    /// Create a messenger for one bot and one destination chat
    ///
    /// Fails fast on a blank token or chat id so a misconfigured run
    /// aborts before any scraping starts.
    pub fn new(token: &str, chat_id: &str) -> Result<Self, NotifyError> {
        if token.trim().is_empty() {
            return Err(NotifyError::MissingToken);
        }
        if chat_id.trim().is_empty() {
            return Err(NotifyError::MissingChatId);
        }

        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| NotifyError::Init(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            endpoint: format!("{TELEGRAM_API}/bot{token}/sendMessage"),
            chat_id: chat_id.to_string(),
            client,
        })
    }
}

impl Messenger for Telegram {
    fn name(&self) -> &'static str {
        "telegram"
    }

    /// Send one chunk as an HTML message with link previews disabled
    async fn deliver(&self, text: &str) -> Result<(), NotifyError> {
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: "HTML",
            disable_web_page_preview: true,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(chars = text.chars().count(), "Message delivered");
            return Ok(());
        }

        // Telegram explains rejections in the response envelope
        let description = response
            .json::<ApiResponse>()
            .await
            .ok()
            .and_then(|r| r.description)
            .unwrap_or_else(|| "no description".to_string());

        Err(NotifyError::Api {
            status: status.as_u16(),
            description,
        })
    }
}

// --- API Request/Response Types ---

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
    disable_web_page_preview: bool,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    #[allow(dead_code)]
    ok: bool,
    description: Option<String>,
}
