use std::time::Duration;

use serde_json::json;

/// Maximum number of attempts for rate-limited requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Telegram `sendMessage` text limit (UTF-8 characters).
const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Error raised when a notice cannot be delivered.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("telegram request failed: {0}")]
    Transport(String),
    #[error("telegram rejected the message (status {status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("telegram rate limit held after {0} attempts")]
    RateLimited(u32),
}

/// Connection settings for the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct NotifierSettings {
    /// Base URL of the Bot API, without the `/bot<token>` segment.
    pub api_base: String,
    pub request_timeout: Duration,
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.telegram.org".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Delivery channel for user-facing notices.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one text message to the configured chat.
    async fn send(&self, text: &str) -> Result<(), DeliveryError>;
}

/// Notifier backed by the Telegram Bot API `sendMessage` method.
///
/// A 429 answer is retried a bounded number of times, honouring the
/// `parameters.retry_after` field of the response body.
pub struct TelegramNotifier {
    settings: NotifierSettings,
    bot_token: String,
    chat_id: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(
        settings: NotifierSettings,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        Ok(Self {
            settings,
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.settings.api_base, self.bot_token
        );
        let payload = json!({
            "chat_id": self.chat_id,
            "text": truncate_message(text, TELEGRAM_MESSAGE_LIMIT),
        });

        let mut attempts = 0;
        loop {
            attempts += 1;

            let response = self
                .client
                .post(&url)
                .json(&payload)
                .send()
                .await
                .map_err(|err| DeliveryError::Transport(err.to_string()))?;

            let status = response.status();
            if status.is_success() {
                return Ok(());
            }

            if status.as_u16() == 429 {
                let body: serde_json::Value = response.json().await.unwrap_or_default();
                let retry_after = body
                    .get("parameters")
                    .and_then(|p| p.get("retry_after"))
                    .and_then(|v| v.as_u64())
                    .map(Duration::from_secs);

                if attempts >= MAX_RATE_LIMIT_RETRIES {
                    log::warn!(
                        "telegram rate limit: {} attempts exhausted, last retry_after was {:?}",
                        MAX_RATE_LIMIT_RETRIES,
                        retry_after
                    );
                    return Err(DeliveryError::RateLimited(MAX_RATE_LIMIT_RETRIES));
                }

                let wait = retry_after.unwrap_or(Duration::from_secs(1));
                log::debug!(
                    "telegram rate limited (429), waiting {:?} before retry (attempt {}/{})",
                    wait,
                    attempts,
                    MAX_RATE_LIMIT_RETRIES
                );
                tokio::time::sleep(wait).await;
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
    }
}

/// Truncates to at most `limit` characters, on a character boundary.
fn truncate_message(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    text.chars().take(limit).collect()
}
