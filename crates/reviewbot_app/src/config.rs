//! Startup configuration, read once from the environment.

use std::env;
use std::time::Duration;

use thiserror::Error;

const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
const POLL_INTERVAL_SECS: &str = "POLL_INTERVAL_SECS";

/// Delay between poll cycles unless overridden.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

/// Everything the agent needs before the first cycle. Absence of any
/// credential is fatal at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub poll_interval: Duration,
}

impl Config {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let poll_interval = match lookup(POLL_INTERVAL_SECS) {
            None => DEFAULT_POLL_INTERVAL,
            Some(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| ConfigError::InvalidVar(POLL_INTERVAL_SECS, raw.clone()))?;
                Duration::from_secs(secs)
            }
        };

        Ok(Self {
            practicum_token: require(&lookup, PRACTICUM_TOKEN)?,
            telegram_token: require(&lookup, TELEGRAM_TOKEN)?,
            telegram_chat_id: require(&lookup, TELEGRAM_CHAT_ID)?,
            poll_interval,
        })
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    match lookup(name) {
        // An empty value is as useless as an absent one.
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}
