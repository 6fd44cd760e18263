use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;

use crate::{ApiError, ApiFailure};

/// Connection settings for the homework status endpoint.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Full URL of the status endpoint.
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Client for the homework status endpoint.
#[async_trait::async_trait]
pub trait StatusApi: Send + Sync {
    /// Fetches homework updates recorded at or after `from_date`.
    ///
    /// Returns the decoded JSON value without validating its shape.
    async fn fetch_statuses(&self, from_date: i64) -> Result<serde_json::Value, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestStatusApi {
    settings: ClientSettings,
    token: String,
    client: reqwest::Client,
}

impl ReqwestStatusApi {
    pub fn new(settings: ClientSettings, token: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiFailure::Network, err.to_string()))?;

        Ok(Self {
            settings,
            token: token.into(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl StatusApi for ReqwestStatusApi {
    async fn fetch_statuses(&self, from_date: i64) -> Result<serde_json::Value, ApiError> {
        let response = self
            .client
            .get(&self.settings.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;
        if status != StatusCode::OK {
            return Err(ApiError::new(ApiFailure::HttpStatus(status.as_u16()), body));
        }

        serde_json::from_str(&body).map_err(|_| ApiError::new(ApiFailure::Decode, body))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailure::Timeout, err.to_string());
    }
    ApiError::new(ApiFailure::Network, err.to_string())
}
