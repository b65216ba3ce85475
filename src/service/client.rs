//! Analytics Service REST Client
//!
//! HTTP client for the remote analyze/sentiment/analytics API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::AnalyticsService;

/// Default origin of the hosted analytics service
pub const DEFAULT_BASE_URL: &str = "https://gemini-fastapi-server.onrender.com";

/// REST client for the analytics service
pub struct AnalyticsClient {
    client: Client,
    config: ServiceConfig,
}

/// Configuration for the analytics client
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base origin, e.g. "https://gemini-fastapi-server.onrender.com"
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

impl AnalyticsClient {
    /// Create a new client with the given configuration
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ServiceError>
    where
        B: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let url = self.url(path);
        tracing::debug!(url = %url, "POST analytics service");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(classify)?;

        decode(response).await
    }

    async fn get_json(&self, path: &str) -> Result<Value, ServiceError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET analytics service");

        let response = self.client.get(&url).send().await.map_err(classify)?;

        decode(response).await
    }
}

#[async_trait]
impl AnalyticsService for AnalyticsClient {
    async fn analyze(&self, text: &str) -> Result<String, ServiceError> {
        let body = AnalyzeRequest { user_query: text };
        let response: AnalyzeResponse = self.post_json("/analyze", &body).await?;
        Ok(response.generated_text)
    }

    async fn sentiment(&self, text: &str) -> Result<String, ServiceError> {
        let body = SentimentRequest { text };
        let response: SentimentResponse = self.post_json("/sentiment", &body).await?;
        Ok(response.sentiment)
    }

    async fn query_trends(&self) -> Result<Value, ServiceError> {
        self.get_json("/query-trends").await
    }

    async fn category_distribution(&self) -> Result<Value, ServiceError> {
        self.get_json("/query-category-distribution").await
    }

    async fn user_engagement(&self) -> Result<Value, ServiceError> {
        self.get_json("/user-engagement").await
    }
}

fn classify(e: reqwest::Error) -> ServiceError {
    if e.is_timeout() {
        ServiceError::Timeout
    } else if e.is_connect() {
        ServiceError::Unavailable
    } else {
        ServiceError::Request(e)
    }
}

async fn decode<R>(response: reqwest::Response) -> Result<R, ServiceError>
where
    R: for<'de> Deserialize<'de>,
{
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(ServiceError::ApiError {
            status: status.as_u16(),
            message: text,
        });
    }

    let bytes = response.bytes().await.map_err(classify)?;
    serde_json::from_slice(&bytes).map_err(|e| ServiceError::Decode(e.to_string()))
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    user_query: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    generated_text: String,
}

#[derive(Debug, Serialize)]
struct SentimentRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SentimentResponse {
    sentiment: String,
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when talking to the analytics service
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Analytics service unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout_ms, 30_000);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = AnalyticsClient::new(ServiceConfig::new("http://localhost:9000/")).unwrap();
        assert_eq!(client.url("/analyze"), "http://localhost:9000/analyze");
    }

    #[test]
    fn test_request_bodies() {
        let body = serde_json::to_value(AnalyzeRequest { user_query: "hi" }).unwrap();
        assert_eq!(body, serde_json::json!({"user_query": "hi"}));

        let body = serde_json::to_value(SentimentRequest { text: "hi" }).unwrap();
        assert_eq!(body, serde_json::json!({"text": "hi"}));
    }

    #[test]
    fn test_error_display() {
        let err = ServiceError::ApiError {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API error 502: bad gateway");
    }
}
