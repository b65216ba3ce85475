//! Analytics Service Integration
//!
//! Talks to the remote AI/analytics service that does all the real work:
//! text generation, sentiment scoring and query aggregation.
//!
//! ## Endpoints used
//!
//! - `POST /analyze` - generate text for a user query
//! - `POST /sentiment` - label the sentiment of a text
//! - `GET /query-trends` - query volume per date
//! - `GET /query-category-distribution` - query count per category
//! - `GET /user-engagement` - query count per query type
//!
//! The panels depend on the [`AnalyticsService`] trait rather than the HTTP
//! client so they can run against any source of the same data.

mod client;
#[cfg(test)]
pub(crate) mod stub;

pub use client::{AnalyticsClient, ServiceConfig, ServiceError, DEFAULT_BASE_URL};

use async_trait::async_trait;
use serde_json::Value;

/// Operations offered by the analytics service
#[async_trait]
pub trait AnalyticsService: Send + Sync {
    /// Generate a response for the user's text
    async fn analyze(&self, text: &str) -> Result<String, ServiceError>;

    /// Return the sentiment label for the text
    async fn sentiment(&self, text: &str) -> Result<String, ServiceError>;

    /// Raw `/query-trends` response
    async fn query_trends(&self) -> Result<Value, ServiceError>;

    /// Raw `/query-category-distribution` response
    async fn category_distribution(&self) -> Result<Value, ServiceError>;

    /// Raw `/user-engagement` response
    async fn user_engagement(&self) -> Result<Value, ServiceError>;
}
