//! In-memory analytics service for unit tests

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use super::{AnalyticsService, ServiceError};

/// Canned responses; `None` makes the call fail as if the service were down
#[derive(Default)]
pub(crate) struct StubService {
    pub analyze: Option<String>,
    pub sentiment: Option<String>,
    pub trends: Option<Value>,
    pub categories: Option<Value>,
    pub engagement: Option<Value>,
    /// When set, `analyze` and `query_trends` wait for a permit first
    pub gate: Option<Arc<Notify>>,
}

impl StubService {
    async fn wait(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

fn respond<T: Clone>(value: &Option<T>) -> Result<T, ServiceError> {
    value.clone().ok_or(ServiceError::Unavailable)
}

#[async_trait]
impl AnalyticsService for StubService {
    async fn analyze(&self, _text: &str) -> Result<String, ServiceError> {
        self.wait().await;
        respond(&self.analyze)
    }

    async fn sentiment(&self, _text: &str) -> Result<String, ServiceError> {
        respond(&self.sentiment)
    }

    async fn query_trends(&self) -> Result<Value, ServiceError> {
        self.wait().await;
        respond(&self.trends)
    }

    async fn category_distribution(&self) -> Result<Value, ServiceError> {
        respond(&self.categories)
    }

    async fn user_engagement(&self) -> Result<Value, ServiceError> {
        respond(&self.engagement)
    }
}
