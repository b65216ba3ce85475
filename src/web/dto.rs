//! Request and response bodies for the JSON API

use serde::{Deserialize, Serialize};

use crate::panels::{ChartSnapshot, InteractionState, SentimentTone};

// ============================================
// INTERACTION DTOs
// ============================================

/// Body of `POST /api/v1/analyze` and `POST /api/v1/sentiment`
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// Form fields posted by the dashboard page
#[derive(Debug, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub query: String,
}

/// Interaction snapshot plus the derived sentiment colour
#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    #[serde(flatten)]
    pub state: InteractionState,
    pub sentiment_tone: Option<SentimentTone>,
    pub sentiment_color: Option<&'static str>,
}

impl From<InteractionState> for InteractionResponse {
    fn from(state: InteractionState) -> Self {
        let tone = state.sentiment_tone();
        Self {
            sentiment_tone: tone,
            sentiment_color: tone.map(SentimentTone::color),
            state,
        }
    }
}

// ============================================
// CHART DTOs
// ============================================

/// Chart snapshot as served by `GET /api/v1/charts`
#[derive(Debug, Serialize)]
pub struct ChartsResponse {
    pub settled: bool,
    #[serde(flatten)]
    pub snapshot: ChartSnapshot,
}

impl From<ChartSnapshot> for ChartsResponse {
    fn from(snapshot: ChartSnapshot) -> Self {
        Self {
            settled: snapshot.is_settled(),
            snapshot,
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status
    pub status: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
