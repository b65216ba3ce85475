//! Interaction Routes
//!
//! - GET /api/v1/interaction - Current interaction snapshot
//! - POST /api/v1/analyze - Analyze text
//! - POST /api/v1/sentiment - Sentiment of text
//!
//! Service failures are not HTTP errors here: the snapshot carries the
//! fallback message, the same as the page shows.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::web::dto::{InteractionResponse, TextRequest};
use crate::web::state::AppState;

/// GET /api/v1/interaction
pub async fn get_interaction(State(state): State<Arc<AppState>>) -> Json<InteractionResponse> {
    Json(state.interaction.snapshot().into())
}

/// POST /api/v1/analyze
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TextRequest>,
) -> Json<InteractionResponse> {
    state.interaction.set_query(req.text.as_str());
    Json(state.interaction.submit_analysis(&req.text).await.into())
}

/// POST /api/v1/sentiment
pub async fn sentiment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TextRequest>,
) -> Json<InteractionResponse> {
    state.interaction.set_query(req.text.as_str());
    Json(state.interaction.submit_sentiment(&req.text).await.into())
}
