//! Chart Routes
//!
//! - GET /api/v1/charts - Chart datasets as JSON
//! - GET /charts/:name - One chart as SVG

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::charts::ChartKind;
use crate::web::dto::ChartsResponse;
use crate::web::error::{WebError, WebResult};
use crate::web::state::AppState;

/// GET /api/v1/charts
pub async fn get_charts(State(state): State<Arc<AppState>>) -> Json<ChartsResponse> {
    Json(state.load_charts().await.into())
}

/// GET /charts/:name
///
/// `name` is one of `trend-line.svg`, `category-ring.svg`, `trend-area.svg`,
/// `engagement-radar.svg`.
pub async fn get_chart_svg(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> WebResult<impl IntoResponse> {
    let kind = ChartKind::from_file_name(&name)
        .ok_or_else(|| WebError::NotFound(format!("chart {}", name)))?;

    let snapshot = state.load_charts().await;
    let svg = snapshot.render(kind, &state.options);

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}
