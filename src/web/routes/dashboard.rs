//! Dashboard Routes
//!
//! - GET / - The dashboard page
//! - POST /analyze - Form post, runs analysis then redirects to `/`
//! - POST /sentiment - Form post, runs sentiment then redirects to `/`

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use std::sync::Arc;

use crate::web::dto::QueryForm;
use crate::web::page::render_dashboard;
use crate::web::state::AppState;

/// GET /
///
/// Fetches chart data for this view and renders the page.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let charts = state.load_charts().await;
    let interaction = state.interaction.snapshot();
    Html(render_dashboard(&interaction, &charts, &state.options))
}

/// POST /analyze
pub async fn analyze_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<QueryForm>,
) -> Redirect {
    state.interaction.set_query(form.query.as_str());
    state.interaction.submit_analysis(&form.query).await;
    Redirect::to("/")
}

/// POST /sentiment
pub async fn sentiment_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<QueryForm>,
) -> Redirect {
    state.interaction.set_query(form.query.as_str());
    state.interaction.submit_sentiment(&form.query).await;
    Redirect::to("/")
}
