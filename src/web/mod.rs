//! Orion Dashboard Server
//!
//! Serves the dashboard to a browser, built with Axum. Meant for a single
//! local user: the interaction form state is shared by all clients.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Dashboard page
//! - `POST /analyze` - Form post: analyze the `query` field
//! - `POST /sentiment` - Form post: sentiment of the `query` field
//! - `GET /charts/:name` - One chart as SVG
//!
//! ## JSON API
//! - `GET /api/v1/charts` - Chart datasets
//! - `GET /api/v1/interaction` - Interaction snapshot
//! - `POST /api/v1/analyze` - Analyze `{text}`
//! - `POST /api/v1/sentiment` - Sentiment of `{text}`
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use orion::service::{AnalyticsClient, ServiceConfig};
//! use orion::config::DashboardConfig;
//! use orion::web::{serve, AppState};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AnalyticsClient::new(ServiceConfig::default())?;
//!     let config = DashboardConfig::default();
//!
//!     let state = AppState::new(Arc::new(client), &config);
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod page;
pub mod routes;
pub mod state;

pub use error::{WebError, WebResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::DashboardConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/charts", get(routes::charts::get_charts))
        .route("/interaction", get(routes::interaction::get_interaction))
        .route("/analyze", post(routes::interaction::analyze))
        .route("/sentiment", post(routes::interaction::sentiment));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::dashboard::index))
        .route("/analyze", post(routes::dashboard::analyze_form))
        .route("/sentiment", post(routes::dashboard::sentiment_form))
        .route("/charts/:name", get(routes::charts::get_chart_svg))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the dashboard server
pub async fn serve(state: AppState, config: &DashboardConfig) -> Result<(), WebError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Orion dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WebError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Orion dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
