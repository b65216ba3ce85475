//! # Orion
//!
//! AI text analysis dashboard: a text box backed by a remote analysis and
//! sentiment service, plus four charts of query volume, query categories and
//! user engagement.
//!
//! ## Modules
//!
//! - [`model`]: Records read from the analytics endpoints
//! - [`service`]: Client for the remote analytics service
//! - [`panels`]: Interaction and chart panel state
//! - [`charts`]: Chart geometry and SVG rendering
//! - [`web`]: Dashboard server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use orion::panels::ChartPanel;
//! use orion::service::{AnalyticsClient, ServiceConfig};
//! use orion::charts::{ChartKind, ChartOptions};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(AnalyticsClient::new(ServiceConfig::default())?);
//!
//!     // Fetch the three datasets
//!     let panel = ChartPanel::mount(client);
//!     let snapshot = panel.settled().await;
//!
//!     // Render the donut
//!     let svg = snapshot.render(ChartKind::CategoryRing, &ChartOptions::default());
//!     println!("{}", svg);
//!
//!     Ok(())
//! }
//! ```

pub mod charts;
pub mod config;
pub mod logging;
pub mod model;
pub mod panels;
pub mod service;
pub mod web;

// Re-export top-level types for convenience
pub use model::{top_engagement, CategorySlice, EngagementRecord, QueryPoint, RADAR_TOP_N};

pub use service::{AnalyticsClient, AnalyticsService, ServiceConfig, ServiceError};

pub use panels::{
    ChartPanel, ChartSnapshot, Dataset, DatasetStatus, InteractionPanel, InteractionState,
    SentimentTone, ANALYSIS_FAILED, SENTIMENT_FAILED,
};

pub use charts::{ChartKind, ChartOptions, LabelPrecision};

pub use web::{build_router, serve, AppState, WebError};

pub use config::{Config, ConfigError, DashboardConfig, LoggingConfig, RemoteServiceConfig};

pub use logging::init_logging;
