//! Application State
//!
//! Shared state accessible by all dashboard handlers.
//! Wrapped in Arc for sharing across async tasks.
//!
//! Orion is a single-user local dashboard: there is one interaction panel,
//! and every browser tab or API client sees (and edits) the same query,
//! response and sentiment. Chart panels are per view.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::charts::ChartOptions;
use crate::config::DashboardConfig;
use crate::panels::{ChartPanel, ChartSnapshot, InteractionPanel};
use crate::service::AnalyticsService;

/// Shared application state for all handlers
pub struct AppState {
    /// Remote analytics service
    pub service: Arc<dyn AnalyticsService>,
    /// The one interaction panel, shared by every client
    pub interaction: InteractionPanel,
    /// Chart rendering options
    pub options: ChartOptions,
    /// How long a view waits for the chart fetches
    pub fetch_timeout: Duration,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(service: Arc<dyn AnalyticsService>, config: &DashboardConfig) -> Self {
        Self {
            interaction: InteractionPanel::new(Arc::clone(&service)),
            service,
            options: config.chart_options(),
            fetch_timeout: config.fetch_timeout(),
            start_time: Instant::now(),
        }
    }

    /// Mount a chart panel for one view and wait (bounded) for its data.
    ///
    /// Returns whatever has arrived when the timeout fires; the outstanding
    /// fetches keep running and are discarded.
    pub async fn load_charts(&self) -> ChartSnapshot {
        let panel = ChartPanel::mount(Arc::clone(&self.service));

        match tokio::time::timeout(self.fetch_timeout, panel.settled()).await {
            Ok(snapshot) => snapshot,
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.fetch_timeout.as_secs(),
                    "Chart data not settled before timeout"
                );
                let snapshot = panel.snapshot();
                panel.unmount();
                snapshot
            }
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
