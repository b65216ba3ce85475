//! Chart Panel
//!
//! Fetches the three analytics datasets once, on mount, and keeps the
//! latest [`ChartSnapshot`] for the renderers.
//!
//! Each fetch runs in its own task: one failing (or hanging) never blocks or
//! clears the others. Failures and non-array responses leave that dataset
//! empty. Tasks are not cancelled when the panel goes away; a result that
//! arrives after the panel was dropped is discarded.

use std::sync::{Arc, Weak};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::charts::{ChartKind, ChartOptions};
use crate::model::{top_engagement, CategorySlice, EngagementRecord, QueryPoint};
use crate::service::{AnalyticsService, ServiceError};

/// Progress of one dataset's fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetStatus {
    #[default]
    Pending,
    Loaded,
    Failed,
}

/// One dataset: either the full fetched collection or empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset<T> {
    pub status: DatasetStatus,
    pub items: Vec<T>,
}

impl<T> Default for Dataset<T> {
    fn default() -> Self {
        Self {
            status: DatasetStatus::Pending,
            items: Vec::new(),
        }
    }
}

impl<T> Dataset<T> {
    pub fn loaded(items: Vec<T>) -> Self {
        Self {
            status: DatasetStatus::Loaded,
            items,
        }
    }

    pub fn failed() -> Self {
        Self {
            status: DatasetStatus::Failed,
            items: Vec::new(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == DatasetStatus::Pending
    }
}

/// Everything the four charts draw from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSnapshot {
    pub trends: Dataset<QueryPoint>,
    pub categories: Dataset<CategorySlice>,
    pub engagement: Dataset<EngagementRecord>,
}

impl ChartSnapshot {
    /// True once every fetch has completed or failed
    pub fn is_settled(&self) -> bool {
        !self.trends.is_pending() && !self.categories.is_pending() && !self.engagement.is_pending()
    }

    /// Engagement records the radar shows
    pub fn radar_records(&self, options: &ChartOptions) -> Vec<EngagementRecord> {
        top_engagement(&self.engagement.items, options.radar_top_n)
    }

    /// Render one chart as SVG
    pub fn render(&self, kind: ChartKind, options: &ChartOptions) -> String {
        kind.render(
            &self.trends.items,
            &self.categories.items,
            &self.engagement.items,
            options,
        )
    }

    /// A copy of this snapshot with one dataset marked failed
    fn with_failure(&self, source: Source) -> Self {
        let mut next = self.clone();
        match source {
            Source::Trends => next.trends = Dataset::failed(),
            Source::Categories => next.categories = Dataset::failed(),
            Source::Engagement => next.engagement = Dataset::failed(),
        }
        next
    }

    /// A copy of this snapshot with one dataset replaced by a fetch result
    fn with_result(&self, source: Source, result: Result<&Value, &ServiceError>) -> Self {
        let mut next = self.clone();
        match result {
            Err(e) => {
                tracing::warn!(source = source.name(), error = %e, "Error fetching chart data");
                next = next.with_failure(source);
            }
            Ok(value) => {
                if !value.is_array() {
                    tracing::warn!(
                        source = source.name(),
                        "Unexpected API format, expected an array"
                    );
                }
                match source {
                    Source::Trends => {
                        next.trends = Dataset::loaded(QueryPoint::list_from_json(value))
                    }
                    Source::Categories => {
                        next.categories = Dataset::loaded(CategorySlice::list_from_json(value))
                    }
                    Source::Engagement => {
                        next.engagement = Dataset::loaded(EngagementRecord::list_from_json(value))
                    }
                }
            }
        }
        next
    }
}

/// The three read endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Trends,
    Categories,
    Engagement,
}

impl Source {
    const ALL: [Source; 3] = [Source::Trends, Source::Categories, Source::Engagement];

    fn name(self) -> &'static str {
        match self {
            Source::Trends => "query-trends",
            Source::Categories => "query-category-distribution",
            Source::Engagement => "user-engagement",
        }
    }
}

/// Mounted chart panel.
///
/// Dropping the panel (or calling [`ChartPanel::unmount`]) tears it down;
/// fetches still in flight finish on their own and their results are ignored.
pub struct ChartPanel {
    snapshot: Arc<watch::Sender<ChartSnapshot>>,
    tasks: Mutex<Vec<(Source, JoinHandle<()>)>>,
}

impl ChartPanel {
    /// Mount the panel: start the three fetches and return immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(service: Arc<dyn AnalyticsService>) -> Self {
        let (tx, _) = watch::channel(ChartSnapshot::default());
        let snapshot = Arc::new(tx);

        let tasks = Source::ALL
            .into_iter()
            .map(|source| {
                let service = Arc::clone(&service);
                let target = Arc::downgrade(&snapshot);
                (source, tokio::spawn(fetch(source, service, target)))
            })
            .collect();

        Self {
            snapshot,
            tasks: Mutex::new(tasks),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> ChartSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receive every future snapshot
    pub fn subscribe(&self) -> watch::Receiver<ChartSnapshot> {
        self.snapshot.subscribe()
    }

    pub fn is_settled(&self) -> bool {
        self.snapshot.borrow().is_settled()
    }

    /// Wait for all three fetches to finish and return the final snapshot.
    ///
    /// Safe to call more than once and from several callers at a time; every
    /// call waits until the snapshot is settled.
    pub async fn settled(&self) -> ChartSnapshot {
        let tasks = std::mem::take(&mut *self.tasks.lock().await);
        let (sources, handles): (Vec<Source>, Vec<_>) = tasks.into_iter().unzip();

        let results = futures_util::future::join_all(handles).await;
        for (source, result) in sources.into_iter().zip(results) {
            if let Err(e) = result {
                tracing::error!(source = source.name(), error = %e, "Chart fetch task failed");
                self.snapshot.send_modify(|current| *current = current.with_failure(source));
            }
        }

        // Another caller may hold the handles; wait on the snapshot itself
        let mut rx = self.snapshot.subscribe();
        let settled = match rx.wait_for(ChartSnapshot::is_settled).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        };
        settled
    }

    /// Tear the panel down without waiting for outstanding fetches
    pub fn unmount(self) {
        tracing::debug!(settled = self.is_settled(), "Chart panel unmounted");
    }
}

/// Fetch one dataset and apply it, if the panel is still mounted
async fn fetch(
    source: Source,
    service: Arc<dyn AnalyticsService>,
    target: Weak<watch::Sender<ChartSnapshot>>,
) {
    tracing::debug!(source = source.name(), "Fetching chart data");

    let result = match source {
        Source::Trends => service.query_trends().await,
        Source::Categories => service.category_distribution().await,
        Source::Engagement => service.user_engagement().await,
    };

    apply(source, result, &target);
}

fn apply(
    source: Source,
    result: Result<Value, ServiceError>,
    target: &Weak<watch::Sender<ChartSnapshot>>,
) {
    let Some(snapshot) = target.upgrade() else {
        tracing::debug!(source = source.name(), "Chart panel gone, dropping late result");
        return;
    };

    snapshot.send_modify(|current| *current = current.with_result(source, result.as_ref()));
}
