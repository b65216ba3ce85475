//! Dashboard Panels
//!
//! View-model state for the two halves of the dashboard: the interaction
//! panel (text box, analysis, sentiment) and the chart panel (the three
//! fetched datasets).

pub mod charts;
pub mod interaction;

pub use charts::{ChartPanel, ChartSnapshot, Dataset, DatasetStatus};
pub use interaction::{
    InteractionPanel, InteractionState, SentimentTone, ANALYSIS_FAILED, SENTIMENT_FAILED,
};
