//! Dashboard Charts
//!
//! Renders the four dashboard visualizations as standalone SVG documents.
//!
//! ## Charts
//!
//! - [`ChartKind::TrendLine`]: query volume per date, monotone curve
//! - [`ChartKind::CategoryRing`]: donut of query categories
//! - [`ChartKind::TrendArea`]: query volume as a gradient-filled area
//! - [`ChartKind::EngagementRadar`]: top query types by frequency
//!
//! Every chart draws a pulsing marker at each data point. Marker positions
//! come from the same layout as the shapes underneath (see [`geometry`]).
//! Empty input renders an empty chart with a "No data available" message;
//! rendering never fails.

pub mod area;
pub mod donut;
pub mod geometry;
pub mod line;
pub mod radar;
pub mod svg;

pub use area::render_trend_area;
pub use donut::{category_layout, render_category_ring, LabelPrecision};
pub use geometry::{
    polar_to_cartesian, radar_angle, CartesianLayout, DonutLayout, DonutSlice, Point,
    RadarLayout, RadarVertex,
};
pub use line::render_trend_line;
pub use radar::{engagement_layout, render_engagement_radar};

use serde::{Deserialize, Serialize};

use crate::model::{CategorySlice, EngagementRecord, QueryPoint, RADAR_TOP_N};

/// Rendering options shared by the charts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Percentage rounding on donut labels
    pub label_precision: LabelPrecision,
    /// Gap after each non-zero donut slice, in degrees
    pub padding_angle: f64,
    /// Number of engagement records on the radar
    pub radar_top_n: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            label_precision: LabelPrecision::Whole,
            padding_angle: 0.0,
            radar_top_n: RADAR_TOP_N,
        }
    }
}

/// The four dashboard charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    TrendLine,
    CategoryRing,
    TrendArea,
    EngagementRadar,
}

impl ChartKind {
    /// All charts in page order
    pub const ALL: [ChartKind; 4] = [
        ChartKind::TrendLine,
        ChartKind::CategoryRing,
        ChartKind::TrendArea,
        ChartKind::EngagementRadar,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ChartKind::TrendLine => "trend-line",
            ChartKind::CategoryRing => "category-ring",
            ChartKind::TrendArea => "trend-area",
            ChartKind::EngagementRadar => "engagement-radar",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.svg", self.slug())
    }

    /// Parse "trend-line.svg" (or a bare "trend-line")
    pub fn from_file_name(name: &str) -> Option<ChartKind> {
        let slug = name.strip_suffix(".svg").unwrap_or(name);
        ChartKind::ALL.into_iter().find(|k| k.slug() == slug)
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::TrendLine => "📊 Query Volume Over Time",
            ChartKind::CategoryRing => "🍕 Query Categories Distribution",
            ChartKind::TrendArea => "📈 Query Trends",
            ChartKind::EngagementRadar => "🚀 User Engagement",
        }
    }

    pub fn subtitle(self, options: &ChartOptions, engagement_shown: usize) -> String {
        match self {
            ChartKind::TrendLine => "Recent query counts, X axis is date".to_string(),
            ChartKind::CategoryRing => "Breakdown of categories".to_string(),
            ChartKind::TrendArea => "Smoothed area, highlights trend peaks".to_string(),
            ChartKind::EngagementRadar => format!(
                "Top {} query types by frequency",
                engagement_shown.min(options.radar_top_n)
            ),
        }
    }

    /// Render this chart from the given datasets
    pub fn render(
        self,
        trends: &[QueryPoint],
        categories: &[CategorySlice],
        engagement: &[EngagementRecord],
        options: &ChartOptions,
    ) -> String {
        match self {
            ChartKind::TrendLine => render_trend_line(trends),
            ChartKind::CategoryRing => {
                render_category_ring(categories, options.label_precision, options.padding_angle)
            }
            ChartKind::TrendArea => render_trend_area(trends),
            ChartKind::EngagementRadar => render_engagement_radar(engagement, options.radar_top_n),
        }
    }
}
