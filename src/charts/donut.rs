//! Query Categories donut chart

use serde::{Deserialize, Serialize};

use super::geometry::{DonutLayout, Point};
use super::svg::{anchor_for_angle, color, legend_entry, pulse_marker, SvgDocument};
use crate::model::CategorySlice;

pub const WIDTH: f64 = 480.0;
pub const HEIGHT: f64 = 380.0;

const OUTER_RADIUS: f64 = 110.0;
const INNER_RADIUS: f64 = 52.0;
const LABEL_OFFSET: f64 = 18.0;
const MARKER_RADIUS: f64 = 6.0;

/// Rounding for slice percentage labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPrecision {
    /// "Tech 75%"
    #[default]
    Whole,
    /// "Tech 75.0%"
    Tenth,
}

impl LabelPrecision {
    fn decimals(self) -> usize {
        match self {
            LabelPrecision::Whole => 0,
            LabelPrecision::Tenth => 1,
        }
    }

    /// `fraction` as a percentage, ties rounded up ("12.5" -> "13%")
    pub fn percent(self, fraction: f64) -> String {
        let decimals = self.decimals();
        let scale = 10f64.powi(decimals as i32);
        let rounded = (fraction * 100.0 * scale).round() / scale;
        format!("{:.*}%", decimals, rounded)
    }

    pub fn format(self, category: &str, fraction: f64) -> String {
        format!("{} {}", category, self.percent(fraction))
    }
}

impl std::str::FromStr for LabelPrecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whole" | "0" => Ok(LabelPrecision::Whole),
            "tenth" | "1" => Ok(LabelPrecision::Tenth),
            other => Err(format!("unknown label precision: {}", other)),
        }
    }
}

/// Layout used by the category ring, exposed for callers that need the
/// slice geometry without the markup
pub fn category_layout(slices: &[CategorySlice], padding_deg: f64) -> DonutLayout {
    let counts: Vec<u64> = slices.iter().map(|s| s.count).collect();
    DonutLayout::compute(
        &counts,
        Point::new(WIDTH / 2.0, (HEIGHT - 40.0) / 2.0),
        INNER_RADIUS,
        OUTER_RADIUS,
        padding_deg,
    )
}

/// Render the category distribution donut
pub fn render_category_ring(
    slices: &[CategorySlice],
    precision: LabelPrecision,
    padding_deg: f64,
) -> String {
    let mut doc = SvgDocument::new(WIDTH, HEIGHT, "Query Categories Distribution");

    if slices.is_empty() {
        doc.no_data();
        return doc.finish();
    }

    let layout = category_layout(slices, padding_deg);

    for (i, slice) in layout.slices.iter().enumerate() {
        if let Some(d) = layout.slice_path(i) {
            doc.push(&format!(
                r#"<path d="{}" fill="{}" stroke="rgba(2,8,20,0.6)"/>"#,
                d,
                color(i)
            ));
        }

        if slice.percent > 0.0 {
            if let Some(at) = layout.label_position(i, LABEL_OFFSET) {
                let label = precision.format(&slices[i].category, slice.percent);
                doc.text(at, anchor_for_angle(slice.mid_angle), "label", &label);
            }
        }
    }

    // Markers read the same slice angles the paths were drawn from
    for (slice, category) in layout.slices.iter().zip(slices) {
        if let Some(at) = layout.marker_position(slice.index) {
            let value = format!(
                "{}: {} ({})",
                category.category,
                category.count,
                precision.percent(slice.percent)
            );
            doc.push(&pulse_marker(at, MARKER_RADIUS, color(slice.index), &value));
        }
    }

    draw_legend(&mut doc, slices);
    doc.finish()
}

fn draw_legend(doc: &mut SvgDocument, slices: &[CategorySlice]) {
    let step = WIDTH / (slices.len() as f64 + 1.0);
    let y = HEIGHT - 16.0;
    for (i, slice) in slices.iter().enumerate() {
        let x = step * (i as f64 + 1.0);
        doc.push(&legend_entry(Point::new(x - 4.0, y), color(i), &slice.category));
    }
}
