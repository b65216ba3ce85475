//! Query Trends area chart
//!
//! Same x/y domain as the line chart, filled under the curve with a
//! top-to-bottom fading gradient. Markers use the layout's own per-point
//! coordinates, the ones the fill outline passes through.

use super::geometry::{fmt, monotone_path, CartesianLayout};
use super::line::{cartesian_layout, draw_axes, point_value};
use super::svg::{pulse_marker, SvgDocument};
use crate::model::QueryPoint;

pub const WIDTH: f64 = 800.0;
pub const HEIGHT: f64 = 300.0;

const AREA_COLOR: &str = "#B794F4";
const GRADIENT_ID: &str = "orion-area-gradient";
const MARKER_RADIUS: f64 = 3.6;

/// Render the query trends area chart
pub fn render_trend_area(points: &[QueryPoint]) -> String {
    let mut doc = SvgDocument::new(WIDTH, HEIGHT, "Query Trends");
    let layout = cartesian_layout(points, WIDTH, HEIGHT);

    doc.def(&format!(
        r#"<linearGradient id="{id}" x1="0" y1="0" x2="0" y2="1"><stop offset="6%" stop-color="{c}" stop-opacity="0.85"/><stop offset="96%" stop-color="{c}" stop-opacity="0"/></linearGradient>"#,
        id = GRADIENT_ID,
        c = AREA_COLOR
    ));

    draw_axes(&mut doc, &layout, points, false);

    if points.is_empty() {
        doc.no_data();
        return doc.finish();
    }

    let outline = monotone_path(&layout.points);
    doc.push(&format!(
        r#"<path d="{}" fill="url(#{})" stroke="none"/>"#,
        fill_path(&outline, &layout),
        GRADIENT_ID
    ));
    doc.push(&format!(
        r#"<path d="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
        outline, AREA_COLOR
    ));

    for (p, point) in layout.points.iter().zip(points) {
        doc.push(&pulse_marker(*p, MARKER_RADIUS, AREA_COLOR, &point_value(point)));
    }

    doc.finish()
}

/// Close the curve down to the baseline
fn fill_path(outline: &str, layout: &CartesianLayout) -> String {
    let (Some(first), Some(last)) = (layout.points.first(), layout.points.last()) else {
        return String::new();
    };
    let base = fmt(layout.baseline());
    format!(
        "{}L{},{}L{},{}Z",
        outline,
        fmt(last.x),
        base,
        fmt(first.x),
        base
    )
}
