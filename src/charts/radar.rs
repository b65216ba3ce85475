//! User Engagement radar chart

use super::geometry::{Point, RadarLayout};
use super::svg::{
    anchor_for_angle, legend_entry, line, polygon, pulse_marker, SvgDocument, GRID_STROKE,
};
use crate::model::{top_engagement, EngagementRecord};

pub const WIDTH: f64 = 560.0;
pub const HEIGHT: f64 = 420.0;

const OUTER_RADIUS: f64 = 140.0;
const LABEL_OFFSET: f64 = 16.0;
const MARKER_RADIUS: f64 = 5.0;
const STROKE: &str = "#7DD3FC";
const FILL: &str = "#F472B6";
const LEGEND: &str = "Engagement";

/// Concentric grid rings, as fractions of the outer radius
const GRID_RINGS: [f64; 5] = [0.2, 0.4, 0.6, 0.8, 1.0];

/// Layout for the top `top_n` records, in display order
pub fn engagement_layout(
    records: &[EngagementRecord],
    top_n: usize,
) -> (Vec<EngagementRecord>, RadarLayout) {
    let shown = top_engagement(records, top_n);
    let counts: Vec<u64> = shown.iter().map(|r| r.count).collect();
    let center = Point::new(WIDTH / 2.0, HEIGHT / 2.0);
    let layout = RadarLayout::compute(&counts, center, OUTER_RADIUS);
    (shown, layout)
}

/// Render the engagement radar for the `top_n` most frequent query types
pub fn render_engagement_radar(records: &[EngagementRecord], top_n: usize) -> String {
    let mut doc = SvgDocument::new(WIDTH, HEIGHT, "User Engagement");
    let (shown, layout) = engagement_layout(records, top_n);

    if shown.is_empty() {
        doc.no_data();
        return doc.finish();
    }

    let grid = format!(r#"fill="none" stroke="{}""#, GRID_STROKE);
    for fraction in GRID_RINGS {
        doc.push(&polygon(&layout.grid_ring(fraction), &grid));
    }
    for v in &layout.vertices {
        doc.push(&line(layout.center, v.axis_end, &format!(r#"stroke="{}""#, GRID_STROKE)));
    }

    let data: Vec<Point> = layout.vertices.iter().map(|v| v.point).collect();
    doc.push(&polygon(
        &data,
        &format!(
            r#"fill="{}" fill-opacity="0.48" stroke="{}" stroke-width="2""#,
            FILL, STROKE
        ),
    ));

    for (v, record) in layout.vertices.iter().zip(&shown) {
        if let Some(at) = layout.label_position(v.index, LABEL_OFFSET) {
            doc.text(at, anchor_for_angle(v.angle), "tick", &record.user_query);
        }
    }

    // Markers sit on the polygon's own vertices
    for (v, record) in layout.vertices.iter().zip(&shown) {
        let value = format!("{}: {}", record.user_query, record.count);
        doc.push(&pulse_marker(v.point, MARKER_RADIUS, STROKE, &value));
    }

    doc.push(&legend_entry(Point::new(WIDTH / 2.0 - 36.0, HEIGHT - 12.0), FILL, LEGEND));
    doc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::geometry::fmt;
    use crate::model::RADAR_TOP_N;

    fn records(n: usize) -> Vec<EngagementRecord> {
        (0..n)
            .map(|i| EngagementRecord::new(format!("query-{}", i), i as u64 + 1))
            .collect()
    }

    #[test]
    fn test_radar_shows_top_eight() {
        let svg = render_engagement_radar(&records(10), RADAR_TOP_N);
        assert_eq!(svg.matches("pulse-marker").count(), 8);
        // the two lowest counts are dropped
        assert!(!svg.contains(">query-0<"));
        assert!(!svg.contains(">query-1<"));
        assert!(svg.contains(">query-9<"));
        assert!(svg.contains("<title>query-9: 10</title>"));
        assert!(svg.contains(">Engagement</text>"));
    }

    #[test]
    fn test_first_axis_points_up() {
        let (shown, layout) = engagement_layout(&records(4), RADAR_TOP_N);
        assert_eq!(shown[0].user_query, "query-3");

        let top = layout.vertices[0].point;
        assert!((top.x - WIDTH / 2.0).abs() < 1e-9);
        assert!((top.y - (HEIGHT / 2.0 - OUTER_RADIUS)).abs() < 1e-9);

        let svg = render_engagement_radar(&records(4), RADAR_TOP_N);
        assert!(svg.contains(&format!(r#"cx="{}" cy="{}""#, fmt(top.x), fmt(top.y))));
    }

    #[test]
    fn test_empty_radar() {
        let svg = render_engagement_radar(&[], RADAR_TOP_N);
        assert!(svg.contains("No data available"));
        assert!(!svg.contains("<polygon"));
    }
}
