//! Query Volume line chart

use super::geometry::{fmt, monotone_path, CartesianLayout, Margin, PlotArea, Point};
use super::svg::{self, pulse_marker, SvgDocument, AXIS_STROKE, GRID_STROKE};
use crate::model::QueryPoint;

pub const WIDTH: f64 = 800.0;
pub const HEIGHT: f64 = 320.0;

const LINE_COLOR: &str = "#7DD3FC";
const MARKER_RADIUS: f64 = 3.2;

/// Margins shared by the line and area charts
pub(crate) const MARGIN: Margin = Margin {
    top: 12.0,
    right: 28.0,
    bottom: 32.0,
    left: 48.0,
};

/// Render the query volume line chart
pub fn render_trend_line(points: &[QueryPoint]) -> String {
    let mut doc = SvgDocument::new(WIDTH, HEIGHT, "Query Volume Over Time");
    let layout = cartesian_layout(points, WIDTH, HEIGHT);

    draw_axes(&mut doc, &layout, points, true);

    if points.is_empty() {
        doc.no_data();
        return doc.finish();
    }

    doc.push(&format!(
        r#"<path d="{}" fill="none" stroke="{}" stroke-width="3" stroke-linejoin="round"/>"#,
        monotone_path(&layout.points),
        LINE_COLOR
    ));

    for (p, point) in layout.points.iter().zip(points) {
        doc.push(&pulse_marker(*p, MARKER_RADIUS, LINE_COLOR, &point_value(point)));
    }

    doc.finish()
}

/// Marker tooltip for one trend point
pub(crate) fn point_value(point: &QueryPoint) -> String {
    format!("{}: {} queries", point.date, point.queries)
}

pub(crate) fn cartesian_layout(points: &[QueryPoint], width: f64, height: f64) -> CartesianLayout {
    let values: Vec<u64> = points.iter().map(|p| p.queries).collect();
    CartesianLayout::compute(&values, PlotArea::new(width, height, MARGIN))
}

/// Y ticks, optional dashed grid, axis lines and (thinned) date labels
pub(crate) fn draw_axes(
    doc: &mut SvgDocument,
    layout: &CartesianLayout,
    points: &[QueryPoint],
    grid: bool,
) {
    let plot = layout.plot;

    for tick in &layout.ticks {
        if grid {
            doc.push(&svg::line(
                Point::new(plot.left, tick.y),
                Point::new(plot.right(), tick.y),
                &format!(r#"stroke="{}" stroke-dasharray="4 4""#, GRID_STROKE),
            ));
        }
        doc.push(&format!(
            r#"<text x="{}" y="{}" text-anchor="end" class="tick">{}</text>"#,
            fmt(plot.left - 8.0),
            fmt(tick.y + 4.0),
            svg::tick_label(tick.value)
        ));
    }

    let axis = format!(r#"stroke="{}""#, AXIS_STROKE);
    doc.push(&svg::line(
        Point::new(plot.left, plot.top),
        Point::new(plot.left, plot.bottom()),
        &axis,
    ));
    doc.push(&svg::line(
        Point::new(plot.left, plot.bottom()),
        Point::new(plot.right(), plot.bottom()),
        &axis,
    ));

    // Keep at most ~10 date labels readable
    let every = (points.len() + 9) / 10;
    for (i, (point, at)) in points.iter().zip(&layout.points).enumerate() {
        if every > 1 && i % every != 0 {
            continue;
        }
        doc.push(&format!(
            r#"<text x="{}" y="{}" text-anchor="middle" class="tick">{}</text>"#,
            fmt(at.x),
            fmt(plot.bottom() + 20.0),
            svg::escape(&point.date)
        ));
    }
}
