//! SVG Building Blocks
//!
//! Document wrapper, text escaping, pulse markers and the empty-chart
//! placeholder shared by all four charts.

use std::borrow::Cow;

use super::geometry::{fmt, Point};

/// Series colours, cycled by index
pub const COLORS: [&str; 5] = ["#7DD3FC", "#B794F4", "#F472B6", "#FFD166", "#9AD2FF"];

/// Axis line and label colour
pub const AXIS_STROKE: &str = "#B5C7FF";

/// Faint grid colour
pub const GRID_STROKE: &str = "rgba(255,255,255,0.08)";

/// Message drawn when a chart has nothing to show
pub const NO_DATA_MESSAGE: &str = "No data available";

/// Keyframes for the pulse halo. Each halo scales around its own centre and
/// runs its own animation instance.
const PULSE_STYLE: &str = "\
@keyframes orion-pulse {\
 0% { transform: scale(1); opacity: 1; }\
 70% { transform: scale(1.6); opacity: 0.18; }\
 100% { transform: scale(1); opacity: 1; }\
}\
.pulse-halo { transform-box: fill-box; transform-origin: center; animation: orion-pulse 1600ms infinite ease-in-out; }\
@media (prefers-reduced-motion: reduce) { .pulse-halo { animation: none; } }\
.tick { fill: #E6F0FF; font-size: 12px; font-family: Inter, Roboto, 'Segoe UI', sans-serif; }\
.label { fill: #E6F0FF; font-size: 12px; font-weight: 600; font-family: Inter, Roboto, 'Segoe UI', sans-serif; }\
.no-data { fill: rgba(181,199,255,0.6); font-size: 16px; font-family: Inter, Roboto, 'Segoe UI', sans-serif; }";

/// Colour for series index `i`
pub fn color(i: usize) -> &'static str {
    COLORS[i % COLORS.len()]
}

/// Escape text for element content and attribute values
pub fn escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// An SVG document assembled from fragments
#[derive(Debug)]
pub struct SvgDocument {
    width: f64,
    height: f64,
    title: String,
    defs: String,
    body: String,
}

impl SvgDocument {
    pub fn new(width: f64, height: f64, title: &str) -> Self {
        Self {
            width,
            height,
            title: title.to_string(),
            defs: String::new(),
            body: String::new(),
        }
    }

    pub fn def(&mut self, fragment: &str) {
        self.defs.push_str(fragment);
    }

    pub fn push(&mut self, fragment: &str) {
        self.body.push_str(fragment);
    }

    /// Text element; `class` picks one of the embedded styles
    pub fn text(&mut self, at: Point, anchor: &str, class: &str, content: &str) {
        self.body.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="{}" class="{}">{}</text>"#,
            fmt(at.x),
            fmt(at.y),
            anchor,
            class,
            escape(content)
        ));
    }

    /// Centred "No data available" message
    pub fn no_data(&mut self) {
        let center = Point::new(self.width / 2.0, self.height / 2.0);
        self.text(center, "middle", "no-data", NO_DATA_MESSAGE);
    }

    pub fn finish(self) -> String {
        let w = fmt(self.width);
        let h = fmt(self.height);
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img"><title>{}</title><style>{}</style><defs>{}</defs>{}</svg>"#,
            escape(&self.title),
            PULSE_STYLE,
            self.defs,
            self.body
        )
    }
}

/// Animated halo plus solid core at `at`.
///
/// `value` becomes the marker's `<title>`, shown as a tooltip on hover.
pub fn pulse_marker(at: Point, r: f64, fill: &str, value: &str) -> String {
    let (x, y) = (fmt(at.x), fmt(at.y));
    format!(
        r#"<g class="pulse-marker"><title>{}</title><circle class="pulse-halo" cx="{x}" cy="{y}" r="{}" fill="{fill}" opacity="0.12"/><circle cx="{x}" cy="{y}" r="{}" fill="{fill}" stroke="rgba(255,255,255,0.12)" stroke-width="1.2"/></g>"#,
        escape(value),
        fmt(r * 2.6),
        fmt(r)
    )
}

/// Colour swatch followed by a caption, for chart legends
pub fn legend_entry(at: Point, fill: &str, caption: &str) -> String {
    format!(
        r#"<rect x="{}" y="{}" width="10" height="10" fill="{}"/><text x="{}" y="{}" text-anchor="start" class="tick">{}</text>"#,
        fmt(at.x - 14.0),
        fmt(at.y - 9.0),
        fill,
        fmt(at.x),
        fmt(at.y),
        escape(caption)
    )
}

/// Closed polygon through `points`
pub fn polygon(points: &[Point], attrs: &str) -> String {
    let list: Vec<String> = points
        .iter()
        .map(|p| format!("{},{}", fmt(p.x), fmt(p.y)))
        .collect();
    format!(r#"<polygon points="{}" {}/>"#, list.join(" "), attrs)
}

/// Straight line between two points
pub fn line(from: Point, to: Point, attrs: &str) -> String {
    format!(
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
        fmt(from.x),
        fmt(from.y),
        fmt(to.x),
        fmt(to.y),
        attrs
    )
}

/// Tick label text: integers without decimals
pub fn tick_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        fmt(value)
    }
}

/// Text anchor that keeps a label clear of the shape at `angle_deg`
pub fn anchor_for_angle(angle_deg: f64) -> &'static str {
    let cos = angle_deg.to_radians().cos();
    if cos > 0.1 {
        "start"
    } else if cos < -0.1 {
        "end"
    } else {
        "middle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_pulse_marker_has_halo_and_core() {
        let marker = pulse_marker(Point::new(10.0, 20.0), 5.0, "#7DD3FC", "a < b: 3");
        assert_eq!(marker.matches("<circle").count(), 2);
        assert!(marker.contains("<title>a &lt; b: 3</title>"));
        assert!(marker.contains(r#"class="pulse-halo""#));
        assert!(marker.contains(r#"r="13""#));
        assert!(marker.contains(r#"cx="10" cy="20""#));
    }

    #[test]
    fn test_document_wraps_fragments() {
        let mut doc = SvgDocument::new(100.0, 50.0, "Q&A");
        doc.no_data();
        let svg = doc.finish();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("<title>Q&amp;A</title>"));
        assert!(svg.contains(NO_DATA_MESSAGE));
        assert!(svg.contains("@keyframes orion-pulse"));
        assert!(svg.contains(".tick { fill: #E6F0FF;"));
    }

    #[test]
    fn test_legend_entry() {
        let entry = legend_entry(Point::new(40.0, 100.0), "#F472B6", "Engagement");
        assert!(entry.contains(r#"<rect x="26" y="91""#));
        assert!(entry.contains(">Engagement</text>"));
    }

    #[test]
    fn test_tick_label() {
        assert_eq!(tick_label(25.0), "25");
        assert_eq!(tick_label(0.25), "0.25");
    }

    #[test]
    fn test_anchor_for_angle() {
        assert_eq!(anchor_for_angle(0.0), "start");
        assert_eq!(anchor_for_angle(180.0), "end");
        assert_eq!(anchor_for_angle(90.0), "middle");
    }
}
