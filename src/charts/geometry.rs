//! Chart Geometry
//!
//! Every coordinate the renderers draw comes from the layouts in this
//! module. The decorative markers read the same layout values as the slices,
//! polygons and curves they sit on, so a marker can never drift away from its
//! data point.
//!
//! Angles are in degrees, measured counterclockwise from 3 o'clock, with the
//! screen y axis pointing down: 90° is 12 o'clock and decreasing angles sweep
//! clockwise.

use serde::Serialize;

/// A position in SVG user units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Convert a polar position around `center` to screen coordinates.
///
/// Equivalent to `x = cx + r·cos(90° − θ)`, `y = cy − r·sin(90° − θ)` where
/// θ is the clockwise bearing from 12 o'clock and `angle_deg = 90° − θ`.
pub fn polar_to_cartesian(center: Point, radius: f64, angle_deg: f64) -> Point {
    let rad = angle_deg.to_radians();
    Point {
        x: center.x + radius * rad.cos(),
        y: center.y - radius * rad.sin(),
    }
}

// ============================================
// Cartesian (line / area)
// ============================================

/// Space reserved around a plot area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// The drawable rectangle inside a chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(width: f64, height: f64, margin: Margin) -> Self {
        Self {
            left: margin.left,
            top: margin.top,
            width: (width - margin.left - margin.right).max(0.0),
            height: (height - margin.top - margin.bottom).max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A labelled y-axis tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub y: f64,
}

/// Point positions for a categorical-x, linear-y series.
///
/// x is a point scale over the series index (order-preserving, first and
/// last at the plot edges, a single point centred); y is linear from 0 to
/// the top of the nice tick range.
#[derive(Debug, Clone)]
pub struct CartesianLayout {
    pub plot: PlotArea,
    pub points: Vec<Point>,
    pub ticks: Vec<Tick>,
    pub y_max: f64,
}

/// Number of y-axis ticks, including zero
pub const Y_TICK_COUNT: usize = 5;

impl CartesianLayout {
    pub fn compute(values: &[u64], plot: PlotArea) -> Self {
        let max = values.iter().copied().max().unwrap_or(0) as f64;
        let tick_values = nice_ticks(max, Y_TICK_COUNT);
        let y_max = tick_values.last().copied().unwrap_or(1.0);

        let y_for = |v: f64| plot.bottom() - (v / y_max) * plot.height;

        let n = values.len();
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let x = if n == 1 {
                    plot.left + plot.width / 2.0
                } else {
                    plot.left + plot.width * i as f64 / (n - 1) as f64
                };
                Point::new(x, y_for(v as f64))
            })
            .collect();

        let ticks = tick_values
            .into_iter()
            .map(|value| Tick {
                value,
                y: y_for(value),
            })
            .collect();

        Self {
            plot,
            points,
            ticks,
            y_max,
        }
    }

    /// y coordinate of the zero line
    pub fn baseline(&self) -> f64 {
        self.plot.bottom()
    }
}

/// Evenly spaced ticks from 0 covering `max` with a 1/2/2.5/5 x 10^k step.
pub fn nice_ticks(max: f64, count: usize) -> Vec<f64> {
    let count = count.max(2);
    let intervals = (count - 1) as f64;
    let step = if max > 0.0 && max.is_finite() {
        nice_step(max / intervals)
    } else {
        1.0
    };

    (0..count).map(|i| i as f64 * step).collect()
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 2.5 {
        2.5
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// SVG path data for a monotone cubic curve through `points`.
///
/// Tangents follow the Fritsch-Carlson construction (the same curve d3's
/// `curveMonotoneX` draws): the curve never overshoots between two samples,
/// so a peak in the data is a peak on screen. Points must have increasing x.
pub fn monotone_path(points: &[Point]) -> String {
    match points {
        [] => String::new(),
        [p] => format!("M{},{}", fmt(p.x), fmt(p.y)),
        [a, b] => format!("M{},{}L{},{}", fmt(a.x), fmt(a.y), fmt(b.x), fmt(b.y)),
        _ => {
            let tangents = monotone_tangents(points);
            let mut d = format!("M{},{}", fmt(points[0].x), fmt(points[0].y));
            for k in 0..points.len() - 1 {
                let (p0, p1) = (points[k], points[k + 1]);
                let dx = (p1.x - p0.x) / 3.0;
                d.push_str(&format!(
                    "C{},{},{},{},{},{}",
                    fmt(p0.x + dx),
                    fmt(p0.y + dx * tangents[k]),
                    fmt(p1.x - dx),
                    fmt(p1.y - dx * tangents[k + 1]),
                    fmt(p1.x),
                    fmt(p1.y)
                ));
            }
            d
        }
    }
}

fn monotone_tangents(points: &[Point]) -> Vec<f64> {
    let n = points.len();
    let h: Vec<f64> = points.windows(2).map(|w| w[1].x - w[0].x).collect();
    let s: Vec<f64> = points
        .windows(2)
        .zip(&h)
        .map(|(w, &h)| if h == 0.0 { 0.0 } else { (w[1].y - w[0].y) / h })
        .collect();

    let mut m = vec![0.0; n];
    for k in 1..n - 1 {
        let (h0, h1, s0, s1) = (h[k - 1], h[k], s[k - 1], s[k]);
        if s0 * s1 <= 0.0 {
            continue;
        }
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        m[k] = s0.signum() * s0.abs().min(s1.abs()).min(0.5 * p.abs()) * 2.0;
    }

    // One-sided end tangents
    m[0] = end_tangent(h[0], s[0], m[1]);
    m[n - 1] = end_tangent(h[n - 2], s[n - 2], m[n - 2]);
    m
}

fn end_tangent(h: f64, secant: f64, neighbour: f64) -> f64 {
    if h == 0.0 {
        neighbour
    } else {
        (3.0 * secant - neighbour) / 2.0
    }
}

// ============================================
// Donut (category ring)
// ============================================

/// Angle the first slice starts at (12 o'clock)
pub const DONUT_START_ANGLE: f64 = 90.0;

/// One slice's angular extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DonutSlice {
    pub index: usize,
    /// Fraction of the total, 0.0..=1.0
    pub percent: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub sweep: f64,
    pub mid_angle: f64,
}

/// Slice angles and radii for a donut chart
#[derive(Debug, Clone)]
pub struct DonutLayout {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub slices: Vec<DonutSlice>,
}

impl DonutLayout {
    /// Lay out slices in array order, clockwise from 12 o'clock.
    ///
    /// `padding_deg` is left empty after every non-zero slice; the slices
    /// share what remains of the circle in proportion to their counts.
    pub fn compute(
        counts: &[u64],
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        padding_deg: f64,
    ) -> Self {
        let total: u64 = counts.iter().sum();
        let non_zero = counts.iter().filter(|&&c| c > 0).count();
        let padding = padding_deg.max(0.0);
        let available = (360.0 - padding * non_zero as f64).max(0.0);

        let mut cursor = DONUT_START_ANGLE;
        let slices = counts
            .iter()
            .enumerate()
            .map(|(index, &count)| {
                let percent = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                };
                let sweep = percent * available;
                let start_angle = cursor;
                let end_angle = start_angle - sweep;
                cursor = end_angle - if count > 0 { padding } else { 0.0 };

                DonutSlice {
                    index,
                    percent,
                    start_angle,
                    end_angle,
                    sweep,
                    mid_angle: start_angle - sweep / 2.0,
                }
            })
            .collect();

        Self {
            center,
            inner_radius,
            outer_radius,
            slices,
        }
    }

    /// Marker position for a slice: its mid-angle on the outer edge
    pub fn marker_position(&self, index: usize) -> Option<Point> {
        self.slices
            .get(index)
            .map(|s| polar_to_cartesian(self.center, self.outer_radius, s.mid_angle))
    }

    /// Anchor for a slice label just outside the ring
    pub fn label_position(&self, index: usize, offset: f64) -> Option<Point> {
        self.slices.get(index).map(|s| {
            polar_to_cartesian(self.center, self.outer_radius + offset, s.mid_angle)
        })
    }

    /// SVG path data for the ring segment of one slice
    pub fn slice_path(&self, index: usize) -> Option<String> {
        let slice = self.slices.get(index)?;
        if slice.sweep <= 0.0 {
            return None;
        }

        // A full circle cannot be drawn as one arc; split it in two
        if slice.sweep >= 359.999 {
            let half = slice.start_angle - 180.0;
            return Some(format!(
                "{} {}",
                self.ring_segment(slice.start_angle, half),
                self.ring_segment(half, slice.end_angle)
            ));
        }

        Some(self.ring_segment(slice.start_angle, slice.end_angle))
    }

    fn ring_segment(&self, start: f64, end: f64) -> String {
        let large_arc = if start - end > 180.0 { 1 } else { 0 };
        let (ro, ri) = (self.outer_radius, self.inner_radius);
        let outer_start = polar_to_cartesian(self.center, ro, start);
        let outer_end = polar_to_cartesian(self.center, ro, end);
        let inner_end = polar_to_cartesian(self.center, ri, end);
        let inner_start = polar_to_cartesian(self.center, ri, start);

        // Screen-clockwise is SVG sweep-flag 1
        format!(
            "M{},{}A{},{},0,{},1,{},{}L{},{}A{},{},0,{},0,{},{}Z",
            fmt(outer_start.x),
            fmt(outer_start.y),
            fmt(ro),
            fmt(ro),
            large_arc,
            fmt(outer_end.x),
            fmt(outer_end.y),
            fmt(inner_end.x),
            fmt(inner_end.y),
            fmt(ri),
            fmt(ri),
            large_arc,
            fmt(inner_start.x),
            fmt(inner_start.y)
        )
    }
}

// ============================================
// Radar (engagement)
// ============================================

/// Angle of axis `index` out of `total` axes, starting at 12 o'clock and
/// going clockwise
pub fn radar_angle(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 90.0;
    }
    90.0 - 360.0 * index as f64 / total as f64
}

/// One radar axis with its data vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadarVertex {
    pub index: usize,
    pub angle: f64,
    /// Distance of the data vertex from the centre
    pub radius: f64,
    /// Data vertex, also where the marker goes
    pub point: Point,
    /// End of the axis spoke at the outer radius
    pub axis_end: Point,
}

/// Vertex positions for a radar chart
#[derive(Debug, Clone)]
pub struct RadarLayout {
    pub center: Point,
    pub outer_radius: f64,
    pub max_count: u64,
    pub vertices: Vec<RadarVertex>,
}

impl RadarLayout {
    /// Radius per axis is linear in count / max count (max floored at 1).
    pub fn compute(counts: &[u64], center: Point, outer_radius: f64) -> Self {
        let max_count = counts.iter().copied().max().unwrap_or(0).max(1);
        let total = counts.len();

        let vertices = counts
            .iter()
            .enumerate()
            .map(|(index, &count)| {
                let angle = radar_angle(index, total);
                let radius = outer_radius * count as f64 / max_count as f64;
                RadarVertex {
                    index,
                    angle,
                    radius,
                    point: polar_to_cartesian(center, radius, angle),
                    axis_end: polar_to_cartesian(center, outer_radius, angle),
                }
            })
            .collect();

        Self {
            center,
            outer_radius,
            max_count,
            vertices,
        }
    }

    /// Grid ring at `fraction` of the outer radius, one corner per axis
    pub fn grid_ring(&self, fraction: f64) -> Vec<Point> {
        self.vertices
            .iter()
            .map(|v| polar_to_cartesian(self.center, self.outer_radius * fraction, v.angle))
            .collect()
    }

    /// Anchor for an axis label just outside the outer radius
    pub fn label_position(&self, index: usize, offset: f64) -> Option<Point> {
        self.vertices
            .get(index)
            .map(|v| polar_to_cartesian(self.center, self.outer_radius + offset, v.angle))
    }
}

/// Format a coordinate with at most two decimals
pub fn fmt(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let s = format!("{:.2}", rounded);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_polar_to_cartesian_cardinal_points() {
        let c = Point::new(100.0, 100.0);

        let top = polar_to_cartesian(c, 10.0, 90.0);
        assert!(close(top.x, 100.0) && close(top.y, 90.0));

        let right = polar_to_cartesian(c, 10.0, 0.0);
        assert!(close(right.x, 110.0) && close(right.y, 100.0));

        let bottom = polar_to_cartesian(c, 10.0, -90.0);
        assert!(close(bottom.x, 100.0) && close(bottom.y, 110.0));
    }

    #[test]
    fn test_donut_sweeps_sum_to_full_circle() {
        let layout = DonutLayout::compute(&[3, 1], Point::new(0.0, 0.0), 50.0, 100.0, 0.0);
        let total: f64 = layout.slices.iter().map(|s| s.sweep).sum();
        assert!(close(total, 360.0));

        let a = layout.slices[0];
        assert!(close(a.start_angle, 90.0));
        assert!(close(a.sweep, 270.0));
        assert!(close(a.mid_angle, -45.0));

        let b = layout.slices[1];
        assert!(close(b.start_angle, a.end_angle));
        assert!(close(b.end_angle, -270.0));
    }

    #[test]
    fn test_donut_marker_bisects_slice() {
        let center = Point::new(200.0, 150.0);
        let layout = DonutLayout::compute(&[3, 1], center, 50.0, 100.0, 0.0);

        let marker = layout.marker_position(0).unwrap();
        let expected = polar_to_cartesian(center, 100.0, -45.0);
        assert!(close(marker.x, expected.x) && close(marker.y, expected.y));

        // Lower right of centre on screen
        assert!(marker.x > center.x && marker.y > center.y);
    }

    #[test]
    fn test_donut_padding_keeps_markers_centred() {
        let layout = DonutLayout::compute(&[2, 2, 0, 4], Point::new(0.0, 0.0), 50.0, 100.0, 4.0);
        let sweeps: f64 = layout.slices.iter().map(|s| s.sweep).sum();
        // three non-zero slices, one gap after each
        assert!(close(sweeps, 360.0 - 12.0));

        for s in &layout.slices {
            assert!(close(s.mid_angle, (s.start_angle + s.end_angle) / 2.0));
        }
        assert!(layout.slice_path(2).is_none());
    }

    #[test]
    fn test_donut_zero_total() {
        let layout = DonutLayout::compute(&[0, 0], Point::new(0.0, 0.0), 50.0, 100.0, 0.0);
        assert!(layout.slices.iter().all(|s| s.sweep == 0.0 && s.percent == 0.0));
    }

    #[test]
    fn test_radar_marker_position() {
        // count 10 at index 0 of 4 axes, max 20, outer radius 100
        let center = Point::new(250.0, 200.0);
        let layout = RadarLayout::compute(&[10, 20, 5, 0], center, 100.0);

        let v = layout.vertices[0];
        assert!(close(v.angle, 90.0));
        assert!(close(v.radius, 50.0));
        assert!(close(v.point.x, 250.0));
        assert!(close(v.point.y, 150.0));

        assert_eq!(layout.max_count, 20);
        assert!(close(layout.vertices[1].angle, 0.0));
        assert!(close(layout.vertices[1].radius, 100.0));
        assert!(close(layout.vertices[3].radius, 0.0));
    }

    #[test]
    fn test_radar_angles_for_eight_axes() {
        for i in 0..8 {
            assert!(close(radar_angle(i, 8), 90.0 - 45.0 * i as f64));
        }
    }

    #[test]
    fn test_radar_all_zero_counts() {
        let layout = RadarLayout::compute(&[0, 0, 0], Point::new(0.0, 0.0), 100.0);
        assert_eq!(layout.max_count, 1);
        assert!(layout.vertices.iter().all(|v| v.radius == 0.0));
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(5.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        assert_eq!(nice_ticks(100.0, 5), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(nice_ticks(0.0, 5), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_cartesian_point_scale() {
        let margin = Margin {
            top: 10.0,
            right: 10.0,
            bottom: 10.0,
            left: 10.0,
        };
        let plot = PlotArea::new(120.0, 120.0, margin);
        let layout = CartesianLayout::compute(&[0, 50, 100], plot);

        let xs: Vec<f64> = layout.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![10.0, 60.0, 110.0]);
        assert!(close(layout.points[0].y, layout.baseline()));
        assert!(close(layout.points[2].y, 10.0));

        let single = CartesianLayout::compute(&[3], plot);
        assert!(close(single.points[0].x, 60.0));
    }

    #[test]
    fn test_monotone_path_no_overshoot_on_plateau() {
        let points = vec![
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 10.0),
        ];
        let tangents = monotone_tangents(&points);
        // flat run between two equal samples keeps zero slope at both ends
        assert_eq!(tangents[1], 0.0);
        assert_eq!(tangents[2], 0.0);

        let d = monotone_path(&points);
        assert!(d.starts_with("M0,10C"));
        assert_eq!(d.matches('C').count(), 3);
    }

    #[test]
    fn test_monotone_path_short_inputs() {
        assert_eq!(monotone_path(&[]), "");
        assert_eq!(monotone_path(&[Point::new(1.0, 2.0)]), "M1,2");
        assert_eq!(
            monotone_path(&[Point::new(0.0, 0.0), Point::new(5.5, 2.25)]),
            "M0,0L5.5,2.25"
        );
    }

    #[test]
    fn test_fmt() {
        assert_eq!(fmt(1.0), "1");
        assert_eq!(fmt(1.234), "1.23");
        assert_eq!(fmt(-0.001), "0");
        assert_eq!(fmt(12.5), "12.5");
    }
}
