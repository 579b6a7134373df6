//! Connector curve threaded through node centres.
//!
//! Each pair of consecutive nodes is joined by one quadratic Bézier segment
//! whose control point sits at the previous centre's x and halfway down in y,
//! so the line leaves each node vertically and swings toward the next.

use std::fmt::Write;

use serde::Serialize;

use crate::position::PositionedNode;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct QuadSegment {
    pub from: Point,
    pub control: Point,
    pub to: Point,
}

/// A continuous chain of quadratic segments. Empty when built from fewer than two nodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ConnectorPath {
    start: Option<Point>,
    segments: Vec<QuadSegment>,
}

impl ConnectorPath {
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn segments(&self) -> &[QuadSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// SVG path data: `M x y` followed by one `Q cx cy x y` per segment.
    pub fn to_svg_path(&self) -> String {
        let Some(start) = self.start.filter(|_| !self.segments.is_empty()) else {
            return String::new();
        };
        let mut out = String::with_capacity(16 + self.segments.len() * 32);
        let _ = write!(out, "M {} {}", fmt_coord(start.x), fmt_coord(start.y));
        for seg in &self.segments {
            let _ = write!(
                out,
                " Q {} {} {} {}",
                fmt_coord(seg.control.x),
                fmt_coord(seg.control.y),
                fmt_coord(seg.to.x),
                fmt_coord(seg.to.y)
            );
        }
        out
    }
}

/// Format a coordinate with at most two decimals and no trailing zeros.
fn fmt_coord(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Build the connector through `nodes` in the order given.
pub fn build_connector(nodes: &[PositionedNode<'_>], node_radius: f64) -> ConnectorPath {
    if nodes.len() < 2 {
        return ConnectorPath::default();
    }

    let centers: Vec<Point> = nodes
        .iter()
        .map(|n| {
            let (x, y) = n.center(node_radius);
            Point::new(x, y)
        })
        .collect();

    let segments = centers
        .windows(2)
        .map(|pair| {
            let (prev, cur) = (pair[0], pair[1]);
            QuadSegment {
                from: prev,
                control: Point::new(prev.x, (prev.y + cur.y) / 2.0),
                to: cur,
            }
        })
        .collect();

    ConnectorPath {
        start: Some(centers[0]),
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::{DayRecord, DayStatus};
    use crate::position::{LayoutConfig, position_days};
    use crate::time::CivilDate;

    fn days(n: u32) -> Vec<DayRecord> {
        let date = CivilDate::new(2026, 1, 1).unwrap();
        (1..=n)
            .map(|d| DayRecord::new(format!("d{d}"), d, date.add_days(d as i64), DayStatus::Logged))
            .collect()
    }

    #[test]
    fn test_fewer_than_two_nodes_is_empty() {
        let config = LayoutConfig::default();
        for n in 0..2 {
            let days = days(n);
            let nodes = position_days(&days, 400.0, &config);
            let path = build_connector(&nodes, config.node_radius());
            assert!(path.is_empty());
            assert_eq!(path.start(), None);
            assert_eq!(path.to_svg_path(), "");
        }
    }

    #[test]
    fn test_segment_count_and_continuity() {
        let config = LayoutConfig::default();
        let days = days(9);
        let nodes = position_days(&days, 400.0, &config);
        let path = build_connector(&nodes, config.node_radius());

        assert_eq!(path.segments().len(), 8);
        assert_eq!(path.start(), Some(path.segments()[0].from));
        for pair in path.segments().windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
    }

    #[test]
    fn test_endpoints_are_node_centers() {
        let config = LayoutConfig::default();
        let days = days(3);
        let nodes = position_days(&days, 400.0, &config);
        let r = config.node_radius();
        let path = build_connector(&nodes, r);

        for (seg, node) in path.segments().iter().zip(nodes.iter().skip(1)) {
            let (cx, cy) = node.center(r);
            assert_eq!(seg.to, Point::new(cx, cy));
        }
    }

    #[test]
    fn test_control_point_rule() {
        let config = LayoutConfig::default();
        let days = days(2);
        let nodes = position_days(&days, 400.0, &config);
        let path = build_connector(&nodes, config.node_radius());
        let seg = path.segments()[0];
        assert_eq!(seg.control.x, seg.from.x);
        assert_eq!(seg.control.y, (seg.from.y + seg.to.y) / 2.0);
    }

    #[test]
    fn test_svg_path_text() {
        let config = LayoutConfig::default();
        let days = days(2);
        let nodes = position_days(&days, 400.0, &config);
        let path = build_connector(&nodes, config.node_radius());
        // centres: (200, 76) then (290, 186); control (200, 131)
        assert_eq!(path.to_svg_path(), "M 200 76 Q 200 131 290 186");
    }

    #[test]
    fn test_fmt_coord() {
        assert_eq!(fmt_coord(12.5), "12.5");
        assert_eq!(fmt_coord(3.0), "3");
        assert_eq!(fmt_coord(-0.001), "0");
        assert_eq!(fmt_coord(1.239), "1.24");
    }
}
