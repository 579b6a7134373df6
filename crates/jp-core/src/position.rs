use serde::{Deserialize, Serialize};

use crate::constants::{
    BOTTOM_PADDING, NODE_SIZE, PATH_AMPLITUDE, PATH_MARGIN, TOP_PADDING, VERTICAL_SPACING,
};
use crate::day::DayRecord;

/// Design tokens for the serpentine path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub amplitude: f64,
    pub vertical_spacing: f64,
    pub node_size: f64,
    pub margin: f64,
    pub top_padding: f64,
    pub bottom_padding: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            amplitude: PATH_AMPLITUDE,
            vertical_spacing: VERTICAL_SPACING,
            node_size: NODE_SIZE,
            margin: PATH_MARGIN,
            top_padding: TOP_PADDING,
            bottom_padding: BOTTOM_PADDING,
        }
    }
}

impl LayoutConfig {
    pub fn node_radius(&self) -> f64 {
        self.node_size / 2.0
    }

    /// Configured amplitude, shrunk so a node at full swing still fits in `width`.
    pub fn effective_amplitude(&self, width: f64) -> f64 {
        let room = ((width - self.node_size) / 2.0 - self.margin).max(0.0);
        self.amplitude.min(room)
    }

    /// Scrollable height needed for `count` nodes.
    pub fn content_height(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        self.top_padding
            + (count - 1) as f64 * self.vertical_spacing
            + self.node_size
            + self.bottom_padding
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveDirection {
    Left,
    Right,
}

/// A day placed on the path. Recomputed on every layout pass.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct PositionedNode<'a> {
    pub day: &'a DayRecord,
    pub index: usize,
    /// Left edge of the node, never negative.
    pub x: f64,
    /// Top edge of the node.
    pub y: f64,
    pub direction: CurveDirection,
}

impl PositionedNode<'_> {
    pub fn center(&self, radius: f64) -> (f64, f64) {
        (self.x + radius, self.y + radius)
    }
}

/// `sin(index · π/2)`: the exact cycle 0, 1, 0, -1.
pub fn wave(index: usize) -> f64 {
    match index % 4 {
        1 => 1.0,
        3 => -1.0,
        _ => 0.0,
    }
}

/// Place each day on the S-curve, preserving input order.
pub fn position_days<'a>(
    days: &'a [DayRecord],
    width: f64,
    config: &LayoutConfig,
) -> Vec<PositionedNode<'a>> {
    let amplitude = config.effective_amplitude(width);
    let center_x = width / 2.0;
    let half_node = config.node_size / 2.0;

    days.iter()
        .enumerate()
        .map(|(i, day)| {
            let w = wave(i);
            PositionedNode {
                day,
                index: i,
                x: (center_x + w * amplitude - half_node).max(0.0),
                y: config.top_padding + i as f64 * config.vertical_spacing,
                direction: if w >= 0.0 {
                    CurveDirection::Right
                } else {
                    CurveDirection::Left
                },
            }
        })
        .collect()
}
