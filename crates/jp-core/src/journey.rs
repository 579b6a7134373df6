use serde::Serialize;

use crate::connector::{ConnectorPath, build_connector};
use crate::day::DayRecord;
use crate::position::{LayoutConfig, PositionedNode, position_days};
use crate::streak::current_streak;

/// Everything a renderer needs to draw one journey screen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyLayout<'a> {
    pub nodes: Vec<PositionedNode<'a>>,
    pub connector: ConnectorPath,
    /// SVG path data for `connector`.
    pub path: String,
    pub streak: u32,
    pub width: f64,
    pub height: f64,
}

/// Position the days, thread the connector and count the streak.
pub fn layout_journey<'a>(
    days: &'a [DayRecord],
    width: f64,
    config: &LayoutConfig,
) -> JourneyLayout<'a> {
    let nodes = position_days(days, width, config);
    let connector = build_connector(&nodes, config.node_radius());
    let path = connector.to_svg_path();

    JourneyLayout {
        height: config.content_height(nodes.len()),
        nodes,
        path,
        connector,
        streak: current_streak(days),
        width,
    }
}
