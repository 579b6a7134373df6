/// Every Nth day is a milestone.
pub const MILESTONE_FREQUENCY: u32 = 7;

/// Default journey length in days.
pub const DEFAULT_JOURNEY_LENGTH: u32 = 40;

/// Maximum horizontal swing of the path, before clamping to the layout width.
pub const PATH_AMPLITUDE: f64 = 90.0;

/// Vertical distance between consecutive node tops.
pub const VERTICAL_SPACING: f64 = 110.0;

/// Node diameter.
pub const NODE_SIZE: f64 = 72.0;

/// Horizontal breathing room kept between a node and the layout edge.
pub const PATH_MARGIN: f64 = 24.0;

/// Space above the first node.
pub const TOP_PADDING: f64 = 40.0;

/// Space below the last node.
pub const BOTTOM_PADDING: f64 = 120.0;
