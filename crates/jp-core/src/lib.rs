//! Journey path layout engine.
//!
//! Places a user's numbered days along a serpentine path, threads a smooth
//! connector through them, reduces their statuses to streak numbers, and sorts
//! content items into theme buckets.
//!
//! Zero I/O: every function is pure and returns fresh values.

pub mod connector;
pub mod constants;
pub mod day;
pub mod journey;
pub mod position;
pub mod snapshot;
pub mod streak;
pub mod theme;
pub mod time;
pub mod timeline;

pub use connector::{ConnectorPath, Point, QuadSegment, build_connector};
pub use constants::{DEFAULT_JOURNEY_LENGTH, MILESTONE_FREQUENCY};
pub use day::{DayRecord, DayStatus, is_milestone_day, is_milestone_day_with, next_milestone};
pub use journey::{JourneyLayout, layout_journey};
pub use position::{CurveDirection, LayoutConfig, PositionedNode, position_days};
pub use snapshot::{CURRENT_VERSION, Snapshot, SnapshotError, export_snapshot, import_snapshot};
pub use streak::{JourneyStats, current_streak, longest_streak};
pub use theme::{Category, ContentRecord, THEMES, ThemeId, ThemeMeta, classify, classify_parts};
pub use time::{CivilDate, DateParseError};
pub use timeline::build_timeline;
