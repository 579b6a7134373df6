//! JSON snapshot format for moving a user's journey between data services.
//!
//! Field names are camelCase. The version string is `MAJOR.MINOR`; readers
//! accept any minor revision of the major version they know.

use serde::{Deserialize, Serialize};

use crate::day::DayRecord;
use crate::theme::ContentRecord;
use crate::time::CivilDate;

pub const CURRENT_VERSION: &str = "1.0";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: String,
    pub exported_at: CivilDate,
    pub user_id: String,
    #[serde(default)]
    pub days: Vec<DayRecord>,
    #[serde(default)]
    pub content: Vec<ContentRecord>,
}

#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
    UnsupportedVersion(String),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Json(e) => write!(f, "invalid snapshot JSON: {e}"),
            SnapshotError::UnsupportedVersion(v) => {
                write!(f, "unsupported snapshot version {v:?} (expected {CURRENT_VERSION})")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Json(e)
    }
}

impl Snapshot {
    pub fn new(user_id: &str, days: Vec<DayRecord>, content: Vec<ContentRecord>) -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            exported_at: CivilDate::today_utc(),
            user_id: user_id.to_string(),
            days,
            content,
        }
    }
}

fn major(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}

pub fn export_snapshot(snapshot: &Snapshot) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn import_snapshot(json: &str) -> Result<Snapshot, SnapshotError> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    if major(&snapshot.version) != major(CURRENT_VERSION) {
        return Err(SnapshotError::UnsupportedVersion(snapshot.version));
    }
    Ok(snapshot)
}
