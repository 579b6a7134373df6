use serde::{Deserialize, Serialize};

use crate::constants::MILESTONE_FREQUENCY;
use crate::time::CivilDate;

/// Completion state of one day on the journey.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Logged,
    Missed,
    Today,
    Locked,
}

impl DayStatus {
    /// Counts toward a streak.
    pub fn is_active(self) -> bool {
        matches!(self, DayStatus::Logged | DayStatus::Today)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayStatus::Logged => "logged",
            DayStatus::Missed => "missed",
            DayStatus::Today => "today",
            DayStatus::Locked => "locked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "logged" => Some(DayStatus::Logged),
            "missed" => Some(DayStatus::Missed),
            "today" => Some(DayStatus::Today),
            "locked" => Some(DayStatus::Locked),
            _ => None,
        }
    }
}

/// One entry in a user's daily timeline.
///
/// Within one sequence day numbers are contiguous from 1, at most one record is
/// `Today`, and `Locked` records come after every other status. Those
/// invariants belong to whoever produced the sequence; nothing in this crate
/// checks them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub id: String,
    pub day_number: u32,
    pub date: CivilDate,
    pub status: DayStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_ref: Option<String>,
}

impl DayRecord {
    pub fn new(id: impl Into<String>, day_number: u32, date: CivilDate, status: DayStatus) -> Self {
        Self {
            id: id.into(),
            day_number,
            date,
            status,
            photo_ref: None,
        }
    }

    pub fn with_photo(mut self, photo_ref: impl Into<String>) -> Self {
        self.photo_ref = Some(photo_ref.into());
        self
    }

    pub fn is_milestone(&self) -> bool {
        is_milestone_day(self.day_number)
    }
}

/// True for positive multiples of [`MILESTONE_FREQUENCY`].
pub fn is_milestone_day(day_number: u32) -> bool {
    is_milestone_day_with(day_number, MILESTONE_FREQUENCY)
}

/// Milestone check with an explicit frequency. A zero frequency has no milestones.
pub fn is_milestone_day_with(day_number: u32, frequency: u32) -> bool {
    frequency > 0 && day_number > 0 && day_number % frequency == 0
}

/// The first milestone strictly after `day_number`.
pub fn next_milestone(day_number: u32, frequency: u32) -> Option<u32> {
    if frequency == 0 {
        return None;
    }
    (day_number / frequency + 1).checked_mul(frequency)
}
