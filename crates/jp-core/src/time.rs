//! Lightweight calendar dates (no chrono dependency).
//!
//! Uses Howard Hinnant's civil_from_days / days_from_civil algorithms for
//! conversions between `YYYY-MM-DD` dates and Unix epoch days.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap());

/// A proleptic Gregorian calendar date, serialized as `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// Not shaped like `YYYY-MM-DD`.
    Format(String),
    /// Shaped correctly but names a day that does not exist.
    OutOfRange(String),
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateParseError::Format(s) => write!(f, "expected YYYY-MM-DD, got {s:?}"),
            DateParseError::OutOfRange(s) => write!(f, "no such calendar day: {s}"),
        }
    }
}

impl std::error::Error for DateParseError {}

impl CivilDate {
    /// Build a date, rejecting impossible month/day combinations.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Days since 1970-01-01 (negative before the epoch).
    pub fn to_epoch_days(self) -> i64 {
        days_from_civil(self.year as i64, self.month as u64, self.day as u64)
    }

    pub fn from_epoch_days(days: i64) -> Self {
        let (y, m, d) = civil_from_days(days);
        Self {
            year: y as i32,
            month: m as u32,
            day: d as u32,
        }
    }

    pub fn add_days(self, n: i64) -> Self {
        Self::from_epoch_days(self.to_epoch_days() + n)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(self, other: Self) -> i64 {
        other.to_epoch_days() - self.to_epoch_days()
    }

    /// Current UTC calendar date.
    pub fn today_utc() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self::from_epoch_days((secs / 86400) as i64)
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CivilDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = ISO_DATE
            .captures(s.trim())
            .ok_or_else(|| DateParseError::Format(s.to_string()))?;
        let year: i32 = caps[1].parse().map_err(|_| DateParseError::Format(s.to_string()))?;
        let month: u32 = caps[2].parse().map_err(|_| DateParseError::Format(s.to_string()))?;
        let day: u32 = caps[3].parse().map_err(|_| DateParseError::Format(s.to_string()))?;
        Self::new(year, month, day).ok_or_else(|| DateParseError::OutOfRange(s.to_string()))
    }
}

impl Serialize for CivilDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CivilDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Howard Hinnant's civil_from_days: Unix epoch days → (year, month, day).
fn civil_from_days(days: i64) -> (i64, u64, u64) {
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

/// Inverse of `civil_from_days`.
fn days_from_civil(y: i64, m: u64, d: u64) -> i64 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as u64;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe as i64 - 719468
}
