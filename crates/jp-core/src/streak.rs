use serde::Serialize;

use crate::day::{DayRecord, DayStatus, is_milestone_day_with};

/// Current streak: consecutive active days counted back from the most recent.
///
/// Walks days by descending `day_number`. `Logged` and `Today` count, `Missed`
/// ends the walk, `Locked` is skipped without ending it. Input order does not
/// matter and the slice is left untouched.
pub fn current_streak(days: &[DayRecord]) -> u32 {
    let mut ordered: Vec<&DayRecord> = days.iter().collect();
    ordered.sort_by(|a, b| b.day_number.cmp(&a.day_number));

    let mut streak = 0;
    for day in ordered {
        match day.status {
            s if s.is_active() => streak += 1,
            DayStatus::Missed => break,
            _ => {}
        }
    }
    streak
}

/// Longest run anywhere in the timeline, using the same count/break/skip rule.
pub fn longest_streak(days: &[DayRecord]) -> u32 {
    let mut ordered: Vec<&DayRecord> = days.iter().collect();
    ordered.sort_by_key(|d| d.day_number);

    let mut best = 0;
    let mut run = 0;
    for day in ordered {
        match day.status {
            s if s.is_active() => {
                run += 1;
                best = best.max(run);
            }
            DayStatus::Missed => run = 0,
            _ => {}
        }
    }
    best
}

/// Summary numbers shown alongside the path.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyStats {
    pub total: u32,
    pub logged: u32,
    pub missed: u32,
    /// `Today` plus `Locked` days still ahead.
    pub remaining: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Milestone days already logged.
    pub milestones_reached: u32,
    /// Logged days over total, in [0, 1].
    pub completion: f64,
}

impl JourneyStats {
    pub fn compute(days: &[DayRecord], milestone_frequency: u32) -> Self {
        let mut logged = 0;
        let mut missed = 0;
        let mut remaining = 0;
        let mut milestones_reached = 0;

        for day in days {
            match day.status {
                DayStatus::Logged => {
                    logged += 1;
                    if is_milestone_day_with(day.day_number, milestone_frequency) {
                        milestones_reached += 1;
                    }
                }
                DayStatus::Missed => missed += 1,
                DayStatus::Today | DayStatus::Locked => remaining += 1,
            }
        }

        let total = days.len() as u32;
        let completion = if total == 0 {
            0.0
        } else {
            logged as f64 / total as f64
        };

        Self {
            total,
            logged,
            missed,
            remaining,
            current_streak: current_streak(days),
            longest_streak: longest_streak(days),
            milestones_reached,
            completion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MILESTONE_FREQUENCY;
    use crate::day::DayStatus::*;
    use crate::time::CivilDate;

    fn seq(statuses: &[(u32, DayStatus)]) -> Vec<DayRecord> {
        let start = CivilDate::new(2026, 1, 1).unwrap();
        statuses
            .iter()
            .map(|&(n, s)| DayRecord::new(format!("d{n}"), n, start.add_days(n as i64 - 1), s))
            .collect()
    }

    #[test]
    fn test_all_logged() {
        let days = seq(&[(3, Logged), (2, Logged), (1, Logged)]);
        assert_eq!(current_streak(&days), 3);
    }

    #[test]
    fn test_latest_missed() {
        let days = seq(&[(3, Missed), (2, Logged), (1, Logged)]);
        assert_eq!(current_streak(&days), 0);
    }

    #[test]
    fn test_locked_skipped_missed_breaks() {
        let days = seq(&[(5, Locked), (4, Today), (3, Logged), (2, Missed), (1, Logged)]);
        assert_eq!(current_streak(&days), 2);
    }

    #[test]
    fn test_empty() {
        assert_eq!(current_streak(&[]), 0);
        assert_eq!(longest_streak(&[]), 0);
    }

    #[test]
    fn test_only_locked() {
        let days = seq(&[(1, Locked), (2, Locked), (3, Locked)]);
        assert_eq!(current_streak(&days), 0);
    }

    #[test]
    fn test_input_order_irrelevant_and_untouched() {
        let days = seq(&[(1, Logged), (4, Today), (2, Missed), (5, Locked), (3, Logged)]);
        let before = days.clone();
        assert_eq!(current_streak(&days), 2);
        assert_eq!(days, before);
    }

    #[test]
    fn test_locked_between_logged_does_not_break() {
        let days = seq(&[(1, Logged), (2, Locked), (3, Logged)]);
        assert_eq!(current_streak(&days), 2);
    }

    #[test]
    fn test_longest_streak() {
        let days = seq(&[
            (1, Logged),
            (2, Logged),
            (3, Logged),
            (4, Missed),
            (5, Logged),
            (6, Today),
            (7, Locked),
        ]);
        assert_eq!(longest_streak(&days), 3);
        assert_eq!(current_streak(&days), 2);
    }

    #[test]
    fn test_stats() {
        let mut statuses: Vec<(u32, DayStatus)> = (1..=7).map(|n| (n, Logged)).collect();
        statuses.push((8, Missed));
        statuses.push((9, Today));
        statuses.push((10, Locked));
        let days = seq(&statuses);

        let stats = JourneyStats::compute(&days, MILESTONE_FREQUENCY);
        assert_eq!(stats.total, 10);
        assert_eq!(stats.logged, 7);
        assert_eq!(stats.missed, 1);
        assert_eq!(stats.remaining, 2);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 7);
        assert_eq!(stats.milestones_reached, 1);
        assert!((stats.completion - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_stats_empty() {
        let stats = JourneyStats::compute(&[], MILESTONE_FREQUENCY);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion, 0.0);
    }
}
