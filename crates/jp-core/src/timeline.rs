use std::collections::HashMap;

use crate::day::{DayRecord, DayStatus};
use crate::time::CivilDate;

/// Derive a contiguous day sequence for one user.
///
/// Day 1 falls on `start`. Days before `today` are `Logged` when `logs` has an
/// entry for their date and `Missed` otherwise; the day on `today` is `Logged`
/// or `Today`; later days are `Locked`. `logs` maps a date to its optional photo
/// reference. A `today` before `start` locks the whole journey.
pub fn build_timeline(
    user_id: &str,
    start: CivilDate,
    today: CivilDate,
    length: u32,
    logs: &HashMap<CivilDate, Option<String>>,
) -> Vec<DayRecord> {
    let elapsed = start.days_until(today);

    (1..=length)
        .map(|day_number| {
            let offset = (day_number - 1) as i64;
            let date = start.add_days(offset);
            let logged = logs.get(&date);

            let status = match (offset.cmp(&elapsed), logged) {
                (std::cmp::Ordering::Greater, _) => DayStatus::Locked,
                (_, Some(_)) => DayStatus::Logged,
                (std::cmp::Ordering::Equal, None) => DayStatus::Today,
                (std::cmp::Ordering::Less, None) => DayStatus::Missed,
            };

            let mut record = DayRecord::new(
                format!("{user_id}-day-{day_number}"),
                day_number,
                date,
                status,
            );
            if status == DayStatus::Logged {
                record.photo_ref = logged.cloned().flatten();
            }
            record
        })
        .collect()
}
