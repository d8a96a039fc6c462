//! Booking length arithmetic and the human-readable summary shown under the
//! picker.

use crate::time::TimeOfDay;

/// Length of `[start, end)` in minutes, or `None` unless `start < end`.
pub fn duration_minutes(start: TimeOfDay, end: TimeOfDay) -> Option<u16> {
    start.minutes_until(end)
}

/// Initial end time when editing an existing booking of `duration` minutes.
///
/// Returns `None` when the booking would run past `24:00`.
pub fn end_after(start: TimeOfDay, duration: u32) -> Option<TimeOfDay> {
    if duration == 0 {
        return None;
    }
    start.checked_add_minutes(duration)
}

/// Format a duration as English text.
///
/// ```
/// use slot_engine::format_duration;
///
/// assert_eq!(format_duration(45), "45 minutes");
/// assert_eq!(format_duration(60), "1 hour");
/// assert_eq!(format_duration(150), "2 hours and 30 minutes");
/// ```
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest == 0 {
        plural(hours, "hour")
    } else {
        format!("{} and {}", plural(hours, "hour"), plural(rest, "minute"))
    }
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("{} {}", n, unit)
    } else {
        format!("{} {}s", n, unit)
    }
}
