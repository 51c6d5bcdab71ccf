//! Human-readable relative and absolute time strings.
//!
//! Two relative formats exist: elapsed time for record timestamps in the past
//! ("5 minutes ago") and remaining time for warnings with an end time
//! ("3 hr remaining"). Both take the current time as a parameter and never
//! read the clock themselves, so output is deterministic for a given pair of
//! instants.
//!
//! Unit selection compares floored counts with strict `<`; nothing is rounded.

use chrono::{DateTime, Utc};

const MS_PER_MINUTE: i64 = 60 * 1000;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MINUTES_PER_HOUR: i64 = 60;
const HOURS_PER_DAY: i64 = 24;

/// Display format for a single instant, e.g. `Oct 18, 3:04 PM`.
const WINDOW_FORMAT: &str = "%b %-d, %-I:%M %p";

/// Formats how long ago `timestamp` was, relative to `now`.
///
/// - under 1 minute: `"Just now"`
/// - under 60 minutes: `"{n} minutes ago"`
/// - under 24 hours: `"{n} hours ago"`
/// - otherwise: `"{n} days ago"`
///
/// Counts are floored. A timestamp after `now` yields a negative minute count
/// and therefore `"Just now"`.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use reliefboard::domain::time::format_elapsed;
///
/// let now = Utc::now();
/// assert_eq!(format_elapsed(now - Duration::seconds(90), now), "1 minutes ago");
/// assert_eq!(format_elapsed(now - Duration::hours(50), now), "2 days ago");
/// ```
#[must_use]
pub fn format_elapsed(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (now - timestamp).num_milliseconds();
    let minutes = diff_ms.div_euclid(MS_PER_MINUTE);

    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < MINUTES_PER_HOUR {
        return format!("{minutes} minutes ago");
    }

    let hours = minutes.div_euclid(MINUTES_PER_HOUR);
    if hours < HOURS_PER_DAY {
        return format!("{hours} hours ago");
    }

    let days = hours.div_euclid(HOURS_PER_DAY);
    format!("{days} days ago")
}

/// Formats how long remains until `end_time`.
///
/// - no end time: `"Ongoing"`
/// - end time at or before `now`: `"Ended"`
/// - under 1 hour: `"{n} min remaining"`
/// - under 24 hours: `"{n} hr remaining"`
/// - otherwise: `"{n} days remaining"`
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use reliefboard::domain::time::format_remaining;
///
/// let now = Utc::now();
/// assert_eq!(format_remaining(Some(now + Duration::minutes(30)), now), "30 min remaining");
/// assert_eq!(format_remaining(Some(now - Duration::minutes(1)), now), "Ended");
/// assert_eq!(format_remaining(None, now), "Ongoing");
/// ```
#[must_use]
pub fn format_remaining(end_time: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(end_time) = end_time else {
        return "Ongoing".to_string();
    };

    let diff_ms = (end_time - now).num_milliseconds();
    if diff_ms <= 0 {
        return "Ended".to_string();
    }

    let hours = diff_ms.div_euclid(MS_PER_HOUR);
    if hours < 1 {
        let minutes = diff_ms.div_euclid(MS_PER_MINUTE);
        return format!("{minutes} min remaining");
    }
    if hours < HOURS_PER_DAY {
        return format!("{hours} hr remaining");
    }

    let days = hours.div_euclid(HOURS_PER_DAY);
    format!("{days} days remaining")
}

/// Formats a warning's active window, e.g.
/// `Oct 18, 3:04 PM - Oct 19, 3:04 AM`, or only the start when open-ended.
///
/// Times are rendered in UTC.
///
/// # Parameters
///
/// * `start` - When the warning takes effect
/// * `end` - When it lifts, or `None` for an open-ended warning
#[must_use]
pub fn format_window(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> String {
    let start_text = start.format(WINDOW_FORMAT).to_string();
    end.map_or_else(
        || start_text.clone(),
        |end| format!("{start_text} - {}", end.format(WINDOW_FORMAT)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 18, 15, 4, 0).unwrap()
    }

    #[test]
    fn test_elapsed_just_now() {
        assert_eq!(format_elapsed(now(), now()), "Just now");
        assert_eq!(format_elapsed(now() - Duration::seconds(59), now()), "Just now");
    }

    #[test]
    fn test_elapsed_minutes_are_floored() {
        assert_eq!(format_elapsed(now() - Duration::seconds(90), now()), "1 minutes ago");
        assert_eq!(format_elapsed(now() - Duration::seconds(3599), now()), "59 minutes ago");
    }

    #[test]
    fn test_elapsed_hour_boundary() {
        assert_eq!(format_elapsed(now() - Duration::minutes(60), now()), "1 hours ago");
        assert_eq!(format_elapsed(now() - Duration::hours(3), now()), "3 hours ago");
        assert_eq!(
            format_elapsed(now() - Duration::minutes(24 * 60 - 1), now()),
            "23 hours ago"
        );
    }

    #[test]
    fn test_elapsed_days() {
        assert_eq!(format_elapsed(now() - Duration::hours(24), now()), "1 days ago");
        assert_eq!(format_elapsed(now() - Duration::hours(50), now()), "2 days ago");
    }

    #[test]
    fn test_elapsed_future_timestamp_is_just_now() {
        assert_eq!(format_elapsed(now() + Duration::hours(2), now()), "Just now");
    }

    #[test]
    fn test_remaining_without_end_is_ongoing() {
        assert_eq!(format_remaining(None, now()), "Ongoing");
    }

    #[test]
    fn test_remaining_ended() {
        assert_eq!(format_remaining(Some(now()), now()), "Ended");
        assert_eq!(format_remaining(Some(now() - Duration::minutes(1)), now()), "Ended");
    }

    #[test]
    fn test_remaining_minutes() {
        assert_eq!(
            format_remaining(Some(now() + Duration::minutes(30)), now()),
            "30 min remaining"
        );
        assert_eq!(
            format_remaining(Some(now() + Duration::seconds(30)), now()),
            "0 min remaining"
        );
    }

    #[test]
    fn test_remaining_hours_and_days() {
        assert_eq!(
            format_remaining(Some(now() + Duration::hours(12)), now()),
            "12 hr remaining"
        );
        assert_eq!(
            format_remaining(Some(now() + Duration::hours(24)), now()),
            "1 days remaining"
        );
        assert_eq!(
            format_remaining(Some(now() + Duration::hours(71)), now()),
            "2 days remaining"
        );
    }

    #[test]
    fn test_window_formatting() {
        let start = now();
        assert_eq!(format_window(start, None), "Oct 18, 3:04 PM");
        assert_eq!(
            format_window(start, Some(start + Duration::hours(12))),
            "Oct 18, 3:04 PM - Oct 19, 3:04 AM"
        );
    }
}
