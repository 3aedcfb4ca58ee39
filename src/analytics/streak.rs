//! Consecutive-day streaks.
//!
//! Timestamps are reduced to calendar days in the time zone of the reference
//! instant before anything is counted, so several entries on one day count once.

use crate::models::LogEntry;
use chrono::{DateTime, NaiveDate, TimeZone};
use std::collections::BTreeSet;

/// Unique calendar days with at least one entry, ascending.
pub fn active_days<Tz: TimeZone>(entries: &[LogEntry], tz: &Tz) -> BTreeSet<NaiveDate> {
    entries.iter().map(|e| e.created_on(tz)).collect()
}

/// True when at least one entry falls on the calendar day of `now`.
pub fn logged_today<Tz: TimeZone>(entries: &[LogEntry], now: &DateTime<Tz>) -> bool {
    let tz = now.timezone();
    let today = now.date_naive();
    entries.iter().any(|e| e.created_on(&tz) == today)
}

/// Length of the streak that is still alive at `now`.
///
/// The streak is anchored on today, or on yesterday when nothing has been
/// logged yet today; with neither the streak is 0. From the anchor it counts
/// backward until the first day without entries.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use til_insights::analytics::current_streak;
/// use til_insights::models::LogEntry;
///
/// let now = Utc.with_ymd_and_hms(2024, 6, 15, 18, 0, 0).unwrap();
/// let entries = vec![
///     LogEntry::new("a", "x", "2024-06-14T09:00:00Z"),
///     LogEntry::new("b", "y", "2024-06-13T09:00:00Z"),
/// ];
/// assert_eq!(current_streak(&entries, &now), 2);
/// ```
pub fn current_streak<Tz: TimeZone>(entries: &[LogEntry], now: &DateTime<Tz>) -> u32 {
    let days = active_days(entries, &now.timezone());
    let today = now.date_naive();

    let anchor = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    let mut cursor = Some(anchor);
    while let Some(day) = cursor.filter(|d| days.contains(d)) {
        streak += 1;
        cursor = day.pred_opt();
    }
    streak
}

/// Longest run of consecutive active days anywhere in the history.
pub fn longest_streak<Tz: TimeZone>(entries: &[LogEntry], tz: &Tz) -> u32 {
    let days = active_days(entries, tz);

    let mut longest = 0;
    let mut running = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in days {
        running = match previous.and_then(|p| p.succ_opt()) {
            Some(expected) if expected == day => running + 1,
            _ => 1,
        };
        longest = longest.max(running);
        previous = Some(day);
    }

    longest
}
