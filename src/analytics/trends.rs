//! Time-bucketed activity.
//!
//! Calendar buckets are half-open ranges of local dates, `[start, end)`, derived
//! from the reference instant alone. Every bucket is reported, including the
//! empty ones, oldest first. Rolling windows (`this week`, `last week`) are
//! measured in exact 24-hour days back from the reference instant instead.

use crate::constants::{MILLIS_PER_DAY, WEEKDAY_NAMES};
use crate::models::LogEntry;
use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, TimeZone, Utc, Weekday};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Weekdays indexed the way the distribution is reported (Sunday = 0).
const WEEKDAYS_FROM_SUNDAY: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Entries on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub day: NaiveDate,
    pub count: usize,
}

/// Entries in one seven-day bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekCount {
    /// `W1` for the oldest bucket up to `Wn` for the current one.
    pub label: String,
    pub start: NaiveDate,
    /// Exclusive.
    pub end: NaiveDate,
    pub count: usize,
}

/// Entries in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    /// Full month name, e.g. `June`.
    pub month: String,
    pub year: i32,
    pub start: NaiveDate,
    pub count: usize,
}

/// Entries on one weekday, across all time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayCount {
    pub day: String,
    pub count: usize,
}

fn entry_days<Tz: TimeZone>(entries: &[LogEntry], tz: &Tz) -> Vec<NaiveDate> {
    entries.iter().map(|e| e.created_on(tz)).collect()
}

fn count_between(days: &[NaiveDate], start: NaiveDate, end: NaiveDate) -> usize {
    days.iter().filter(|d| **d >= start && **d < end).count()
}

/// Daily counts for the `window_days` days ending today.
pub fn daily_activity<Tz: TimeZone>(
    entries: &[LogEntry],
    window_days: u32,
    now: &DateTime<Tz>,
) -> Vec<DayCount> {
    let days = entry_days(entries, &now.timezone());
    let today = now.date_naive();

    (0..window_days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .filter_map(|day| {
            let next = day.succ_opt()?;
            Some(DayCount {
                day,
                count: count_between(&days, day, next),
            })
        })
        .collect()
}

/// Counts for `week_count` consecutive seven-day buckets, the last one ending today.
///
/// Bucket `i` (0 = current) covers `[today - 6 - 7i, today + 1 - 7i)`.
pub fn weekly_activity<Tz: TimeZone>(
    entries: &[LogEntry],
    week_count: u32,
    now: &DateTime<Tz>,
) -> Vec<WeekCount> {
    let days = entry_days(entries, &now.timezone());
    let Some(tomorrow) = now.date_naive().succ_opt() else {
        return Vec::new();
    };

    (0..week_count)
        .rev()
        .filter_map(|i| {
            let end = tomorrow.checked_sub_days(Days::new(7 * u64::from(i)))?;
            let start = end.checked_sub_days(Days::new(7))?;
            Some(WeekCount {
                label: format!("W{}", week_count - i),
                start,
                end,
                count: count_between(&days, start, end),
            })
        })
        .collect()
}

/// Counts for the `month_count` calendar months ending with the current one.
pub fn monthly_activity<Tz: TimeZone>(
    entries: &[LogEntry],
    month_count: u32,
    now: &DateTime<Tz>,
) -> Vec<MonthCount> {
    let days = entry_days(entries, &now.timezone());
    let Some(this_month) = now.date_naive().with_day(1) else {
        return Vec::new();
    };

    (0..month_count)
        .rev()
        .filter_map(|i| {
            let start = this_month.checked_sub_months(Months::new(i))?;
            let end = start.checked_add_months(Months::new(1))?;
            Some(MonthCount {
                month: start.format("%B").to_string(),
                year: start.year(),
                start,
                count: count_between(&days, start, end),
            })
        })
        .collect()
}

/// Histogram of entries per weekday, Sunday = 0 .. Saturday = 6.
pub fn weekday_histogram<Tz: TimeZone>(entries: &[LogEntry], tz: &Tz) -> [usize; 7] {
    let mut histogram = [0usize; 7];
    for day in entry_days(entries, tz) {
        histogram[day.weekday().num_days_from_sunday() as usize] += 1;
    }
    histogram
}

/// Weekday histogram with day names, Sunday first.
pub fn weekday_distribution<Tz: TimeZone>(entries: &[LogEntry], tz: &Tz) -> Vec<WeekdayCount> {
    weekday_histogram(entries, tz)
        .iter()
        .zip(WEEKDAY_NAMES)
        .map(|(count, name)| WeekdayCount {
            day: name.to_string(),
            count: *count,
        })
        .collect()
}

/// Weekday with the fewest entries. Ties go to the earliest day in the
/// Sunday-first order, so an empty history yields Sunday.
pub fn least_active_weekday<Tz: TimeZone>(entries: &[LogEntry], tz: &Tz) -> Weekday {
    let histogram = weekday_histogram(entries, tz);
    let mut quietest = 0;
    for (idx, count) in histogram.iter().enumerate() {
        if *count < histogram[quietest] {
            quietest = idx;
        }
    }
    trace!("Weekday histogram {:?}, quietest index {}", histogram, quietest);
    WEEKDAYS_FROM_SUNDAY[quietest]
}

/// Full English name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_sunday() as usize]
}

/// Entries created in `[now - from_days, now - to_days)`, in exact 24-hour days.
pub fn count_in_rolling_window<Tz: TimeZone>(
    entries: &[LogEntry],
    now: &DateTime<Tz>,
    from_days: i64,
    to_days: i64,
) -> usize {
    let now = now.with_timezone(&Utc);
    let start = now - Duration::days(from_days);
    let end = now - Duration::days(to_days);
    entries
        .iter()
        .map(LogEntry::created_at_utc)
        .filter(|created| *created >= start && (to_days == 0 || *created < end))
        .count()
}

/// Entries from the last seven days (anything at or after `now - 7 days`).
pub fn this_week_count<Tz: TimeZone>(entries: &[LogEntry], now: &DateTime<Tz>) -> usize {
    count_in_rolling_window(entries, now, 7, 0)
}

/// Entries from the seven days before that.
pub fn last_week_count<Tz: TimeZone>(entries: &[LogEntry], now: &DateTime<Tz>) -> usize {
    count_in_rolling_window(entries, now, 14, 7)
}

/// Percentage change from last week to this week.
///
/// With nothing last week the change is 100 when anything was logged this
/// week and 0 otherwise.
pub fn week_over_week_change(this_week: usize, last_week: usize) -> i64 {
    if last_week > 0 {
        ((this_week as f64 - last_week as f64) / last_week as f64 * 100.0).round() as i64
    } else if this_week > 0 {
        100
    } else {
        0
    }
}

/// Average entries per day since the oldest entry, to one decimal.
pub fn average_entries_per_day<Tz: TimeZone>(entries: &[LogEntry], now: &DateTime<Tz>) -> f64 {
    let Some(oldest) = entries.iter().map(LogEntry::created_at_utc).min() else {
        return 0.0;
    };

    let elapsed_ms = (now.with_timezone(&Utc) - oldest).num_milliseconds();
    let days = ((elapsed_ms as f64 / MILLIS_PER_DAY as f64).ceil() as i64).max(1);
    (entries.len() as f64 / days as f64 * 10.0).round() / 10.0
}

/// Window of history an analytics view looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    /// Length of the window in days; `None` for all time.
    pub fn days(&self) -> Option<i64> {
        match self {
            TimeRange::Week => Some(7),
            TimeRange::Month => Some(30),
            TimeRange::Quarter => Some(90),
            TimeRange::All => None,
        }
    }

    /// Entries created at or after `now - days`.
    pub fn filter<'a, Tz: TimeZone>(
        &self,
        entries: &'a [LogEntry],
        now: &DateTime<Tz>,
    ) -> Vec<&'a LogEntry> {
        match self.days() {
            None => entries.iter().collect(),
            Some(days) => {
                let cutoff = now.with_timezone(&Utc) - Duration::days(days);
                entries
                    .iter()
                    .filter(|e| e.created_at_utc() >= cutoff)
                    .collect()
            }
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Month
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeRange::Week => "7d",
            TimeRange::Month => "30d",
            TimeRange::Quarter => "90d",
            TimeRange::All => "all",
        };
        f.write_str(label)
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(TimeRange::Week),
            "30d" => Ok(TimeRange::Month),
            "90d" => Ok(TimeRange::Quarter),
            "all" => Ok(TimeRange::All),
            other => Err(format!(
                "unknown time range '{}', expected 7d, 30d, 90d or all",
                other
            )),
        }
    }
}
