//! ISO-8601 timestamp handling at the schema boundary.
//!
//! Entries and goals carry their timestamps as strings. Parsing follows one
//! deterministic policy so that malformed data degrades the same way every time:
//!
//! 1. RFC 3339 (`2024-06-15T12:00:00.000Z`, `2024-06-15T14:00:00+02:00`)
//! 2. naive date-time without offset, read as UTC (`2024-06-15T12:00:00`)
//! 3. bare date, read as UTC midnight (`2024-06-15`)
//! 4. anything else is the Unix epoch

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMAT_ISO: &str = "%Y-%m-%d";

/// Parses a stored timestamp, falling back to the Unix epoch when nothing matches.
pub fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    try_parse_timestamp(raw).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Parses a timestamp in one of the accepted shapes, or `None` when it matches
/// none of them. Used to reject malformed input before it is stored.
pub fn try_parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT_ISO)
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Formats an instant the way new records are written (`YYYY-MM-DDTHH:MM:SS.mmmZ`).
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Calendar day of `instant` in the time zone `tz`.
pub fn local_day<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, FixedOffset, Timelike};

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse_timestamp("2024-06-15T14:30:00+02:00");
        assert_eq!(parsed.hour(), 12);
        assert_eq!(parsed.minute(), 30);
    }

    #[test]
    fn test_parse_millis_zulu() {
        let parsed = parse_timestamp("2024-06-15T12:00:00.250Z");
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
        assert_eq!(parsed.day(), 15);
    }

    #[test]
    fn test_parse_naive_datetime_as_utc() {
        let parsed = parse_timestamp("2024-06-15T08:15:00");
        assert_eq!(parsed.hour(), 8);
        assert_eq!(parsed.minute(), 15);
    }

    #[test]
    fn test_parse_bare_date_as_utc_midnight() {
        let parsed = parse_timestamp("2024-06-20");
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2024, 6, 20));
        assert_eq!(parsed.hour(), 0);
    }

    #[test]
    fn test_unparsable_is_epoch() {
        assert_eq!(parse_timestamp("yesterday-ish"), DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(parse_timestamp(""), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_try_parse_rejects_free_text() {
        assert!(try_parse_timestamp("next friday").is_none());
        assert!(try_parse_timestamp("2024-06-18T00:00:00 UTC").is_none());
        assert_eq!(
            try_parse_timestamp("1970-01-01T00:00:00Z"),
            Some(DateTime::<Utc>::UNIX_EPOCH)
        );
    }

    #[test]
    fn test_format_round_trips_through_parse() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let formatted = format_timestamp(instant);
        assert_eq!(formatted, "2024-01-02T03:04:05.000Z");
        assert_eq!(parse_timestamp(&formatted), instant);
    }

    #[test]
    fn test_local_day_crosses_midnight() {
        // 23:30 UTC is already the next day two hours east
        let instant = Utc.with_ymd_and_hms(2024, 3, 9, 23, 30, 0).unwrap();
        let east = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(local_day(instant, &Utc).day(), 9);
        assert_eq!(local_day(instant, &east).day(), 10);
    }
}
