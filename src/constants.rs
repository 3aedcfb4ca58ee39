//! Constants used throughout the application.
//!
//! This module contains the constants shared by the analytics engine, the
//! repository and the command-line front end, organized into logical groups.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "til";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "Record what you learned today and get insights on your habit";

// Logging
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "til";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";

// Configuration Keys & Environment Variables
/// Environment variable for the database file location.
pub const ENV_VAR_TIL_DB: &str = "TIL_DB";
/// Environment variable for the log format (`text` or `json`).
pub const ENV_VAR_TIL_LOG_FORMAT: &str = "TIL_LOG_FORMAT";
/// Environment variable for the default log level.
pub const ENV_VAR_TIL_LOG_LEVEL: &str = "TIL_LOG_LEVEL";
/// Default database location, expanded with `shellexpand`.
pub const DEFAULT_DB_PATH: &str = "~/.local/share/til/til.db";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Storage Keys
/// Key under which the entry collection is stored.
pub const STORAGE_KEY_ENTRIES: &str = "til-log-entries";
/// Key under which the goal collection is stored.
pub const STORAGE_KEY_GOALS: &str = "til-log-goals";
/// Maximum number of pooled SQLite connections.
pub const DB_POOL_MAX_SIZE: u32 = 5;

// Identifiers
/// Prefix for log entry identifiers.
pub const ENTRY_ID_PREFIX: &str = "entry";
/// Prefix for goal identifiers.
pub const GOAL_ID_PREFIX: &str = "goal";

// Date/Time Logic
/// Milliseconds in one day, used for rolling (non-calendar) windows.
pub const MILLIS_PER_DAY: i64 = 86_400_000;
/// Names of the weekdays indexed Sunday = 0 .. Saturday = 6.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

// Goals
/// Target entry count for goals created without an explicit target.
pub const DEFAULT_GOAL_TARGET_ENTRIES: u32 = 10;

// Analytics
/// Number of tags reported on the dashboard.
pub const DASHBOARD_TOP_TAGS: usize = 5;
/// Number of tags reported in the analytics summary.
pub const SUMMARY_TOP_TAGS: usize = 10;
/// Number of calendar months reported in the analytics summary.
pub const SUMMARY_MONTHS: u32 = 3;
/// Number of tags reported in a time-range report.
pub const REPORT_TOP_TAGS: usize = 8;
/// Number of days shown in the activity heatmap.
pub const HEATMAP_DAYS: u32 = 28;
/// Number of weeks shown in the weekly trend.
pub const TREND_WEEKS: u32 = 4;
/// Largest bucket count `til trends` accepts for days, weeks or months.
pub const MAX_TREND_BUCKETS: i64 = 3650;
/// Number of goals shown in the progress overview.
pub const GOAL_OVERVIEW_LIMIT: usize = 4;

// Suggestions
/// Maximum number of suggestions returned by one call.
pub const MAX_SUGGESTIONS: usize = 4;
/// Entries older than this many days are candidates for review.
pub const REVIEW_AGE_DAYS: i64 = 14;
/// Review suggestions need strictly more old entries than this.
pub const REVIEW_MIN_OLD_ENTRIES: usize = 5;
/// Characters of the reviewed entry quoted in the suggestion.
pub const REVIEW_EXCERPT_CHARS: usize = 80;
/// Streak length that earns a milestone suggestion.
pub const STREAK_MILESTONE_DAYS: u32 = 7;
/// Total entries above which a goal is suggested when none is active.
pub const SET_GOAL_MIN_ENTRIES: usize = 3;
/// Total entries above which the diversify rule is evaluated.
pub const DIVERSIFY_MIN_ENTRIES: usize = 5;
/// Total entries above which the consistency rule fires.
pub const CONSISTENCY_MIN_ENTRIES: usize = 14;
/// Lower bound (inclusive) of the "almost there" progress band.
pub const ALMOST_THERE_PROGRESS: u8 = 80;
/// Days before a deadline at which it counts as approaching.
pub const DEADLINE_WARNING_DAYS: i64 = 7;

// Tag Extraction
/// Maximum number of automatically extracted tags.
pub const MAX_AUTO_TAGS: usize = 5;
