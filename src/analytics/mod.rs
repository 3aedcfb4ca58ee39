//! Learning analytics.
//!
//! Everything here is a pure function of an entry/goal snapshot and an explicit
//! reference instant `now`. Calendar days are taken in the time zone of `now`,
//! so callers decide which local day "today" is by choosing the zone of the
//! `DateTime` they pass. Nothing in this module touches storage, the clock or
//! global state.

pub mod goals;
pub mod streak;
pub mod suggestions;
pub mod summary;
pub mod tags;
pub mod trends;

pub use goals::{goal_overview, is_related, progress, related_entries, GoalProgress};
pub use streak::{active_days, current_streak, logged_today, longest_streak};
pub use suggestions::{generate, Suggestion, SuggestionKind};
pub use summary::{AnalyticsReport, AnalyticsSummary, DashboardStats};
pub use tags::{top_tags, TagCount};
pub use trends::{
    daily_activity, least_active_weekday, monthly_activity, weekday_distribution, weekly_activity,
    DayCount, MonthCount, TimeRange, WeekCount, WeekdayCount,
};
