//! Aggregate views combining the individual analytics.
//!
//! These are what the dashboard, the analytics page and their command-line
//! equivalents render. Each view is a plain serializable snapshot computed from
//! the entries and goals passed in and the reference instant.

use super::goals::{goal_overview, GoalProgress};
use super::streak::{current_streak, longest_streak};
use super::tags::{top_tags, TagCount};
use super::trends::{
    average_entries_per_day, daily_activity, last_week_count, monthly_activity, this_week_count,
    week_over_week_change, weekday_distribution, weekly_activity, DayCount, MonthCount, TimeRange,
    WeekCount, WeekdayCount,
};
use crate::constants::{
    DASHBOARD_TOP_TAGS, GOAL_OVERVIEW_LIMIT, HEATMAP_DAYS, REPORT_TOP_TAGS, SUMMARY_MONTHS,
    SUMMARY_TOP_TAGS, TREND_WEEKS,
};
use crate::models::{Goal, GoalStatus, LogEntry};
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use tracing::debug;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_entries: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub top_tags: Vec<TagCount>,
    pub this_week_entries: usize,
    pub active_goals: usize,
}

impl DashboardStats {
    pub fn compute<Tz: TimeZone>(entries: &[LogEntry], goals: &[Goal], now: &DateTime<Tz>) -> Self {
        let stats = DashboardStats {
            total_entries: entries.len(),
            current_streak: current_streak(entries, now),
            longest_streak: longest_streak(entries, &now.timezone()),
            top_tags: top_tags(entries, DASHBOARD_TOP_TAGS),
            this_week_entries: this_week_count(entries, now),
            active_goals: count_with_status(goals, GoalStatus::Active),
        };
        debug!(
            "Dashboard stats: {} entries, streak {}",
            stats.total_entries, stats.current_streak
        );
        stats
    }
}

/// Long-form statistics over the whole history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_entries: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub top_tags: Vec<TagCount>,
    pub this_week_entries: usize,
    pub last_week_entries: usize,
    /// Percent change from last week, see [`week_over_week_change`].
    pub week_over_week_change: i64,
    /// Seven buckets, Sunday first.
    pub day_of_week_distribution: Vec<WeekdayCount>,
    pub monthly_entries: Vec<MonthCount>,
    pub total_goals: usize,
    pub active_goals: usize,
    pub completed_goals: usize,
    pub average_entries_per_day: f64,
}

impl AnalyticsSummary {
    pub fn compute<Tz: TimeZone>(entries: &[LogEntry], goals: &[Goal], now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let this_week = this_week_count(entries, now);
        let last_week = last_week_count(entries, now);

        AnalyticsSummary {
            total_entries: entries.len(),
            current_streak: current_streak(entries, now),
            longest_streak: longest_streak(entries, &tz),
            top_tags: top_tags(entries, SUMMARY_TOP_TAGS),
            this_week_entries: this_week,
            last_week_entries: last_week,
            week_over_week_change: week_over_week_change(this_week, last_week),
            day_of_week_distribution: weekday_distribution(entries, &tz),
            monthly_entries: monthly_activity(entries, SUMMARY_MONTHS, now),
            total_goals: goals.len(),
            active_goals: count_with_status(goals, GoalStatus::Active),
            completed_goals: count_with_status(goals, GoalStatus::Completed),
            average_entries_per_day: average_entries_per_day(entries, now),
        }
    }
}

/// Activity report for one [`TimeRange`].
///
/// The heatmap and weekly trend always cover their fixed windows; tag ranking
/// and the entry count only look at entries inside the range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub range: TimeRange,
    pub entries_in_range: usize,
    pub heatmap: Vec<DayCount>,
    pub weekly_trend: Vec<WeekCount>,
    pub top_tags: Vec<TagCount>,
    pub goals: Vec<GoalProgress>,
}

impl AnalyticsReport {
    pub fn compute<Tz: TimeZone>(
        entries: &[LogEntry],
        goals: &[Goal],
        range: TimeRange,
        now: &DateTime<Tz>,
    ) -> Self {
        let in_range: Vec<LogEntry> = range.filter(entries, now).into_iter().cloned().collect();
        debug!("{} of {} entries fall in range {}", in_range.len(), entries.len(), range);

        AnalyticsReport {
            range,
            entries_in_range: in_range.len(),
            heatmap: daily_activity(entries, HEATMAP_DAYS, now),
            weekly_trend: weekly_activity(entries, TREND_WEEKS, now),
            top_tags: top_tags(&in_range, REPORT_TOP_TAGS),
            goals: goal_overview(goals, entries, GOAL_OVERVIEW_LIMIT),
        }
    }
}

fn count_with_status(goals: &[Goal], status: GoalStatus) -> usize {
    goals.iter().filter(|g| g.status == status).count()
}
