//! Command handlers behind the `til` binary.
//!
//! Each handler reads a snapshot from the repository, runs the analytics
//! against the reference instant and writes either a text rendering or JSON
//! to the given writer. Keeping output behind `io::Write` lets tests capture
//! it without spawning the binary.

use crate::analytics::{
    daily_activity, generate, goal_overview, monthly_activity, weekly_activity, AnalyticsReport,
    AnalyticsSummary, DashboardStats, DayCount, MonthCount, TimeRange, WeekCount,
};
use crate::cli::{Command, GoalCommand};
use crate::constants::DEFAULT_GOAL_TARGET_ENTRIES;
use crate::errors::{AppError, AppResult};
use crate::ids::{new_entry_id, new_goal_id};
use crate::models::{format_timestamp, Goal, LogEntry};
use crate::store::{GoalUpdate, Repository};
use crate::tagging::{clean_tag, clean_tags, extract_tags, merge_tags, search_by_tag};
use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info};

/// How results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

/// Runs one command against `repo`.
///
/// # Errors
///
/// Propagates repository failures, and returns `AppError::Validation` or
/// `AppError::NotFound` for bad input or unknown ids.
pub fn dispatch<R, W, Tz>(
    command: Command,
    repo: &R,
    now: &DateTime<Tz>,
    mode: OutputMode,
    out: &mut W,
) -> AppResult<()>
where
    R: Repository + ?Sized,
    W: Write,
    Tz: TimeZone,
{
    debug!("Dispatching {:?}", command);
    match command {
        Command::Log {
            content,
            tags,
            source,
            source_name,
            goal,
            no_auto_tags,
        } => {
            let explicit = clean_tags(&tags);
            let tags = if no_auto_tags {
                explicit
            } else {
                merge_tags(extract_tags(&content), explicit)
            };
            let entry = LogEntry::new(
                new_entry_id(),
                content.trim(),
                format_timestamp(now.with_timezone(&Utc)),
            )
            .with_tags(tags)
            .with_source(source, source_name)
            .with_goal(goal);

            repo.save_entry(entry.clone())?;
            render(out, mode, &entry, |out| {
                writeln!(out, "Logged {}", entry.id)?;
                if !entry.tags.is_empty() {
                    writeln!(out, "Tags: {}", format_tags(&entry.tags))?;
                }
                Ok(())
            })
        }
        Command::Entries { tag, limit } => {
            let entries = repo.list_entries()?;
            let mut selected: Vec<&LogEntry> = match tag.as_deref() {
                Some(query) => search_by_tag(&entries, query),
                None => entries.iter().collect(),
            };
            if let Some(limit) = limit {
                selected.truncate(limit);
            }
            render(out, mode, &selected, |out| {
                if selected.is_empty() {
                    writeln!(out, "No entries yet.")?;
                }
                for entry in &selected {
                    writeln!(out, "{}  {}", entry.created_at, entry.id)?;
                    writeln!(out, "    {}", entry.content)?;
                    if !entry.tags.is_empty() {
                        writeln!(out, "    {}", format_tags(&entry.tags))?;
                    }
                }
                Ok(())
            })
        }
        Command::DeleteEntry { id } => {
            if !repo.delete_entry(&id)? {
                return Err(AppError::NotFound(format!("entry {}", id)));
            }
            render(out, mode, &serde_json::json!({ "deleted": id }), |out| {
                writeln!(out, "Deleted entry {}", id)
            })
        }
        Command::Goal { action } => run_goal_command(action, repo, now, mode, out),
        Command::Stats => {
            let stats = DashboardStats::compute(&repo.list_entries()?, &repo.list_goals()?, now);
            render(out, mode, &stats, |out| {
                writeln!(out, "Total entries:   {}", stats.total_entries)?;
                writeln!(out, "Current streak:  {} days", stats.current_streak)?;
                writeln!(out, "Longest streak:  {} days", stats.longest_streak)?;
                writeln!(out, "This week:       {}", stats.this_week_entries)?;
                writeln!(out, "Active goals:    {}", stats.active_goals)?;
                for tag in &stats.top_tags {
                    writeln!(out, "  #{} ({})", tag.tag, tag.count)?;
                }
                Ok(())
            })
        }
        Command::Analytics { range } => analytics(repo, range, now, mode, out),
        Command::Trends {
            days,
            weeks,
            months,
        } => {
            let entries = repo.list_entries()?;
            let trends = Trends {
                daily: daily_activity(&entries, days, now),
                weekly: weekly_activity(&entries, weeks, now),
                monthly: monthly_activity(&entries, months, now),
            };
            render(out, mode, &trends, |out| {
                writeln!(out, "Daily")?;
                for day in &trends.daily {
                    writeln!(out, "  {}  {}", day.day, bar(day.count))?;
                }
                writeln!(out, "Weekly")?;
                for week in &trends.weekly {
                    writeln!(out, "  {} {}..{}  {}", week.label, week.start, week.end, week.count)?;
                }
                writeln!(out, "Monthly")?;
                for month in &trends.monthly {
                    writeln!(out, "  {} {}  {}", month.month, month.year, month.count)?;
                }
                Ok(())
            })
        }
        Command::Suggest { seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let suggestions = generate(&repo.list_entries()?, &repo.list_goals()?, now, &mut rng);
            render(out, mode, &suggestions, |out| {
                if suggestions.is_empty() {
                    writeln!(out, "Nothing to suggest. Keep it up!")?;
                }
                for suggestion in &suggestions {
                    writeln!(out, "[{}] {}", suggestion.kind(), suggestion.title())?;
                    writeln!(out, "    {}", suggestion.description())?;
                    if let Some(action) = suggestion.action() {
                        writeln!(out, "    -> {}", action)?;
                    }
                }
                Ok(())
            })
        }
        Command::Clear { yes } => {
            if !yes {
                return Err(AppError::Validation(
                    "refusing to delete everything without --yes".to_string(),
                ));
            }
            repo.clear_all()?;
            info!("Cleared all entries and goals");
            render(out, mode, &serde_json::json!({ "cleared": true }), |out| {
                writeln!(out, "Cleared all entries and goals")
            })
        }
    }
}

fn run_goal_command<R, W, Tz>(
    action: GoalCommand,
    repo: &R,
    now: &DateTime<Tz>,
    mode: OutputMode,
    out: &mut W,
) -> AppResult<()>
where
    R: Repository + ?Sized,
    W: Write,
    Tz: TimeZone,
{
    match action {
        GoalCommand::Add {
            title,
            description,
            deadline,
            tags,
            target,
        } => {
            let mut related_tags = clean_tags(&tags);
            if related_tags.is_empty() {
                related_tags.extend(clean_tag(&title));
            }
            let goal = Goal::new(new_goal_id(), title.trim(), format_timestamp(now.with_timezone(&Utc)))
                .with_description(description)
                .with_deadline(deadline)
                .with_related_tags(related_tags)
                .with_target(Some(target.unwrap_or(i64::from(DEFAULT_GOAL_TARGET_ENTRIES))));

            repo.save_goal(goal.clone())?;
            render(out, mode, &goal, |out| {
                writeln!(out, "Created goal {}", goal.id)?;
                writeln!(out, "Tracking: {}", format_tags(&goal.related_tags))
            })
        }
        GoalCommand::List => {
            let goals = repo.list_goals()?;
            let overview = goal_overview(&goals, &repo.list_entries()?, goals.len());
            render(out, mode, &overview, |out| {
                if overview.is_empty() {
                    writeln!(out, "No goals yet.")?;
                }
                for goal in &overview {
                    writeln!(
                        out,
                        "{}  {} [{}] {}% ({} entries)",
                        goal.id, goal.title, goal.status, goal.progress, goal.related_entries
                    )?;
                }
                Ok(())
            })
        }
        GoalCommand::Status { id, status } => {
            let goal = repo
                .update_goal(&id, GoalUpdate::status(status))?
                .ok_or_else(|| AppError::NotFound(format!("goal {}", id)))?;
            render(out, mode, &goal, |out| {
                writeln!(out, "Goal {} is now {}", goal.id, goal.status)
            })
        }
        GoalCommand::Delete { id } => {
            if !repo.delete_goal(&id)? {
                return Err(AppError::NotFound(format!("goal {}", id)));
            }
            render(out, mode, &serde_json::json!({ "deleted": id }), |out| {
                writeln!(out, "Deleted goal {}", id)
            })
        }
    }
}

/// The range report plus the long-form summary.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyticsOutput {
    report: AnalyticsReport,
    summary: AnalyticsSummary,
}

fn analytics<R, W, Tz>(
    repo: &R,
    range: TimeRange,
    now: &DateTime<Tz>,
    mode: OutputMode,
    out: &mut W,
) -> AppResult<()>
where
    R: Repository + ?Sized,
    W: Write,
    Tz: TimeZone,
{
    let entries = repo.list_entries()?;
    let goals = repo.list_goals()?;
    let output = AnalyticsOutput {
        report: AnalyticsReport::compute(&entries, &goals, range, now),
        summary: AnalyticsSummary::compute(&entries, &goals, now),
    };

    render(out, mode, &output, |out| {
        let report = &output.report;
        let summary = &output.summary;
        writeln!(out, "Range {}: {} entries", report.range, report.entries_in_range)?;
        writeln!(
            out,
            "This week {} / last week {} ({:+}%)",
            summary.this_week_entries, summary.last_week_entries, summary.week_over_week_change
        )?;
        writeln!(out, "Average per day: {:.1}", summary.average_entries_per_day)?;
        writeln!(
            out,
            "Streak: {} current, {} longest",
            summary.current_streak, summary.longest_streak
        )?;
        writeln!(out, "Top tags")?;
        for tag in &report.top_tags {
            writeln!(out, "  #{} ({})", tag.tag, tag.count)?;
        }
        writeln!(out, "By weekday")?;
        for day in &summary.day_of_week_distribution {
            writeln!(out, "  {:<9} {}", day.day, bar(day.count))?;
        }
        writeln!(out, "Goals")?;
        for goal in &report.goals {
            writeln!(out, "  {} {}%", goal.title, goal.progress)?;
        }
        Ok(())
    })
}

#[derive(Serialize)]
struct Trends {
    daily: Vec<DayCount>,
    weekly: Vec<WeekCount>,
    monthly: Vec<MonthCount>,
}

fn render<W, T, F>(out: &mut W, mode: OutputMode, value: &T, text: F) -> AppResult<()>
where
    W: Write,
    T: Serialize + ?Sized,
    F: FnOnce(&mut W) -> std::io::Result<()>,
{
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text(out)?,
    }
    Ok(())
}

fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

fn bar(count: usize) -> String {
    format!("{} {}", "#".repeat(count), count)
}
