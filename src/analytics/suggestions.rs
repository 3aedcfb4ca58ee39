//! Rule-based learning suggestions.
//!
//! Every rule is evaluated against the same snapshot and reference instant.
//! Candidates are collected in rule order, sorted by priority (highest first)
//! and cut to [`MAX_SUGGESTIONS`]. The sort is stable, so equal priorities keep
//! the order in which their rules ran.

use super::goals::progress;
use super::streak::{current_streak, logged_today};
use super::tags::top_tags;
use super::trends::{least_active_weekday, weekday_name};
use crate::constants::{
    ALMOST_THERE_PROGRESS, CONSISTENCY_MIN_ENTRIES, DEADLINE_WARNING_DAYS, DIVERSIFY_MIN_ENTRIES,
    MAX_SUGGESTIONS, MILLIS_PER_DAY, REVIEW_AGE_DAYS, REVIEW_EXCERPT_CHARS, REVIEW_MIN_OLD_ENTRIES,
    SET_GOAL_MIN_ENTRIES, STREAK_MILESTONE_DAYS,
};
use crate::models::{Goal, LogEntry};
use chrono::{DateTime, Duration, TimeZone, Utc, Weekday};
use rand::Rng;
use serde::ser::Serializer;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Broad category of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Streak,
    Goal,
    Explore,
    Review,
    Consistency,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::Streak => "streak",
            SuggestionKind::Goal => "goal",
            SuggestionKind::Explore => "explore",
            SuggestionKind::Review => "review",
            SuggestionKind::Consistency => "consistency",
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One actionable nudge. Each variant is the outcome of exactly one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    /// Nothing logged today and no streak to protect.
    StartStreak,
    /// Nothing logged today yet, but yesterday kept a streak going.
    KeepStreak { days: u32 },
    /// Logged today with a streak of at least a week.
    StreakMilestone { days: u32 },
    /// No active goal despite a few entries.
    SetGoal,
    /// An active goal at 80% or more but not done.
    AlmostThere {
        goal_title: String,
        progress: u8,
        /// First related tag of the goal, or its title when it has none.
        focus: String,
    },
    /// An active goal behind schedule with its deadline within a week.
    DeadlineApproaching {
        goal_title: String,
        days_left: i64,
        progress: u8,
    },
    /// One tag dominates the history.
    Diversify { tag: String },
    /// A randomly picked older entry worth revisiting.
    Review { excerpt: String },
    /// The weekday with the fewest entries.
    Consistency { weekday: Weekday },
}

impl Suggestion {
    pub fn kind(&self) -> SuggestionKind {
        match self {
            Suggestion::StartStreak
            | Suggestion::KeepStreak { .. }
            | Suggestion::StreakMilestone { .. } => SuggestionKind::Streak,
            Suggestion::SetGoal
            | Suggestion::AlmostThere { .. }
            | Suggestion::DeadlineApproaching { .. } => SuggestionKind::Goal,
            Suggestion::Diversify { .. } => SuggestionKind::Explore,
            Suggestion::Review { .. } => SuggestionKind::Review,
            Suggestion::Consistency { .. } => SuggestionKind::Consistency,
        }
    }

    pub fn priority(&self) -> u8 {
        match self {
            Suggestion::StartStreak => 10,
            Suggestion::KeepStreak { .. } => 9,
            Suggestion::DeadlineApproaching { .. } => 9,
            Suggestion::AlmostThere { .. } => 8,
            Suggestion::SetGoal => 7,
            Suggestion::Diversify { .. } => 5,
            Suggestion::Review { .. } => 4,
            Suggestion::StreakMilestone { .. } => 3,
            Suggestion::Consistency { .. } => 2,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Suggestion::StartStreak => "Start Your Streak!".to_string(),
            Suggestion::KeepStreak { days } => format!("Keep Your {}-Day Streak!", days),
            Suggestion::StreakMilestone { days } => format!("Amazing {}-Day Streak!", days),
            Suggestion::SetGoal => "Set a Learning Goal".to_string(),
            Suggestion::AlmostThere { goal_title, .. } => format!("Almost There: {}", goal_title),
            Suggestion::DeadlineApproaching { goal_title, .. } => {
                format!("Deadline Approaching: {}", goal_title)
            }
            Suggestion::Diversify { .. } => "Diversify Your Learning".to_string(),
            Suggestion::Review { .. } => "Review Past Learning".to_string(),
            Suggestion::Consistency { weekday } => format!("{}s Are Quiet", weekday_name(*weekday)),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Suggestion::StartStreak => {
                "You haven't logged anything today. Even a small learning counts!".to_string()
            }
            Suggestion::KeepStreak { days } => {
                format!("You're on a {}-day streak. Don't break it!", days)
            }
            Suggestion::StreakMilestone { .. } => {
                "You're building an incredible habit. Consider setting a more ambitious goal."
                    .to_string()
            }
            Suggestion::SetGoal => {
                "You've been learning consistently. Setting a goal can help you stay focused."
                    .to_string()
            }
            Suggestion::AlmostThere { progress, .. } => format!(
                "You're {}% through your goal. Just a few more entries!",
                progress
            ),
            Suggestion::DeadlineApproaching {
                days_left,
                progress,
                ..
            } => format!(
                "{} days left and you're at {}%. Time to focus!",
                days_left, progress
            ),
            Suggestion::Diversify { tag } => format!(
                "Most of your entries are about #{}. Try exploring related topics!",
                tag
            ),
            Suggestion::Review { excerpt } => format!("Remember when you learned: \"{}\"", excerpt),
            Suggestion::Consistency { weekday } => {
                let day = weekday_name(*weekday);
                format!(
                    "You log the least on {}s. Try to be consistent across the week.",
                    day
                )
            }
        }
    }

    pub fn action(&self) -> Option<String> {
        match self {
            Suggestion::StartStreak => Some("Log something you learned".to_string()),
            Suggestion::KeepStreak { .. } => Some("Log today's learning".to_string()),
            Suggestion::SetGoal => Some("Create a goal".to_string()),
            Suggestion::AlmostThere { focus, .. } => Some(format!("Log something about {}", focus)),
            Suggestion::Review { .. } => Some("Revisit and expand".to_string()),
            Suggestion::StreakMilestone { .. }
            | Suggestion::DeadlineApproaching { .. }
            | Suggestion::Diversify { .. }
            | Suggestion::Consistency { .. } => None,
        }
    }
}

#[derive(Serialize)]
struct SuggestionView {
    #[serde(rename = "type")]
    kind: SuggestionKind,
    title: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<String>,
    priority: u8,
}

impl Serialize for Suggestion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SuggestionView {
            kind: self.kind(),
            title: self.title(),
            description: self.description(),
            action: self.action(),
            priority: self.priority(),
        }
        .serialize(serializer)
    }
}

/// Generates up to [`MAX_SUGGESTIONS`] suggestions, highest priority first.
///
/// `rng` only decides which old entry the review suggestion quotes; pass a
/// seeded generator for reproducible output.
pub fn generate<Tz, R>(
    entries: &[LogEntry],
    goals: &[Goal],
    now: &DateTime<Tz>,
    rng: &mut R,
) -> Vec<Suggestion>
where
    Tz: TimeZone,
    R: Rng,
{
    let mut candidates = Vec::new();

    candidates.extend(streak_suggestion(entries, now));
    candidates.extend(goal_suggestions(entries, goals, now));
    candidates.extend(diversify_suggestion(entries));
    candidates.extend(review_suggestion(entries, now, rng));
    if entries.len() > CONSISTENCY_MIN_ENTRIES {
        candidates.push(Suggestion::Consistency {
            weekday: least_active_weekday(entries, &now.timezone()),
        });
    }

    debug!("Generated {} suggestion candidates", candidates.len());
    candidates.sort_by(|a, b| b.priority().cmp(&a.priority()));
    candidates.truncate(MAX_SUGGESTIONS);
    candidates
}

fn streak_suggestion<Tz: TimeZone>(entries: &[LogEntry], now: &DateTime<Tz>) -> Option<Suggestion> {
    let streak = current_streak(entries, now);
    if !logged_today(entries, now) {
        if streak == 0 {
            Some(Suggestion::StartStreak)
        } else {
            Some(Suggestion::KeepStreak { days: streak })
        }
    } else if streak >= STREAK_MILESTONE_DAYS {
        Some(Suggestion::StreakMilestone { days: streak })
    } else {
        None
    }
}

fn goal_suggestions<Tz: TimeZone>(
    entries: &[LogEntry],
    goals: &[Goal],
    now: &DateTime<Tz>,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let active: Vec<&Goal> = goals.iter().filter(|g| g.is_active()).collect();

    if active.is_empty() && entries.len() > SET_GOAL_MIN_ENTRIES {
        suggestions.push(Suggestion::SetGoal);
    }

    let now_utc = now.with_timezone(&Utc);
    for goal in active {
        let percent = progress(goal, entries);

        if (ALMOST_THERE_PROGRESS..100).contains(&percent) {
            let focus = goal
                .related_tags
                .first()
                .cloned()
                .unwrap_or_else(|| goal.title.clone());
            suggestions.push(Suggestion::AlmostThere {
                goal_title: goal.title.clone(),
                progress: percent,
                focus,
            });
        }

        if let Some(deadline) = goal.deadline_utc() {
            let days_left = days_until(now_utc, deadline);
            if days_left > 0 && days_left <= DEADLINE_WARNING_DAYS && percent < ALMOST_THERE_PROGRESS {
                suggestions.push(Suggestion::DeadlineApproaching {
                    goal_title: goal.title.clone(),
                    days_left,
                    progress: percent,
                });
            }
        }
    }

    suggestions
}

/// Whole days until `deadline`, rounded up.
fn days_until(now: DateTime<Utc>, deadline: DateTime<Utc>) -> i64 {
    let ms = (deadline - now).num_milliseconds();
    (ms as f64 / MILLIS_PER_DAY as f64).ceil() as i64
}

fn diversify_suggestion(entries: &[LogEntry]) -> Option<Suggestion> {
    if entries.len() <= DIVERSIFY_MIN_ENTRIES {
        return None;
    }
    let dominant = top_tags(entries, 1).into_iter().next()?;
    (dominant.count * 2 > entries.len()).then(|| Suggestion::Diversify { tag: dominant.tag })
}

fn review_suggestion<Tz, R>(entries: &[LogEntry], now: &DateTime<Tz>, rng: &mut R) -> Option<Suggestion>
where
    Tz: TimeZone,
    R: Rng,
{
    let now_utc = now.with_timezone(&Utc);
    let max_age = Duration::days(REVIEW_AGE_DAYS);
    let old: Vec<&LogEntry> = entries
        .iter()
        .filter(|e| now_utc - e.created_at_utc() > max_age)
        .collect();

    if old.len() <= REVIEW_MIN_OLD_ENTRIES {
        return None;
    }

    let picked = old[rng.random_range(0..old.len())];
    Some(Suggestion::Review {
        excerpt: excerpt(&picked.content, REVIEW_EXCERPT_CHARS),
    })
}

/// First `max_chars` characters of `content`, with `...` appended when cut.
fn excerpt(content: &str, max_chars: usize) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
