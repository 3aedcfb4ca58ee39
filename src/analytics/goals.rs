//! Goal progress from related entries.

use crate::models::{Goal, GoalStatus, LogEntry};
use serde::Serialize;

/// True when one of the goal's related tags equals one of the entry's tags, ignoring case.
pub fn is_related(goal: &Goal, entry: &LogEntry) -> bool {
    goal.related_tags
        .iter()
        .any(|tag| entry.has_tag_ignore_case(tag))
}

/// Entries that count toward `goal`.
pub fn related_entries<'a>(goal: &Goal, entries: &'a [LogEntry]) -> Vec<&'a LogEntry> {
    entries.iter().filter(|e| is_related(goal, e)).collect()
}

/// Completion percentage of `goal`, always within `0..=100`.
///
/// A goal without a positive `targetEntries` has no defined progress and
/// reports 0. Otherwise the related-entry count is divided by the target,
/// rounded to the nearest percent and capped at 100.
///
/// # Examples
///
/// ```
/// use til_insights::analytics::progress;
/// use til_insights::models::{Goal, LogEntry};
///
/// let goal = Goal::new("goal-1", "Learn Go", "2024-06-01")
///     .with_related_tags(["go"])
///     .with_target(Some(4));
/// let entries = vec![
///     LogEntry::new("a", "channels", "2024-06-02").with_tags(["Go"]),
///     LogEntry::new("b", "generics", "2024-06-03").with_tags(["rust"]),
/// ];
/// assert_eq!(progress(&goal, &entries), 25);
/// ```
pub fn progress(goal: &Goal, entries: &[LogEntry]) -> u8 {
    let target = match goal.target_entries {
        Some(target) if target > 0 => target,
        _ => return 0,
    };

    let matched = entries.iter().filter(|e| is_related(goal, e)).count();
    let percent = (matched as f64 / target as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Progress line for one goal, as shown in goal overviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub id: String,
    pub title: String,
    pub status: GoalStatus,
    pub related_entries: usize,
    pub progress: u8,
}

/// Progress of the first `limit` goals, in the order given.
pub fn goal_overview(goals: &[Goal], entries: &[LogEntry], limit: usize) -> Vec<GoalProgress> {
    goals
        .iter()
        .take(limit)
        .map(|goal| GoalProgress {
            id: goal.id.clone(),
            title: goal.title.clone(),
            status: goal.status,
            related_entries: related_entries(goal, entries).len(),
            progress: progress(goal, entries),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go_goal(target: Option<i64>) -> Goal {
        Goal::new("goal-go", "Learn Go", "2024-06-01T00:00:00Z")
            .with_related_tags(["go"])
            .with_target(target)
    }

    fn go_entries(n: usize) -> Vec<LogEntry> {
        (0..n)
            .map(|i| LogEntry::new(format!("e{}", i), "x", "2024-06-02T00:00:00Z").with_tags(["go"]))
            .collect()
    }

    #[test]
    fn test_nine_of_ten() {
        assert_eq!(progress(&go_goal(Some(10)), &go_entries(9)), 90);
    }

    #[test]
    fn test_absent_or_non_positive_target_is_zero() {
        assert_eq!(progress(&go_goal(None), &go_entries(9)), 0);
        assert_eq!(progress(&go_goal(Some(0)), &go_entries(9)), 0);
        assert_eq!(progress(&go_goal(Some(-3)), &go_entries(9)), 0);
    }

    #[test]
    fn test_capped_at_one_hundred() {
        assert_eq!(progress(&go_goal(Some(10)), &go_entries(10)), 100);
        assert_eq!(progress(&go_goal(Some(10)), &go_entries(25)), 100);
    }

    #[test]
    fn test_rounds_to_nearest() {
        // 2/3 = 66.67 -> 67, 1/8 = 12.5 -> 13
        assert_eq!(progress(&go_goal(Some(3)), &go_entries(2)), 67);
        assert_eq!(progress(&go_goal(Some(8)), &go_entries(1)), 13);
    }

    #[test]
    fn test_matching_ignores_case_both_ways() {
        let goal = Goal::new("g", "K8s", "2024-06-01")
            .with_related_tags(["Kubernetes"])
            .with_target(Some(2));
        let entries = vec![
            LogEntry::new("1", "x", "2024-06-02").with_tags(["kubernetes"]),
            LogEntry::new("2", "y", "2024-06-02").with_tags(["docker", "KUBERNETES"]),
            LogEntry::new("3", "z", "2024-06-02").with_tags(["kube"]),
        ];
        assert_eq!(related_entries(&goal, &entries).len(), 2);
        assert_eq!(progress(&goal, &entries), 100);
    }

    #[test]
    fn test_entry_counts_once_with_multiple_matching_tags() {
        let goal = Goal::new("g", "Web", "2024-06-01")
            .with_related_tags(["css", "html"])
            .with_target(Some(4));
        let entries = vec![LogEntry::new("1", "x", "2024-06-02").with_tags(["css", "html"])];
        assert_eq!(progress(&goal, &entries), 25);
    }

    #[test]
    fn test_goal_overview_respects_limit_and_order() {
        let goals = vec![
            go_goal(Some(10)),
            go_goal(None).with_status(GoalStatus::Paused),
            go_goal(Some(1)),
        ];
        let overview = goal_overview(&goals, &go_entries(3), 2);
        assert_eq!(overview.len(), 2);
        assert_eq!(overview[0].progress, 30);
        assert_eq!(overview[0].related_entries, 3);
        assert_eq!(overview[1].status, GoalStatus::Paused);
        assert_eq!(overview[1].progress, 0);
    }
}
