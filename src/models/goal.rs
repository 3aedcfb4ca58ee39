//! Learning goals tracked against entry tags.

use super::timestamp::{parse_timestamp, try_parse_timestamp};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a goal. Only users and tools change it; reaching 100%
/// progress does not complete a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Completed,
    Paused,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Completed => "completed",
            GoalStatus::Paused => "paused",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(GoalStatus::Active),
            "completed" => Ok(GoalStatus::Completed),
            "paused" => Ok(GoalStatus::Paused),
            other => Err(AppError::Validation(format!(
                "unknown goal status '{}', expected active, completed or paused",
                other
            ))),
        }
    }
}

/// A learning goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO date (or date-time) the goal should be reached by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// Tags that count toward this goal, matched ignoring case.
    #[serde(default)]
    pub related_tags: Vec<String>,
    /// Number of related entries that makes the goal 100%. Absent or
    /// non-positive means progress is undefined and reported as 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_entries: Option<i64>,
    pub status: GoalStatus,
    pub created_at: String,
}

impl Goal {
    /// Creates an active goal with no description, deadline or target.
    pub fn new(id: impl Into<String>, title: impl Into<String>, created_at: impl Into<String>) -> Self {
        Goal {
            id: id.into(),
            title: title.into(),
            description: None,
            deadline: None,
            related_tags: Vec::new(),
            target_entries: None,
            status: GoalStatus::Active,
            created_at: created_at.into(),
        }
    }

    pub fn with_related_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_target(mut self, target_entries: Option<i64>) -> Self {
        self.target_entries = target_entries;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<String>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_status(mut self, status: GoalStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == GoalStatus::Active
    }

    /// Deadline instant, if the goal has one.
    pub fn deadline_utc(&self) -> Option<DateTime<Utc>> {
        self.deadline.as_deref().map(parse_timestamp)
    }

    pub fn created_at_utc(&self) -> DateTime<Utc> {
        parse_timestamp(&self.created_at)
    }

    /// Checks the invariants a stored goal must satisfy.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when the id or title is blank, the
    /// target is not positive, or `createdAt` or the deadline do not parse as
    /// ISO-8601.
    pub fn validate(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::Validation("goal id cannot be empty".to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("goal title cannot be empty".to_string()));
        }
        if let Some(target) = self.target_entries {
            if target <= 0 {
                return Err(AppError::Validation(format!(
                    "goal target must be positive, got {}",
                    target
                )));
            }
        }
        if try_parse_timestamp(&self.created_at).is_none() {
            return Err(AppError::Validation(format!(
                "goal createdAt '{}' is not an ISO-8601 timestamp",
                self.created_at
            )));
        }
        if let Some(deadline) = &self.deadline {
            if try_parse_timestamp(deadline).is_none() {
                return Err(AppError::Validation(format!(
                    "goal deadline '{}' is not an ISO-8601 date",
                    deadline
                )));
            }
        }
        Ok(())
    }
}
