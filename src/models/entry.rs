//! The "Today I Learned" log entry.

use super::timestamp::{local_day, parse_timestamp, try_parse_timestamp};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A single learning note.
///
/// `created_at` is written once when the entry is created and is never changed
/// by any analytics or update operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    /// Soft reference to a goal. Not enforced and not cleared when the goal goes away.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
}

impl LogEntry {
    /// Creates an entry with no tags, source or goal link.
    pub fn new(id: impl Into<String>, content: impl Into<String>, created_at: impl Into<String>) -> Self {
        LogEntry {
            id: id.into(),
            content: content.into(),
            tags: Vec::new(),
            source: None,
            source_name: None,
            goal_id: None,
            created_at: created_at.into(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_source(mut self, source: Option<String>, source_name: Option<String>) -> Self {
        self.source = source;
        self.source_name = source_name;
        self
    }

    pub fn with_goal(mut self, goal_id: Option<String>) -> Self {
        self.goal_id = goal_id;
        self
    }

    /// Creation instant in UTC (see [`parse_timestamp`] for the malformed-input policy).
    pub fn created_at_utc(&self) -> DateTime<Utc> {
        parse_timestamp(&self.created_at)
    }

    /// Calendar day the entry was created on, as seen from `tz`.
    pub fn created_on<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        local_day(self.created_at_utc(), tz)
    }

    /// True when any tag equals `tag` ignoring case.
    pub fn has_tag_ignore_case(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == wanted)
    }

    /// Checks the invariants a stored entry must satisfy.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when the id or content is blank or
    /// `createdAt` is not an ISO-8601 timestamp.
    pub fn validate(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::Validation("entry id cannot be empty".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(AppError::Validation(
                "entry content cannot be empty".to_string(),
            ));
        }
        if try_parse_timestamp(&self.created_at).is_none() {
            return Err(AppError::Validation(format!(
                "entry createdAt '{}' is not an ISO-8601 timestamp",
                self.created_at
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_serializes_with_camel_case_and_omits_absent_fields() {
        let entry = LogEntry::new("entry-1", "Lifetimes elide", "2024-06-15T12:00:00.000Z")
            .with_tags(["rust"])
            .with_source(None, Some("The Book".to_string()));

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["createdAt"], "2024-06-15T12:00:00.000Z");
        assert_eq!(json["sourceName"], "The Book");
        assert!(json.get("source").is_none());
        assert!(json.get("goalId").is_none());
    }

    #[test]
    fn test_deserializes_without_tags() {
        let entry: LogEntry = serde_json::from_str(
            r#"{"id":"entry-1","content":"x","createdAt":"2024-06-15T12:00:00Z"}"#,
        )
        .unwrap();
        assert!(entry.tags.is_empty());
        assert_eq!(entry.created_on(&Utc).day(), 15);
    }

    #[test]
    fn test_has_tag_ignore_case() {
        let entry = LogEntry::new("e", "c", "2024-01-01").with_tags(["React"]);
        assert!(entry.has_tag_ignore_case("react"));
        assert!(!entry.has_tag_ignore_case("reactive"));
    }

    #[test]
    fn test_validate_rejects_blank_content() {
        let entry = LogEntry::new("entry-1", "   ", "2024-01-01");
        assert!(matches!(entry.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_unparsable_created_at() {
        let entry = LogEntry::new("entry-1", "Closures capture", "last tuesday");
        assert!(matches!(entry.validate(), Err(AppError::Validation(_))));

        let entry = LogEntry::new("entry-1", "Closures capture", "2024-01-01T08:00:00");
        assert!(entry.validate().is_ok());
    }
}
