//! Tag frequency ranking.

use crate::models::LogEntry;
use serde::Serialize;
use std::collections::HashMap;

/// A tag and how many times it occurs across a set of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Most frequent tags, at most `limit` of them.
///
/// Tags are compared exactly as stored. Ties keep the order in which the tags
/// were first seen while scanning `entries`.
pub fn top_tags(entries: &[LogEntry], limit: usize) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for tag in entries.iter().flat_map(|e| e.tags.iter()) {
        match positions.get(tag.as_str()) {
            Some(&idx) => counts[idx].count += 1,
            None => {
                positions.insert(tag.as_str(), counts.len());
                counts.push(TagCount {
                    tag: tag.clone(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, which keeps first-seen order on ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, tags: &[&str]) -> LogEntry {
        LogEntry::new(id, "x", "2024-06-15T12:00:00Z").with_tags(tags.iter().copied())
    }

    #[test]
    fn test_no_entries_or_no_tags() {
        assert!(top_tags(&[], 5).is_empty());
        assert!(top_tags(&[entry("1", &[])], 5).is_empty());
    }

    #[test]
    fn test_ranks_by_count() {
        let entries = vec![
            entry("1", &["rust", "async"]),
            entry("2", &["rust"]),
            entry("3", &["go", "rust", "async"]),
        ];
        let ranked = top_tags(&entries, 10);
        assert_eq!(
            ranked,
            vec![
                TagCount { tag: "rust".to_string(), count: 3 },
                TagCount { tag: "async".to_string(), count: 2 },
                TagCount { tag: "go".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let entries = vec![
            entry("1", &["zeta"]),
            entry("2", &["alpha"]),
            entry("3", &["mid", "zeta", "alpha"]),
        ];
        let tags: Vec<String> = top_tags(&entries, 10).into_iter().map(|t| t.tag).collect();
        assert_eq!(tags, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_case_is_not_normalized() {
        let entries = vec![entry("1", &["React"]), entry("2", &["react"])];
        assert_eq!(top_tags(&entries, 10).len(), 2);
    }

    #[test]
    fn test_limit_truncates() {
        let entries = vec![entry("1", &["a", "b", "c"])];
        assert_eq!(top_tags(&entries, 2).len(), 2);
        assert!(top_tags(&entries, 0).is_empty());
    }
}
