//! Tag hygiene and keyword-based tag extraction.
//!
//! Stored tags are lowercase strings made of `a-z`, `0-9` and `-`. Everything
//! the command line accepts goes through [`clean_tag`] before it is saved.

use crate::constants::MAX_AUTO_TAGS;
use crate::models::LogEntry;

/// Keyword table used to suggest tags from free text, in suggestion order.
const TAG_KEYWORDS: &[(&str, &[&str])] = &[
    ("react", &["react", "hooks", "usestate", "useeffect", "jsx", "component"]),
    ("typescript", &["typescript", "ts", "types", "interface", "generic"]),
    ("javascript", &["javascript", "js", "es6", "async", "promise"]),
    ("nextjs", &["next.js", "nextjs", "next", "app router", "server component"]),
    ("nodejs", &["node.js", "nodejs", "node", "express", "npm"]),
    ("python", &["python", "django", "flask", "pip"]),
    ("css", &["css", "tailwind", "styled", "scss", "flexbox", "grid"]),
    ("database", &["database", "sql", "postgres", "mongodb", "prisma", "supabase"]),
    ("api", &["api", "rest", "graphql", "endpoint", "fetch"]),
    ("git", &["git", "github", "commit", "branch", "merge"]),
    ("docker", &["docker", "container", "kubernetes", "k8s"]),
    ("testing", &["test", "jest", "testing", "vitest", "cypress"]),
    ("devops", &["devops", "ci/cd", "pipeline", "deploy"]),
    ("ai", &["ai", "machine learning", "llm", "gpt", "openai", "claude"]),
];

/// Normalizes a user-supplied tag. Returns `None` when nothing usable is left.
///
/// # Examples
///
/// ```
/// use til_insights::tagging::clean_tag;
///
/// assert_eq!(clean_tag("#Next.JS"), Some("nextjs".to_string()));
/// assert_eq!(clean_tag("ci-cd"), Some("ci-cd".to_string()));
/// assert_eq!(clean_tag("!!"), None);
/// ```
pub fn clean_tag(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();
    let cleaned = cleaned.trim_matches('-');

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Cleans a list of tags, dropping empties and duplicates while keeping order.
pub fn clean_tags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.into_iter().filter_map(|t| clean_tag(t.as_ref())) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Suggests up to five tags whose keywords appear in `content`.
pub fn extract_tags(content: &str) -> Vec<String> {
    let lowered = content.to_lowercase();

    TAG_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(tag, _)| tag.to_string())
        .take(MAX_AUTO_TAGS)
        .collect()
}

/// Merges extracted tags with explicit ones, extracted first, without duplicates.
pub fn merge_tags(auto: Vec<String>, explicit: Vec<String>) -> Vec<String> {
    let mut merged = auto;
    for tag in explicit {
        if !merged.contains(&tag) {
            merged.push(tag);
        }
    }
    merged
}

/// Entries with at least one tag containing `query`, ignoring case.
pub fn search_by_tag<'a>(entries: &'a [LogEntry], query: &str) -> Vec<&'a LogEntry> {
    let query = query.to_lowercase();
    entries
        .iter()
        .filter(|e| e.tags.iter().any(|t| t.to_lowercase().contains(&query)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_tag_strips_and_lowercases() {
        assert_eq!(clean_tag("  Rust "), Some("rust".to_string()));
        assert_eq!(clean_tag("#k8s"), Some("k8s".to_string()));
        assert_eq!(clean_tag("-edge-"), Some("edge".to_string()));
        assert_eq!(clean_tag(""), None);
    }

    #[test]
    fn test_clean_tags_dedups_in_order() {
        let tags = clean_tags(["Go", "rust", "GO", "", "web-dev"]);
        assert_eq!(tags, vec!["go", "rust", "web-dev"]);
    }

    #[test]
    fn test_extract_tags_from_content() {
        let tags = extract_tags("Learned how useEffect cleanup works with Docker");
        assert_eq!(tags, vec!["react", "docker"]);
    }

    #[test]
    fn test_extract_tags_caps_at_five() {
        let tags = extract_tags("react typescript python css sql git docker");
        assert_eq!(tags.len(), 5);
        assert_eq!(tags[0], "react");
    }

    #[test]
    fn test_extract_tags_none_for_plain_text() {
        assert!(extract_tags("Bread needs patience").is_empty());
    }

    #[test]
    fn test_merge_tags_keeps_auto_first() {
        let merged = merge_tags(
            vec!["react".to_string()],
            vec!["hooks".to_string(), "react".to_string()],
        );
        assert_eq!(merged, vec!["react", "hooks"]);
    }

    #[test]
    fn test_search_by_tag_substring() {
        let entries = vec![
            LogEntry::new("1", "a", "2024-01-01").with_tags(["typescript"]),
            LogEntry::new("2", "b", "2024-01-01").with_tags(["rust"]),
        ];
        let found = search_by_tag(&entries, "Script");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
    }
}
