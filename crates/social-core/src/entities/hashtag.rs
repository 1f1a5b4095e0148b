//! Hashtag entity and extraction from post content

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::value_objects::Snowflake;

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("hashtag pattern is valid"));

/// Hashtag, stored lowercase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hashtag {
    pub id: Snowflake,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Hashtag with the number of live posts using it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashtagCount {
    pub hashtag: Hashtag,
    pub posts_count: i64,
}

/// Extract `#word` tokens, lowercased, first occurrence order, no duplicates.
///
/// Word characters are Unicode-aware, so `#café` and `#東京` are whole tags.
pub fn extract_hashtags(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    HASHTAG_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// Normalize a user-supplied tag: trims, drops a leading `#`, lowercases
pub fn normalize_hashtag(tag: &str) -> String {
    tag.trim().trim_start_matches('#').to_lowercase()
}
