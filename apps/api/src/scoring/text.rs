//! Text normalization shared by the category and description passes.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static RE_HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

static RE_NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9+]+").unwrap());

/// Replaces every `<...>` tag with a single space. Entities are left alone.
pub fn strip_html(html: &str) -> String {
    RE_HTML_TAG.replace_all(html, " ").into_owned()
}

/// Lower-cases a field value or preference term for comparison.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Splits text into word tokens.
///
/// Runs of anything outside `[a-z0-9+]` (after lower-casing) collapse to a single
/// separator, so `"C++/Rust, SQL"` yields `["c++", "rust", "sql"]`.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = normalize(text);
    RE_NON_WORD
        .replace_all(&lowered, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

pub fn word_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_replaces_tags_with_space() {
        assert_eq!(strip_html("<p>React</p><b>GraphQL</b>"), " React  GraphQL ");
    }

    #[test]
    fn test_strip_html_leaves_plain_text() {
        assert_eq!(strip_html("no markup here"), "no markup here");
    }

    #[test]
    fn test_tokenize_keeps_plus_and_digits() {
        assert_eq!(tokenize("C++/Rust, SQL 2019"), vec!["c++", "rust", "sql", "2019"]);
    }

    #[test]
    fn test_tokenize_drops_empty_tokens() {
        assert!(tokenize("  --  ").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_splits_on_underscore_and_hyphen() {
        assert_eq!(tokenize("full_time part-time"), vec!["full", "time", "part", "time"]);
    }

    #[test]
    fn test_word_set_deduplicates() {
        let set = word_set("Rust rust RUST");
        assert_eq!(set.len(), 1);
        assert!(set.contains("rust"));
    }
}
