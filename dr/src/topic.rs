//! Topic identifiers
//!
//! A topic is a slash-separated relative path without extension, e.g.
//! `express/middleware`. Appending [`ADVANCED_MARKER`] names the advanced
//! companion document (`express/middleware.adv`).

use std::fmt;
use std::path::{Component, Path};

use tracing::debug;

use crate::error::DocError;

/// Suffix that marks a topic as explicitly requesting the advanced document
pub const ADVANCED_MARKER: &str = ".adv";

/// File extension of every document in the content store
pub const DOC_EXTENSION: &str = ".md";

/// A normalized, validated topic identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic(String);

impl Topic {
    /// Normalize and validate raw user input.
    ///
    /// Returns `Ok(None)` when nothing is left after normalization; the caller
    /// should show help instead of performing a lookup.
    pub fn parse(raw: &str) -> Result<Option<Self>, DocError> {
        debug!(%raw, "Topic::parse: called");
        let normalized = normalize(raw);
        if normalized.is_empty() {
            debug!("Topic::parse: empty after normalization");
            return Ok(None);
        }

        validate(normalized)?;
        Ok(Some(Self(normalized.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the caller typed the advanced marker themselves
    pub fn is_advanced(&self) -> bool {
        self.0.ends_with(ADVANCED_MARKER)
    }

    /// The topic identifier that requests this topic's advanced companion
    pub fn advanced(&self) -> String {
        format!("{}{}", self.0, ADVANCED_MARKER)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn normalize(raw: &str) -> &str {
    let mut topic = raw.trim();
    if let Some(rest) = topic.strip_prefix("./") {
        topic = rest;
    }
    // `dr express/middleware.md` means the same as `dr express/middleware`
    match topic.strip_suffix(DOC_EXTENSION) {
        Some(stem) if !stem.is_empty() => stem,
        _ => topic,
    }
}

fn validate(topic: &str) -> Result<(), DocError> {
    let invalid = |reason: &'static str| -> Result<(), DocError> {
        debug!(%topic, reason, "validate: rejecting topic");
        Err(DocError::InvalidTopic {
            topic: topic.to_string(),
            reason,
        })
    };

    if topic.contains('\0') {
        return invalid("NUL bytes are not allowed");
    }
    if topic.contains('\\') {
        return invalid("backslashes are not allowed; use '/' between segments");
    }
    if Path::new(topic)
        .components()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
    {
        return invalid("absolute paths are not allowed");
    }

    for segment in topic.split('/') {
        match segment {
            "" => return invalid("empty path segments are not allowed"),
            "." => return invalid("'.' segments are not allowed"),
            ".." => return invalid("parent directory segments are not allowed"),
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(raw: &str) -> Topic {
        Topic::parse(raw).unwrap().unwrap()
    }

    #[test]
    fn test_parse_plain_topic() {
        let topic = parse("express/middleware");
        assert_eq!(topic.as_str(), "express/middleware");
        assert!(!topic.is_advanced());
        assert_eq!(topic.advanced(), "express/middleware.adv");
    }

    #[test]
    fn test_parse_advanced_topic() {
        let topic = parse("express/middleware.adv");
        assert!(topic.is_advanced());
    }

    #[test]
    fn test_parse_empty_is_help() {
        assert!(Topic::parse("").unwrap().is_none());
        assert!(Topic::parse("   ").unwrap().is_none());
        assert!(Topic::parse("./").unwrap().is_none());
    }

    #[test]
    fn test_normalization() {
        assert_eq!(parse("  cli/usage \n").as_str(), "cli/usage");
        assert_eq!(parse("./cli/usage").as_str(), "cli/usage");
        assert_eq!(parse("cli/usage.md").as_str(), "cli/usage");
        assert_eq!(parse("cli/usage.adv.md").as_str(), "cli/usage.adv");
        // a bare extension is left alone rather than collapsing to help
        assert_eq!(parse(".md").as_str(), ".md");
    }

    #[test]
    fn test_rejects_traversal() {
        for raw in ["..", "../secret", "express/../../etc/passwd", "a/.."] {
            let err = Topic::parse(raw).unwrap_err();
            assert!(
                matches!(err, DocError::InvalidTopic { .. }),
                "expected InvalidTopic for {raw:?}"
            );
        }
    }

    #[test]
    fn test_rejects_malformed_paths() {
        for raw in ["/etc/passwd", "a//b", "a/", "a/./b", "a\\b", "a\0b"] {
            assert!(Topic::parse(raw).is_err(), "expected rejection for {raw:?}");
        }
    }

    #[test]
    fn test_allows_dots_inside_segments() {
        assert_eq!(parse("v1.2/notes").as_str(), "v1.2/notes");
        assert_eq!(parse("...ellipsis").as_str(), "...ellipsis");
    }

    proptest! {
        #[test]
        fn prop_parent_segment_always_rejected(
            prefix in "[a-z]{1,8}(/[a-z]{1,8}){0,2}",
            suffix in "[a-z]{1,8}",
        ) {
            let raw = format!("{prefix}/../{suffix}");
            prop_assert!(
                matches!(Topic::parse(&raw), Err(DocError::InvalidTopic { .. })),
                "expected InvalidTopic"
            );
        }

        #[test]
        fn prop_simple_paths_round_trip(raw in "[a-z][a-z0-9_-]{0,8}(/[a-z][a-z0-9_-]{0,8}){0,3}") {
            let topic = Topic::parse(&raw).unwrap().unwrap();
            prop_assert_eq!(topic.as_str(), raw.as_str());
        }
    }
}
