//! Request target matching logic.
//!
//! # Responsibilities
//! - Compile path patterns once, at rule load time
//! - Search the raw request target (path + query) for a pattern
//!
//! # Design Decisions
//! - Unanchored search: a pattern matches if it occurs anywhere in the
//!   target. Rules anchor explicitly with `^` when they need a prefix.
//! - Matching runs against the target exactly as received, so percent
//!   escapes are seen undecoded.

use regex::Regex;

/// Trait for matching a raw request target against a condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the target satisfies this condition.
    fn matches(&self, target: &str) -> bool;
}

/// Matches a compiled regular expression anywhere in the target.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// Compile a pattern. Fails on invalid regular expression syntax.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// The pattern source as configured.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Matcher for RegexMatcher {
    fn matches(&self, target: &str) -> bool {
        self.regex.is_match(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchored_prefix() {
        let matcher = RegexMatcher::new("^/services/Stock").unwrap();
        assert!(matcher.matches("/services/Stock/quote?x=1"));
        assert!(!matcher.matches("/v2/services/Stock"));
    }

    #[test]
    fn test_unanchored_search() {
        let matcher = RegexMatcher::new("Stock").unwrap();
        assert!(matcher.matches("/services/Stock"));
        assert!(matcher.matches("/anything?symbol=Stock"));
        assert!(!matcher.matches("/services/stock")); // case sensitive
    }

    #[test]
    fn test_query_is_searched() {
        let matcher = RegexMatcher::new(r"[?&]debug=1").unwrap();
        assert!(matcher.matches("/api/items?page=2&debug=1"));
        assert!(!matcher.matches("/api/items?page=2"));
    }

    #[test]
    fn test_percent_escapes_are_not_decoded() {
        let matcher = RegexMatcher::new("^/files/a%20b$").unwrap();
        assert!(matcher.matches("/files/a%20b"));

        let decoded = RegexMatcher::new("^/files/a b$").unwrap();
        assert!(!decoded.matches("/files/a%20b"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(RegexMatcher::new("^/api/(unclosed").is_err());
    }
}
