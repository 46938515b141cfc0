//! Route matching logic.
//!
//! # Responsibilities
//! - Match path prefix on whole segments (case-sensitive)
//!
//! # Design Decisions
//! - `/openai` matches `/openai` and `/openai/...`, never `/openai2`
//! - No regex to guarantee O(n) matching

/// Matches the request path against a literal prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns true if `path` is the prefix itself or a path below it.
    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Returns true if every path this matcher accepts is also accepted by
    /// `earlier`, i.e. `earlier` would always win if declared first.
    pub fn is_shadowed_by(&self, earlier: &PathPrefixMatcher) -> bool {
        earlier.matches(&self.prefix)
    }
}
