//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes in declaration order
//! - Look up the first route whose prefix matches a path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) path prefix scan (acceptable for typical route counts)
//! - Explicit `None` rather than silent default
//! - Overlaps are reported, never reordered

use crate::config::{RewriteRule, RouteConfig};
use crate::routing::matcher::PathPrefixMatcher;

/// A compiled prefix route.
#[derive(Debug, Clone)]
pub struct Route {
    matcher: PathPrefixMatcher,
    target: String,
    rewrite: RewriteRule,
}

impl Route {
    pub fn new(prefix: impl Into<String>, target: impl Into<String>, rewrite: RewriteRule) -> Self {
        Self {
            matcher: PathPrefixMatcher::new(prefix),
            target: target.into(),
            rewrite,
        }
    }

    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    /// Upstream base address, as configured.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn rewrite(&self) -> RewriteRule {
        self.rewrite
    }
}

impl From<&RouteConfig> for Route {
    fn from(config: &RouteConfig) -> Self {
        Route::new(config.prefix.clone(), config.target.clone(), config.rewrite)
    }
}

/// The result of a successful lookup.
#[derive(Debug, Clone, Copy)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
}

impl<'a> RouteMatch<'a> {
    pub fn prefix(&self) -> &'a str {
        self.route.prefix()
    }

    pub fn target(&self) -> &'a str {
        self.route.target()
    }
}

/// A later route that can never match because an earlier one always wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shadowed {
    pub prefix: String,
    pub shadowed_by: String,
}

/// Ordered, immutable prefix table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Compile the configured routes, preserving declaration order.
    pub fn from_config(configs: &[RouteConfig]) -> Self {
        Self::new(configs.iter().map(Route::from).collect())
    }

    /// First route (in declaration order) whose prefix matches `path`.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.routes
            .iter()
            .find(|route| route.matcher.matches(path))
            .map(|route| RouteMatch { route })
    }

    /// Routes whose prefix lies below an earlier prefix (e.g. `/a` then `/a/b`).
    pub fn shadowed(&self) -> Vec<Shadowed> {
        let mut shadowed = Vec::new();
        for (i, later) in self.routes.iter().enumerate() {
            if let Some(earlier) = self.routes[..i]
                .iter()
                .find(|earlier| later.matcher.is_shadowed_by(&earlier.matcher))
            {
                shadowed.push(Shadowed {
                    prefix: later.prefix().to_string(),
                    shadowed_by: earlier.prefix().to_string(),
                });
            }
        }
        shadowed
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
