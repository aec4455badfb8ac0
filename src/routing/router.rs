//! Route lookup.
//!
//! # Responsibilities
//! - Own the compiled rule set
//! - Look up the first rule matching a request target
//! - Return the matched rule or an explicit no-match (`None`)
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in declaration order; the first match wins
//! - No-match is a normal outcome, not an error

use axum::http::{Request, Uri};

use crate::routing::rules::{Rule, RuleSet};

/// The raw request target: path and query exactly as received, or the
/// authority for an authority-form target (`CONNECT host:port`).
pub fn request_target(uri: &Uri) -> &str {
    if let Some(pq) = uri.path_and_query() {
        return pq.as_str();
    }
    match (uri.scheme(), uri.authority()) {
        (None, Some(authority)) => authority.as_str(),
        _ => "/",
    }
}

/// Immutable router over an ordered rule set.
#[derive(Debug, Clone)]
pub struct Router {
    rules: RuleSet,
}

impl Router {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// First rule whose pattern occurs in `target`, or `None`.
    pub fn match_target(&self, target: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(target))
    }

    /// Match a request by its raw target.
    pub fn match_request<B>(&self, req: &Request<B>) -> Option<&Rule> {
        self.match_target(request_target(req.uri()))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}
