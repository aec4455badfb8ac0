//! Compiled routing rules.
//!
//! # Responsibilities
//! - Compile each configured pattern and validate each upstream base
//! - Preserve declaration order (first match wins)
//! - Reject an empty rule list
//!
//! # Design Decisions
//! - A `RuleSet` has no mutators; it is built once and shared read-only
//! - Upstream bases are stored without a trailing `/` so that appending the
//!   request target never produces `//`

use url::Url;

use crate::config::RuleConfig;
use crate::routing::matcher::{Matcher, RegexMatcher};

/// Fatal rule loading errors. Any of these prevents the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    #[error("there are no proxy rules, please add rules to the configuration")]
    Empty,

    #[error("rule {index}: invalid RequestPathRegex {pattern:?}: {source}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule {index}: invalid ForwardTo {upstream:?}: {source}")]
    InvalidUpstream {
        index: usize,
        upstream: String,
        #[source]
        source: UpstreamBaseError,
    },
}

/// Reasons an upstream base URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamBaseError {
    #[error("not a valid URL: {0}")]
    Parse(#[from] url::ParseError),

    #[error("unsupported scheme {0:?}, only http is supported")]
    UnsupportedScheme(String),

    #[error("missing host")]
    MissingHost,

    #[error("must not contain a path, found {0:?}")]
    HasPath(String),

    #[error("must not contain a query or fragment")]
    HasQueryOrFragment,
}

/// Validate an upstream base and return its normalized form without a
/// trailing slash. Whitespace, tabs and dot segments that `Url` discards
/// are gone from the returned string too.
pub fn parse_upstream_base(upstream: &str) -> Result<String, UpstreamBaseError> {
    let url = Url::parse(upstream)?;

    if url.scheme() != "http" {
        return Err(UpstreamBaseError::UnsupportedScheme(url.scheme().to_string()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(UpstreamBaseError::MissingHost);
    }
    if url.path() != "/" {
        return Err(UpstreamBaseError::HasPath(url.path().to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(UpstreamBaseError::HasQueryOrFragment);
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// A path pattern paired with the upstream it forwards to.
#[derive(Debug, Clone)]
pub struct Rule {
    matcher: RegexMatcher,
    upstream: String,
}

impl Rule {
    /// Compile a single rule. `index` is its position, used in error reports.
    pub fn compile(index: usize, config: &RuleConfig) -> Result<Self, RuleSetError> {
        let matcher = RegexMatcher::new(&config.request_path_regex).map_err(|source| {
            RuleSetError::InvalidPattern {
                index,
                pattern: config.request_path_regex.clone(),
                source,
            }
        })?;

        let upstream = parse_upstream_base(&config.forward_to).map_err(|source| {
            RuleSetError::InvalidUpstream {
                index,
                upstream: config.forward_to.clone(),
                source,
            }
        })?;

        Ok(Self { matcher, upstream })
    }

    /// The configured pattern.
    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }

    /// The upstream base, without trailing slash.
    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    /// True if the pattern occurs anywhere in `target`.
    pub fn matches(&self, target: &str) -> bool {
        self.matcher.matches(target)
    }

    /// Upstream base followed by the raw request target.
    pub fn upstream_url(&self, target: &str) -> String {
        format!("{}{}", self.upstream, target)
    }
}

/// Ordered, immutable collection of rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compile every rule in declaration order.
    ///
    /// Fails on an empty list, on the first pattern that does not compile,
    /// or on the first upstream base that is not a bare `http` origin.
    pub fn load(configs: &[RuleConfig]) -> Result<Self, RuleSetError> {
        if configs.is_empty() {
            return Err(RuleSetError::Empty);
        }

        let rules = configs
            .iter()
            .enumerate()
            .map(|(index, config)| Rule::compile(index, config))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
