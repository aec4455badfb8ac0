//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every rule pattern compiles and every upstream is a bare origin
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::ProxyConfig;
use crate::routing::matcher::RegexMatcher;
use crate::routing::rules::{parse_upstream_base, UpstreamBaseError};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("ProxyRules is empty")]
    NoRules,

    #[error("ProxyRules[{index}].RequestPathRegex {pattern:?} does not compile: {reason}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        reason: String,
    },

    #[error("ProxyRules[{index}].ForwardTo {upstream:?} is invalid: {reason}")]
    InvalidUpstream {
        index: usize,
        upstream: String,
        reason: UpstreamBaseError,
    },

    #[error("Listener.Host must not be empty")]
    EmptyHost,

    #[error("Forwarding.{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("Observability.MetricsAddress {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.proxy_rules.is_empty() {
        errors.push(ValidationError::NoRules);
    }

    for (index, rule) in config.proxy_rules.iter().enumerate() {
        if let Err(e) = RegexMatcher::new(&rule.request_path_regex) {
            errors.push(ValidationError::InvalidPattern {
                index,
                pattern: rule.request_path_regex.clone(),
                reason: e.to_string(),
            });
        }
        if let Err(reason) = parse_upstream_base(&rule.forward_to) {
            errors.push(ValidationError::InvalidUpstream {
                index,
                upstream: rule.forward_to.clone(),
                reason,
            });
        }
    }

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    if config.forwarding.request_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout { field: "RequestTimeoutSecs" });
    }
    if config.forwarding.connect_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout { field: "ConnectTimeoutSecs" });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
