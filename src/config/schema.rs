//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.
//! Keys are PascalCase on the wire (`ProxyRules`, `RequestPathRegex`, ...).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the reverse proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct ProxyConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Ordered routing rules. The first rule whose pattern matches wins.
    pub proxy_rules: Vec<RuleConfig>,

    /// Upstream forwarding policy.
    pub forwarding: ForwardingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListenerConfig {
    /// Host name or address to listen on.
    pub host: String,

    /// Port to listen on. Port 0 asks the OS for an ephemeral port.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
        }
    }
}

/// A single routing rule as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleConfig {
    /// Regular expression searched (unanchored) in the raw request target.
    pub request_path_regex: String,

    /// Upstream base URL, scheme and authority only (e.g. `http://localhost:9000`).
    pub forward_to: String,
}

impl RuleConfig {
    pub fn new(request_path_regex: impl Into<String>, forward_to: impl Into<String>) -> Self {
        Self {
            request_path_regex: request_path_regex.into(),
            forward_to: forward_to.into(),
        }
    }
}

/// Forwarding policy applied to every upstream call.
///
/// The defaults reproduce the plain pass-through behaviour: no deadlines,
/// status always 200 on success and no upstream headers relayed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ForwardingConfig {
    /// Relay the upstream status code and headers instead of a bare 200.
    pub propagate_upstream_status: bool,

    /// Deadline in seconds for the upstream response head.
    pub request_timeout_secs: Option<u64>,

    /// Deadline in seconds for establishing the upstream TCP connection.
    pub connect_timeout_secs: Option<u64>,
}

impl ForwardingConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
