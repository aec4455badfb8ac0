//! Structured logging.
//!
//! `RUST_LOG` wins when set; otherwise the level given on the command line
//! applies to this crate and to `tower_http`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives for `level` when `RUST_LOG` is not set.
pub fn default_filter(level: &str) -> String {
    format!("rule_proxy={level},tower_http={level}")
}

/// Install the global tracing subscriber.
pub fn init_logging(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
