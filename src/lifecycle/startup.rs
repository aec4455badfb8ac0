//! Startup orchestration.
//!
//! # Responsibilities
//! - Compile the rule set
//! - Start the optional metrics endpoint
//! - Bind the listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener is bound last, so a bad rule set never opens a port

use std::net::{AddrParseError, SocketAddr};

use tokio::net::TcpListener;

use crate::config::ProxyConfig;
use crate::http::HttpServer;
use crate::observability::metrics;
use crate::routing::RuleSetError;

/// Fatal startup failures.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid proxy rules: {0}")]
    Rules(#[from] RuleSetError),

    #[error("invalid metrics address {address:?}: {source}")]
    MetricsAddress {
        address: String,
        #[source]
        source: AddrParseError,
    },

    #[error("failed to start metrics endpoint: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Build the server and bind its listener, in that order.
pub async fn start(config: ProxyConfig) -> Result<(HttpServer, TcpListener), StartupError> {
    let server = HttpServer::new(config)?;

    let observability = &server.config().observability;
    if observability.metrics_enabled {
        let addr: SocketAddr = observability
            .metrics_address
            .parse()
            .map_err(|source| StartupError::MetricsAddress {
                address: observability.metrics_address.clone(),
                source,
            })?;
        metrics::init_metrics(addr)?;
    }

    let address = server.config().listener.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    tracing::info!(
        address = %address,
        rules = server.config().proxy_rules.len(),
        "Listening for connections"
    );

    Ok((server, listener))
}
