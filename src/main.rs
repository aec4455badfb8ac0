//! Rule-based HTTP reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │               RULE PROXY                     │
//!                      │                                              │
//!   Client Request     │  ┌─────────┐    ┌──────────┐                 │
//!   ───────────────────┼─▶│  http   │───▶│ routing  │── no match ──▶ 404
//!                      │  │ server  │    │ (regex,  │                 │
//!                      │  └─────────┘    │  ordered)│                 │
//!                      │                 └────┬─────┘                 │
//!                      │                      │ first match           │
//!                      │                      ▼                       │
//!   Client Response    │  ┌─────────┐    ┌──────────┐                 │
//!   ◀──────────────────┼──│response │◀───│ forward  │◀────────────────┼─── Upstream
//!                      │  │200 / 500│    │ (1 try)  │                 │
//!                      │  └─────────┘    └──────────┘                 │
//!                      │                                              │
//!                      │  config · lifecycle · observability          │
//!                      └──────────────────────────────────────────────┘
//! ```

use clap::Parser;

use rule_proxy::cli::Cli;
use rule_proxy::config::load_config;
use rule_proxy::lifecycle::{self, Shutdown};
use rule_proxy::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logging::init_logging(&logging::default_filter(&cli.log_level));

    tracing::info!("rule-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %cli.conf.display(), "Reading proxy rules");

    let mut config = load_config(&cli.conf).inspect_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
    })?;
    cli.apply(&mut config);

    tracing::info!(
        rules = config.proxy_rules.len(),
        propagate_upstream_status = config.forwarding.propagate_upstream_status,
        "Configuration loaded"
    );

    let (server, listener) = lifecycle::start(config).await.inspect_err(|e| {
        tracing::error!(error = %e, "Startup failed");
    })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        lifecycle::signals::wait_for_shutdown_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
