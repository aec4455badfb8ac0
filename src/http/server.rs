//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the single catch-all proxy handler
//! - Wire up middleware (tracing)
//! - Dispatch requests to the routing engine
//! - Forward matched requests and relay the upstream response
//! - Record per-request outcome metrics

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    response::Response,
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::forward::Forwarder;
use crate::http::response::{self, Outcome};
use crate::observability::metrics;
use crate::routing::{request_target, Router as ProxyRouter, RuleSet, RuleSetError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ProxyRouter>,
    pub forwarder: Forwarder,
}

/// HTTP server for the reverse proxy.
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if the rule list is empty or any rule does not compile, so a
    /// server that exists always has a usable rule set.
    pub fn new(config: ProxyConfig) -> Result<Self, RuleSetError> {
        let rules = RuleSet::load(&config.proxy_rules)?;
        for (index, rule) in rules.iter().enumerate() {
            tracing::info!(index, pattern = rule.pattern(), upstream = rule.upstream(), "Loaded proxy rule");
        }

        let state = AppState {
            router: Arc::new(ProxyRouter::new(rules)),
            forwarder: Forwarder::new(config.forwarding.clone()),
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The fallback catches targets that are not paths (`CONNECT host:port`,
    /// `OPTIONS *`) so they are matched against the rules as well.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .fallback(proxy_handler)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered application, for driving in-process.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main proxy handler.
/// Matches the raw request target against the rules and forwards on first match.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let target = request_target(request.uri()).to_string();

    let Some(rule) = state.router.match_request(&request) else {
        tracing::warn!(method = %method, target = %target, "No rule matched, writing not found");
        metrics::record_request(&method, Outcome::NotFound, 404, start_time);
        return response::not_found();
    };

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();
    tracing::info!(
        host = %host,
        method = %method,
        target = %target,
        version = ?request.version(),
        pattern = rule.pattern(),
        "Incoming request"
    );

    match state.forwarder.forward(request, rule).await {
        Ok(upstream) => {
            let propagate = state.forwarder.policy().propagate_upstream_status;
            tracing::debug!(upstream_status = %upstream.status(), propagate, "Upstream responded");

            let response = response::relay(upstream, propagate);
            metrics::record_request(&method, Outcome::Success, response.status().as_u16(), start_time);
            response
        }
        Err(e) => {
            tracing::error!(method = %method, target = %target, error = %e, "Upstream request failed");
            metrics::record_request(&method, Outcome::UpstreamError, 500, start_time);
            response::upstream_error(&e)
        }
    }
}
