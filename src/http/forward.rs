//! Upstream forwarding.
//!
//! # Responsibilities
//! - Own the shared HTTP client used for every upstream call
//! - Issue exactly one attempt per request, with no retry
//! - Apply the optional connect and response-head deadlines
//!
//! # Design Decisions
//! - The client is cloned into every task; clones share one connection pool
//! - Transport failures become `ForwardError`, whose message is sent to the
//!   caller as the 500 body

use std::time::Duration;

use axum::body::Body;
use axum::http::uri::InvalidUri;
use axum::http::{Method, Request, Response, Uri};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::ForwardingConfig;
use crate::http::request::build_upstream_request;
use crate::routing::Rule;

/// Failure to obtain a response from the upstream.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("invalid upstream URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: InvalidUri,
    },

    #[error("{method} \"{url}\": {}", error_chain(.source))]
    Transport {
        method: Method,
        url: Uri,
        #[source]
        source: hyper_util::client::legacy::Error,
    },

    #[error("{method} \"{url}\": no response from upstream within {timeout:?}")]
    Timeout {
        method: Method,
        url: Uri,
        timeout: Duration,
    },
}

/// Render an error followed by each of its sources, separated by `: `.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Sends inbound requests to the upstream chosen by a rule.
#[derive(Clone)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    policy: ForwardingConfig,
}

impl Forwarder {
    pub fn new(policy: ForwardingConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(policy.connect_timeout());

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self { client, policy }
    }

    pub fn policy(&self) -> &ForwardingConfig {
        &self.policy
    }

    /// Forward `request` to `rule`'s upstream and return the upstream response.
    ///
    /// The response body is not read here; the caller streams it on.
    /// A configured request timeout bounds the wait for the response head only.
    pub async fn forward(&self, request: Request<Body>, rule: &Rule) -> Result<Response<Incoming>, ForwardError> {
        let outbound = build_upstream_request(request, rule)?;
        let method = outbound.method().clone();
        let url = outbound.uri().clone();

        tracing::info!(
            method = %method,
            url = %url,
            version = ?outbound.version(),
            "Forwarding to upstream"
        );

        let call = self.client.request(outbound);
        let result = match self.policy.request_timeout() {
            Some(timeout) => match tokio::time::timeout(timeout, call).await {
                Ok(result) => result,
                Err(_) => return Err(ForwardError::Timeout { method, url, timeout }),
            },
            None => call.await,
        };

        result.map_err(|source| ForwardError::Transport { method, url, source })
    }
}
