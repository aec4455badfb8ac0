//! Response construction for the three terminal outcomes.
//!
//! # Responsibilities
//! - Relay the upstream body to the caller as a stream
//! - Map upstream transport failures to 500 with the error text as body
//! - Produce the fixed 404 for unmatched requests
//!
//! # Design Decisions
//! - By default the caller sees status 200 and none of the upstream headers,
//!   whatever the upstream answered; `propagate` relays both instead
//! - No buffering: the upstream body is wrapped, never collected

use axum::body::Body;
use axum::http::{Response as HttpResponse, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::BoxError;
use hyper::body::Bytes;

use crate::http::forward::ForwardError;

/// Body of every 404 response.
pub const NOT_FOUND_BODY: &str = "Not Found\n";

/// Terminal state of a proxied request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Upstream answered; its body was relayed.
    Success,
    /// Upstream could not be reached or did not answer in time.
    UpstreamError,
    /// No rule matched the request target.
    NotFound,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::UpstreamError => "upstream_error",
            Outcome::NotFound => "not_found",
        }
    }
}

/// Relay an upstream response to the caller.
pub fn relay<B>(upstream: HttpResponse<B>, propagate: bool) -> Response
where
    B: hyper::body::Body<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    let (parts, body) = upstream.into_parts();
    let body = Body::new(body);

    if propagate {
        Response::from_parts(parts, body)
    } else {
        Response::new(body)
    }
}

/// 500 carrying the error text.
pub fn upstream_error(err: &ForwardError) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
}

/// Fixed 404 for requests no rule matched.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::uri::Uri;
    use axum::http::Method;
    use std::time::Duration;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn upstream(status: StatusCode) -> HttpResponse<Body> {
        HttpResponse::builder()
            .status(status)
            .header("x-upstream", "yes")
            .body(Body::from("missing"))
            .unwrap()
    }

    #[tokio::test]
    async fn test_relay_discards_status_and_headers() {
        let response = relay(upstream(StatusCode::NOT_FOUND), false);

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("x-upstream").is_none());
        assert_eq!(body_string(response).await, "missing");
    }

    #[tokio::test]
    async fn test_relay_propagates_when_enabled() {
        let response = relay(upstream(StatusCode::NOT_FOUND), true);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["x-upstream"], "yes");
        assert_eq!(body_string(response).await, "missing");
    }

    #[tokio::test]
    async fn test_not_found() {
        let response = not_found();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, "Not Found\n");
    }

    #[tokio::test]
    async fn test_upstream_error_body_is_error_text() {
        let err = ForwardError::Timeout {
            method: Method::GET,
            url: Uri::from_static("http://localhost:9000/slow"),
            timeout: Duration::from_secs(3),
        };

        let response = upstream_error(&err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_string(response).await,
            "GET \"http://localhost:9000/slow\": no response from upstream within 3s"
        );
    }
}
