//! Upstream request construction.
//!
//! # Responsibilities
//! - Rewrite the target URL to `upstream base + raw request target`
//! - Copy the method and every header value
//! - Hand the inbound body stream through unread
//!
//! # Design Decisions
//! - The inbound `Host` header is not copied; the client derives `Host`
//!   from the upstream URL
//! - Outbound requests use the client's default HTTP version rather than
//!   the inbound one

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, Uri};

use crate::http::forward::ForwardError;
use crate::routing::{request_target, Rule};

/// Build the outbound request for `rule` from an inbound request.
pub fn build_upstream_request(request: Request<Body>, rule: &Rule) -> Result<Request<Body>, ForwardError> {
    let (parts, body) = request.into_parts();

    let url = rule.upstream_url(request_target(&parts.uri));
    let uri = Uri::try_from(url.as_str()).map_err(|source| ForwardError::InvalidUrl { url, source })?;

    let mut outbound = Request::new(body);
    *outbound.method_mut() = parts.method;
    *outbound.uri_mut() = uri;
    copy_headers(&parts.headers, outbound.headers_mut());

    Ok(outbound)
}

/// Append every value of every header except `Host`.
pub fn copy_headers(from: &HeaderMap, to: &mut HeaderMap) {
    for (name, value) in from.iter() {
        if name == header::HOST {
            continue;
        }
        to.append(name.clone(), value.clone());
    }
}
