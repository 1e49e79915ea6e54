//! Request spans.
//!
//! Every inbound request gets a span carrying its method, path and the
//! `x-request-id` assigned by the request-id middleware, so pipeline events
//! can be correlated with the access log.

use axum::http::Request;
use tracing::Span;

use crate::http::request::X_REQUEST_ID;

/// `MakeSpan` function for `TraceLayer`.
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}
