//! Request size limits.
//!
//! Bodies above `security.max_body_size` are rejected with 413 before the
//! JSON decoder runs.

use tower_http::limit::RequestBodyLimitLayer;

use crate::config::SecurityConfig;

pub fn body_limit_layer(security: &SecurityConfig) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(security.max_body_size)
}
