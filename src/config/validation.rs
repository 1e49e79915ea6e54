//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (port > 0, parseable addresses)
//! - Check the upstream base URL is an absolute http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Missing credentials are not errors: the request pipeline reports them
//!   per call with a 500, so a half-configured gateway still serves the
//!   resources it has keys for

use std::net::{SocketAddr, ToSocketAddrs};
use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.port must be non-zero")]
    ZeroPort,

    #[error("listener address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("upstream.base_url '{url}' is invalid: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("upstream.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.metrics_address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    let bind_address = config.listener.bind_address();
    // Resolves hostnames such as `localhost`; IP literals need no lookup.
    if bind_address.to_socket_addrs().map_or(true, |mut addrs| addrs.next().is_none()) {
        errors.push(ValidationError::InvalidBindAddress(bind_address));
    }

    if let Some(base_url) = config.upstream.base_url.as_deref().filter(|u| !u.is_empty()) {
        match url::Url::parse(base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => errors.push(ValidationError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
