//! Upstream HTTP caller.
//!
//! # Responsibilities
//! - Issue exactly one GET per request (no retries, no custom headers)
//! - Classify the response by status code
//! - Drain the response body on every branch before returning

use axum::body::Bytes;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

use crate::config::UpstreamConfig;

/// Classified upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamOutcome {
    /// 200 with the CSV payload.
    Success(Bytes),
    /// 429.
    RateLimited,
    /// 401.
    Unauthorized,
    /// Any other status, with the body as text.
    OtherError { status: StatusCode, body: String },
}

impl UpstreamOutcome {
    /// Label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            UpstreamOutcome::Success(_) => "success",
            UpstreamOutcome::RateLimited => "rate_limited",
            UpstreamOutcome::Unauthorized => "unauthorized",
            UpstreamOutcome::OtherError { .. } => "other_error",
        }
    }
}

/// Errors that prevent a classified outcome.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, DNS, TLS or body read failure.
    ///
    /// Built through `From`, which strips the request URL: the URL path
    /// carries the API key.
    #[error("{0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        UpstreamError::Transport(e.without_url())
    }
}

/// Thin wrapper over a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
}

impl UpstreamClient {
    /// Build a client from upstream settings.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an existing client (custom proxy or TLS settings).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GET `url` and classify the response.
    pub async fn fetch(&self, url: &str) -> Result<UpstreamOutcome, UpstreamError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        let outcome = match status {
            StatusCode::OK => UpstreamOutcome::Success(response.bytes().await?),
            StatusCode::TOO_MANY_REQUESTS => {
                response.bytes().await?;
                UpstreamOutcome::RateLimited
            }
            StatusCode::UNAUTHORIZED => {
                response.bytes().await?;
                UpstreamOutcome::Unauthorized
            }
            status => UpstreamOutcome::OtherError {
                status,
                body: response.text().await?,
            },
        };

        Ok(outcome)
    }
}
