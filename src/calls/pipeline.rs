//! The shared port-call / berth-call pipeline.
//!
//! validate → resolve credentials → build query → call upstream
//!
//! The outcome is returned unrendered; the HTTP layer maps it to a
//! response. Nothing here is mutated per request.

use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use crate::calls::kind::CallKind;
use crate::calls::query::{Clock, SystemClock, UpstreamQuery};
use crate::calls::request::{CallRequest, ValidationViolation};
use crate::calls::upstream::{UpstreamClient, UpstreamError, UpstreamOutcome};
use crate::config::loader::BASE_URL_ENV;
use crate::config::GatewayConfig;
use crate::observability::metrics;

/// Errors that stop the pipeline before an upstream outcome exists.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("{}", crate::calls::request::violation_message(.0))]
    Validation(Vec<ValidationViolation>),

    #[error("{0} environment variable not set")]
    MissingConfiguration(&'static str),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Values the upstream call needs for one call kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCredentials<'a> {
    pub base_url: &'a str,
    pub api_key: &'a str,
}

/// Look up the API key for `kind` and the shared base URL.
pub fn resolve_credentials(config: &GatewayConfig, kind: CallKind) -> Result<ResolvedCredentials<'_>, CallError> {
    let api_key = kind
        .api_key(&config.credentials)
        .filter(|k| !k.is_empty())
        .ok_or(CallError::MissingConfiguration(kind.api_key_env()))?;

    let base_url = config
        .upstream
        .base_url
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or(CallError::MissingConfiguration(BASE_URL_ENV))?;

    Ok(ResolvedCredentials { base_url, api_key })
}

/// Immutable pipeline shared by every request.
#[derive(Clone)]
pub struct CallPipeline {
    config: Arc<GatewayConfig>,
    client: UpstreamClient,
    clock: Arc<dyn Clock>,
}

impl CallPipeline {
    pub fn new(config: Arc<GatewayConfig>, client: UpstreamClient) -> Self {
        Self::with_clock(config, client, Arc::new(SystemClock))
    }

    pub fn with_clock(config: Arc<GatewayConfig>, client: UpstreamClient, clock: Arc<dyn Clock>) -> Self {
        Self { config, client, clock }
    }

    pub fn config(&self) -> &Arc<GatewayConfig> {
        &self.config
    }

    /// Run one request through the pipeline.
    pub async fn run(&self, kind: CallKind, request: &CallRequest) -> Result<UpstreamOutcome, CallError> {
        let days = request.validated_days().map_err(|violations| {
            tracing::debug!(kind = %kind, violations = violations.len(), "Rejected call request");
            CallError::Validation(violations)
        })?;

        let credentials = resolve_credentials(&self.config, kind).map_err(|e| {
            tracing::error!(kind = %kind, error = %e, "Upstream not configured");
            e
        })?;

        let query = UpstreamQuery::new(
            kind,
            credentials.base_url,
            credentials.api_key,
            self.clock.now(),
            days,
        );

        tracing::debug!(kind = %kind, days, url = %query.redacted_url(), "Calling upstream");

        let start = Instant::now();
        match self.client.fetch(&query.url()).await {
            Ok(outcome) => {
                tracing::info!(
                    kind = %kind,
                    days,
                    outcome = outcome.label(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream responded"
                );
                metrics::record_upstream(kind, outcome.label(), start);
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(kind = %kind, error = %e, "Upstream request failed");
                metrics::record_upstream(kind, "transport_failure", start);
                Err(e.into())
            }
        }
    }
}
