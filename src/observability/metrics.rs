//! Metrics collection and exposition.
//!
//! # Metrics
//! - `afloat_requests_total` (counter): inbound call requests by kind, status
//! - `afloat_request_duration_seconds` (histogram): end-to-end latency by kind
//! - `afloat_upstream_outcomes_total` (counter): upstream results by kind, outcome
//! - `afloat_upstream_duration_seconds` (histogram): upstream latency by kind
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus
//! recorder, so the pipeline records unconditionally.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

use crate::calls::CallKind;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one inbound call request.
pub fn record_request(kind: CallKind, status: u16, start: Instant) {
    metrics::counter!(
        "afloat_requests_total",
        "kind" => kind.as_str(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("afloat_request_duration_seconds", "kind" => kind.as_str())
        .record(start.elapsed().as_secs_f64());
}

/// Record one upstream call result.
pub fn record_upstream(kind: CallKind, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "afloat_upstream_outcomes_total",
        "kind" => kind.as_str(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("afloat_upstream_duration_seconds", "kind" => kind.as_str())
        .record(start.elapsed().as_secs_f64());
}
