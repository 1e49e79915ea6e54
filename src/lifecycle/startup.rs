//! Startup orchestration.
//!
//! Config is already loaded and logging installed by the time [`run`] is
//! called. Any failure here is fatal: the process exits non-zero.

use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::calls::CallKind;
use crate::config::loader::BASE_URL_ENV;
use crate::config::GatewayConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Log what the gateway will be unable to serve.
pub fn warn_missing_credentials(config: &GatewayConfig) {
    if config.upstream.base_url.as_deref().unwrap_or_default().is_empty() {
        tracing::warn!(variable = BASE_URL_ENV, "Upstream base URL not configured; call endpoints will return 500");
    }
    for kind in [CallKind::PortCall, CallKind::BerthCall] {
        if kind.api_key(&config.credentials).unwrap_or_default().is_empty() {
            tracing::warn!(kind = %kind, variable = kind.api_key_env(), "API key not configured; endpoint will return 500");
        }
    }
}

/// Start metrics, bind the listener and serve until shutdown.
pub async fn run(config: GatewayConfig) -> Result<(), StartupError> {
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream_timeout_secs = ?config.upstream.timeout_secs,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );
    warn_missing_credentials(&config);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let address = config.listener.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    let server = HttpServer::new(config)?;

    // Only OS signals stop the process; the handle lives until then.
    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
