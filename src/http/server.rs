//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, security headers, limits)
//! - Bind server to listener
//! - Stop on OS signal or on the embedder's shutdown handle

use axum::{
    body::Body,
    http::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::calls::{CallPipeline, UpstreamClient};
use crate::config::GatewayConfig;
use crate::http::handlers::{berth_call, port_call, root};
use crate::http::request::{request_id_header, UuidRequestId};
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::tracing::make_request_span;
use crate::security::headers::{cors_layer, with_security_headers};
use crate::security::limits::body_limit_layer;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: CallPipeline,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = UpstreamClient::new(&config.upstream)?;
        let pipeline = CallPipeline::new(Arc::new(config), client);
        Ok(Self::with_pipeline(pipeline))
    }

    /// Create a server around an existing pipeline (custom client or clock).
    pub fn with_pipeline(pipeline: CallPipeline) -> Self {
        let config = Arc::clone(pipeline.config());
        let router = Self::build_router(&config, AppState { pipeline });
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let router = Router::new()
            .route("/", get(root))
            .route("/api/portcall", post(port_call))
            .route("/api/berthcall", post(berth_call))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(request_id_header(), UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        make_request_span(request)
                    }))
                    .layer(PropagateRequestIdLayer::new(request_id_header()))
                    .layer(body_limit_layer(&config.security))
                    .layer(cors_layer(&config.security)),
            );

        if config.security.enable_headers {
            with_security_headers(router)
        } else {
            router
        }
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once a shutdown is requested and in-flight requests finished.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {}
                    _ = shutdown.recv() => {
                        tracing::info!("Shutdown requested");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
