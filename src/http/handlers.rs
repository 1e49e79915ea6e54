//! Route handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use std::time::Instant;

use crate::calls::{CallKind, CallRequest};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;

/// `GET /`
pub async fn root() -> &'static str {
    "Hello, World!"
}

/// `POST /api/portcall`
pub async fn port_call(
    State(state): State<AppState>,
    payload: Result<Json<CallRequest>, JsonRejection>,
) -> Response {
    relay(&state, CallKind::PortCall, payload).await
}

/// `POST /api/berthcall`
pub async fn berth_call(
    State(state): State<AppState>,
    payload: Result<Json<CallRequest>, JsonRejection>,
) -> Response {
    relay(&state, CallKind::BerthCall, payload).await
}

async fn relay(
    state: &AppState,
    kind: CallKind,
    payload: Result<Json<CallRequest>, JsonRejection>,
) -> Response {
    let start = Instant::now();

    let response = match call(state, kind, payload).await {
        Ok(outcome) => outcome.into_response(),
        Err(e) => e.into_response(),
    };

    metrics::record_request(kind, response.status().as_u16(), start);
    response
}

async fn call(
    state: &AppState,
    kind: CallKind,
    payload: Result<Json<CallRequest>, JsonRejection>,
) -> Result<crate::calls::UpstreamOutcome, ApiError> {
    let Json(request) = payload?;
    Ok(state.pipeline.run(kind, &request).await?)
}
