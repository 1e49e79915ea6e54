//! Global error handler.
//!
//! Every error raised while serving a request ends up here and becomes a
//! JSON `{"success": false, "message": ...}` response. Only errors with a
//! known meaning get a specific status; the rest are client errors (400).

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::calls::{CallError, UpstreamError};
use crate::http::response::error_response;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Call(#[from] CallError),

    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Call(CallError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Call(CallError::MissingConfiguration(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            // Upstream unreachable is reported as a client error, like any
            // other error without a dedicated status.
            ApiError::Call(CallError::Upstream(UpstreamError::Transport(_))) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }
        error_response(status, self.to_string())
    }
}
