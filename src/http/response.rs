//! Response relay.
//!
//! Maps a classified upstream outcome onto the client response:
//!
//! | Outcome        | Status   | Body                 |
//! |----------------|----------|----------------------|
//! | Success        | 200      | CSV bytes (text/csv) |
//! | RateLimited    | 429      | "Too Many Requests"  |
//! | Unauthorized   | 401      | "Unauthorized"       |
//! | OtherError     | upstream | upstream body        |

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::calls::UpstreamOutcome;

pub const TEXT_CSV: &str = "text/csv";

impl IntoResponse for UpstreamOutcome {
    fn into_response(self) -> Response {
        match self {
            UpstreamOutcome::Success(csv) => {
                (StatusCode::OK, [(header::CONTENT_TYPE, TEXT_CSV)], csv).into_response()
            }
            UpstreamOutcome::RateLimited => {
                (StatusCode::TOO_MANY_REQUESTS, "Too Many Requests").into_response()
            }
            UpstreamOutcome::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
            UpstreamOutcome::OtherError { status, body } => (status, body).into_response(),
        }
    }
}

/// JSON body of every error produced by the gateway itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Render an error status with the standard JSON body.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}
