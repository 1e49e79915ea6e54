//! Typed client for the afloat gateway.

use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct CallRequest {
    pub days: i64,
}

/// JSON error body returned by the gateway itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum SdkError {
    /// Non-200 response; `body` is the raw response text.
    #[error("gateway returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl SdkError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SdkError::Status { status, .. } => Some(*status),
            SdkError::Http(e) => e.status(),
        }
    }

    /// The gateway's JSON error body, when the error carries one.
    pub fn error_body(&self) -> Option<ErrorBody> {
        match self {
            SdkError::Status { body, .. } => serde_json::from_str(body).ok(),
            SdkError::Http(_) => None,
        }
    }
}

pub struct GatewayClient {
    client: Client,
    gateway_url: String,
}

impl GatewayClient {
    pub fn new(gateway_url: &str) -> Self {
        Self::with_client(Client::new(), gateway_url)
    }

    pub fn with_client(client: Client, gateway_url: &str) -> Self {
        Self {
            client,
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
        }
    }

    /// Port calls for the last `days` days, as CSV.
    pub async fn port_calls(&self, days: i64) -> Result<Bytes, SdkError> {
        self.fetch_csv("/api/portcall", days).await
    }

    /// Berth calls for the last `days` days, as CSV.
    pub async fn berth_calls(&self, days: i64) -> Result<Bytes, SdkError> {
        self.fetch_csv("/api/berthcall", days).await
    }

    /// Gateway liveness (`GET /`).
    pub async fn ping(&self) -> Result<String, SdkError> {
        let resp = self.client.get(format!("{}/", self.gateway_url)).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if status != StatusCode::OK {
            return Err(SdkError::Status { status, body: text });
        }
        Ok(text)
    }

    async fn fetch_csv(&self, path: &str, days: i64) -> Result<Bytes, SdkError> {
        let resp = self
            .client
            .post(format!("{}{}", self.gateway_url, path))
            .json(&CallRequest { days })
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await?;
            return Err(SdkError::Status { status, body });
        }

        Ok(resp.bytes().await?)
    }
}
