//! Upstream resource selection.

use crate::config::loader::{BERTH_CALL_API_KEY_ENV, PORT_CALL_API_KEY_ENV};
use crate::config::CredentialsConfig;

/// Which upstream resource a call targets.
///
/// Port calls and berth calls share the request shape and the pipeline;
/// they differ only in resource path, API version and API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    PortCall,
    BerthCall,
}

impl CallKind {
    /// Path segment of the upstream resource.
    pub fn resource_path(&self) -> &'static str {
        match self {
            CallKind::PortCall => "portcalls",
            CallKind::BerthCall => "berth-calls",
        }
    }

    /// Value of the upstream `v` query parameter.
    pub fn api_version(&self) -> u8 {
        match self {
            CallKind::PortCall => 6,
            CallKind::BerthCall => 3,
        }
    }

    /// Environment variable holding this resource's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            CallKind::PortCall => PORT_CALL_API_KEY_ENV,
            CallKind::BerthCall => BERTH_CALL_API_KEY_ENV,
        }
    }

    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            CallKind::PortCall => "portcall",
            CallKind::BerthCall => "berthcall",
        }
    }

    /// The configured API key for this resource, if any.
    pub fn api_key<'a>(&self, credentials: &'a CredentialsConfig) -> Option<&'a str> {
        match self {
            CallKind::PortCall => credentials.port_call_api_key.as_deref(),
            CallKind::BerthCall => credentials.berth_call_api_key.as_deref(),
        }
    }
}

impl std::fmt::Display for CallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
