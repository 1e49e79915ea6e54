//! afloat: vessel-call CSV gateway library.

pub mod calls;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use calls::{CallKind, CallPipeline, CallRequest};
pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
