//! Vessel-call relay subsystem.
//!
//! # Data Flow
//! ```text
//! POST /api/{portcall,berthcall} {"days": N}
//!     → request.rs (validate days ∈ [1, 15])
//!     → pipeline.rs (resolve API key + base URL for the CallKind)
//!     → query.rs (date window, percent-encoded upstream URL)
//!     → upstream.rs (single GET, classify by status)
//!     → UpstreamOutcome, rendered by http::response
//! ```
//!
//! # Design Decisions
//! - One pipeline parameterized by `CallKind` serves both endpoints
//! - No cache, no retry, no outbound rate limiting
//! - Validation is a pure function of the request body

pub mod kind;
pub mod pipeline;
pub mod query;
pub mod request;
pub mod upstream;

pub use kind::CallKind;
pub use pipeline::{resolve_credentials, CallError, CallPipeline};
pub use query::{Clock, FixedClock, SystemClock, UpstreamQuery};
pub use request::{CallRequest, ValidationViolation};
pub use upstream::{UpstreamClient, UpstreamError, UpstreamOutcome};
