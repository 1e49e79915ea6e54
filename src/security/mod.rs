//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → limits.rs (reject oversized bodies)
//!     → headers.rs (CORS preflight / origin check)
//!     → Pass to handlers
//! Outgoing response:
//!     → headers.rs (hardening headers)
//! ```

pub mod headers;
pub mod limits;
