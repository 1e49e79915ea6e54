//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → handlers.rs (decode body, pick CallKind)
//!     → calls::CallPipeline
//!     → response.rs (relay upstream outcome) | error.rs (JSON error)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use error::ApiError;
pub use request::X_REQUEST_ID;
pub use response::ErrorBody;
pub use server::{AppState, HttpServer};
