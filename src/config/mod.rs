//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional, dotenvy)
//!     → AFLOAT_CONFIG TOML file (optional)
//!     → loader.rs (parse, overlay environment variables)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc with every request
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow an environment-only deployment
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::CredentialsConfig;
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::SecurityConfig;
pub use schema::UpstreamConfig;
