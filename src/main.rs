//! afloat: vessel-call CSV gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────┐
//!                 │                      AFLOAT                      │
//!   POST          │  ┌────────┐   ┌───────────┐   ┌──────────────┐  │
//!   /api/portcall ┼─▶│  http  │──▶│ validator │──▶│  credential  │  │
//!   /api/berthcall│  │ server │   │  (days)   │   │   resolver   │  │
//!                 │  └────────┘   └───────────┘   └──────┬───────┘  │
//!                 │                                      ▼          │
//!                 │  ┌────────┐   ┌───────────┐   ┌──────────────┐  │
//!   text/csv  ◀───┼──│ relay  │◀──│ upstream  │◀──│ query builder│  │
//!                 │  └────────┘   │  caller   │   └──────────────┘  │
//!                 │               └─────┬─────┘                     │
//!                 └─────────────────────┼───────────────────────────┘
//!                                       ▼
//!                              vessel-tracking API
//! ```

use afloat::config::load_from_env;
use afloat::lifecycle::startup;
use afloat::observability::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_from_env()?;

    init_logging(&config.observability)?;

    tracing::info!("afloat v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;
    Ok(())
}
