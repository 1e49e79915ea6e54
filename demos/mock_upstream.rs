//! Stand-in for the vessel-tracking API, for running the gateway locally.
//!
//! ```text
//! cargo run --example mock_upstream
//! MARINE_TRAFFIC_BASE_URL=http://127.0.0.1:8081 PORT_CALL_API_KEY=demo \
//!     BERTH_CALL_API_KEY=demo cargo run
//! cargo run --bin afloat-cli -- portcalls --days 3
//! ```
//!
//! Any key other than `demo` gets a 401. Every fifth request gets a 429.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const DEMO_KEY: &str = "demo";

#[derive(Clone, Default)]
struct Counter(Arc<AtomicU64>);

#[derive(Debug, Deserialize)]
struct Window {
    fromdate: String,
    todate: String,
    protocol: Option<String>,
}

async fn port_calls(
    State(counter): State<Counter>,
    Path(key): Path<String>,
    Query(window): Query<Window>,
    Query(raw): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    respond(&counter, &key, &window, &raw, "SHIP_ID,PORT_ID,TIMESTAMP_UTC,MOVE_TYPE\n9,1,{from},0\n9,1,{to},1\n")
}

async fn berth_calls(
    State(counter): State<Counter>,
    Path(key): Path<String>,
    Query(window): Query<Window>,
    Query(raw): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    respond(&counter, &key, &window, &raw, "SHIP_ID,BERTH_ID,DOCK_TIMESTAMP_UTC,UNDOCK_TIMESTAMP_UTC\n9,42,{from},{to}\n")
}

fn respond(
    counter: &Counter,
    key: &str,
    window: &Window,
    raw: &HashMap<String, String>,
    template: &str,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let n = counter.0.fetch_add(1, Ordering::Relaxed) + 1;
    tracing::info!(n, version = ?raw.get("v"), from = %window.fromdate, to = %window.todate, "Upstream request");

    if key != DEMO_KEY {
        return (StatusCode::UNAUTHORIZED, [(header::CONTENT_TYPE, "text/plain")], "INVALID API KEY".into());
    }
    if n % 5 == 0 {
        return (StatusCode::TOO_MANY_REQUESTS, [(header::CONTENT_TYPE, "text/plain")], "ABOVE SERVICE CALL LIMIT".into());
    }
    if window.protocol.as_deref() != Some("csv") {
        return (StatusCode::BAD_REQUEST, [(header::CONTENT_TYPE, "text/plain")], "UNSUPPORTED PROTOCOL".into());
    }

    let body = template
        .replace("{from}", &window.fromdate)
        .replace("{to}", &window.todate);
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/csv")], body)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let app = Router::new()
        .route("/portcalls/{key}", get(port_calls))
        .route("/berth-calls/{key}", get(berth_calls))
        .with_state(Counter::default());

    let addr = SocketAddr::from(([127, 0, 0, 1], 8081));
    tracing::info!(address = %addr, "Mock upstream listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
