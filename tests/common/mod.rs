//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use afloat::calls::{CallPipeline, FixedClock, UpstreamClient};
use afloat::config::GatewayConfig;
use afloat::http::HttpServer;
use afloat::lifecycle::Shutdown;
use chrono::{TimeZone, Utc};

/// A gateway running on an ephemeral port.
pub struct TestGateway {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Config with both API keys set and the base URL pointing at `upstream`.
#[allow(dead_code)]
pub fn config_for(upstream: Option<&str>) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.upstream.base_url = upstream.map(str::to_string);
    config.credentials.port_call_api_key = Some("port-key".into());
    config.credentials.berth_call_api_key = Some("berth-key".into());
    config
}

/// Start a gateway whose clock is frozen at 2024-05-20 06:30:00 UTC.
pub async fn start_gateway(config: GatewayConfig) -> TestGateway {
    // Upstream stubs live on loopback; keep a system proxy out of the way.
    let client = UpstreamClient::from_client(http_client());
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 20, 6, 30, 0).unwrap());
    let pipeline = CallPipeline::with_clock(Arc::new(config), client, Arc::new(clock));
    let server = HttpServer::with_pipeline(pipeline);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Listener is already bound; give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestGateway { addr, shutdown }
}

/// Client that bypasses any system proxy.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
