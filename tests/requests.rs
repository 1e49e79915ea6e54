//! Request validation, configuration errors and the ambient HTTP surface.

use afloat_sdk::GatewayClient;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

/// Upstream that fails the test if it is ever called.
async fn untouchable_upstream() -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    mock_server
}

async fn post(gateway: &common::TestGateway, path: &str, body: Value) -> (StatusCode, Value) {
    let res = common::http_client()
        .post(gateway.endpoint(path))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn root_says_hello() {
    let gateway = common::start_gateway(common::config_for(None)).await;

    let greeting = GatewayClient::with_client(common::http_client(), &gateway.url())
        .ping()
        .await
        .unwrap();
    assert_eq!(greeting, "Hello, World!");
}

#[tokio::test]
async fn zero_days_is_rejected() {
    let upstream = untouchable_upstream().await;
    let gateway = common::start_gateway(common::config_for(Some(&upstream.uri()))).await;

    let (status, body) = post(&gateway, "/api/portcall", json!({ "days": 0 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "[days]: '0' | Needs to implement 'min=1'");
}

#[tokio::test]
async fn out_of_range_and_missing_days_are_rejected() {
    let upstream = untouchable_upstream().await;
    let gateway = common::start_gateway(common::config_for(Some(&upstream.uri()))).await;

    for (path, body) in [
        ("/api/portcall", json!({ "days": 16 })),
        ("/api/berthcall", json!({ "days": -1 })),
        ("/api/berthcall", json!({})),
    ] {
        let (status, response) = post(&gateway, path, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert!(response["message"].as_str().unwrap().contains("[days]"), "{response}");
    }
}

#[tokio::test]
async fn malformed_body_goes_through_global_handler() {
    let upstream = untouchable_upstream().await;
    let gateway = common::start_gateway(common::config_for(Some(&upstream.uri()))).await;

    let (status, body) = post(&gateway, "/api/portcall", json!({ "days": "seven" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("days"), "{body}");

    let res = common::http_client()
        .post(gateway.endpoint("/api/berthcall"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn missing_base_url_is_500_without_upstream_call() {
    let gateway = common::start_gateway(common::config_for(None)).await;

    let (status, body) = post(&gateway, "/api/portcall", json!({ "days": 3 })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "MARINE_TRAFFIC_BASE_URL environment variable not set");
}

#[tokio::test]
async fn missing_api_key_is_500_for_that_resource_only() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&upstream)
        .await;

    let mut config = common::config_for(Some(&upstream.uri()));
    config.credentials.berth_call_api_key = None;
    let gateway = common::start_gateway(config).await;

    let (status, body) = post(&gateway, "/api/berthcall", json!({ "days": 3 })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "BERTH_CALL_API_KEY environment variable not set");

    let res = common::http_client()
        .post(gateway.endpoint("/api/portcall"))
        .json(&json!({ "days": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let gateway = common::start_gateway(common::config_for(None)).await;
    let client = common::http_client();

    let res = client.get(gateway.url()).send().await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.headers()["x-content-type-options"], "nosniff");
    assert_eq!(res.headers()["x-frame-options"], "SAMEORIGIN");

    let res = client
        .get(gateway.url())
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let upstream = untouchable_upstream().await;
    let mut config = common::config_for(Some(&upstream.uri()));
    config.security.max_body_size = 16;
    let gateway = common::start_gateway(config).await;

    let res = common::http_client()
        .post(gateway.endpoint("/api/portcall"))
        .header("content-type", "application/json")
        .body(format!(r#"{{"days": 1, "padding": "{}"}}"#, "x".repeat(64)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
