mod common;

use axum::{body::Body, http::Request, http::StatusCode};
use common::{send, test_app};
use httpmock::prelude::*;
use serde_json::json;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_check_returns_ok() {
    let server = MockServer::start();

    let (status, body) = send(test_app(&server), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "ai-gateway");
}

#[tokio::test]
async fn ready_when_upstreams_are_healthy() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/health");
        then.status(200).json_body(json!({ "status": "ok" }));
    });

    let (status, body) = send(test_app(&server), get("/ready")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn not_ready_when_upstream_is_down() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/health");
        then.status(503);
    });

    let (status, body) = send(test_app(&server), get("/ready")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["proofread"], false);
}
