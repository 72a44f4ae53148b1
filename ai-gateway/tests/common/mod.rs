#![allow(dead_code)]

use ai_gateway::config::{CorsConfig, GatewayConfig, UpstreamSettings};
use ai_gateway::startup::{build_router, AppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use httpmock::MockServer;
use service_core::config::Config;
use tower::ServiceExt;

/// Gateway whose proofread and ghostwriter upstreams are both `server`.
pub fn test_app(server: &MockServer) -> Router {
    test_app_with_upstream(&server.base_url())
}

pub fn test_app_with_upstream(base_url: &str) -> Router {
    let config = GatewayConfig {
        common: Config { port: 0 },
        upstream: UpstreamSettings {
            proofread_url: base_url.to_string(),
            ghostwriter_url: base_url.to_string(),
            timeout_secs: 5,
        },
        cors: CorsConfig {
            allowed_origins: vec!["*".to_string()],
        },
    };
    build_router(AppState::new(config).unwrap())
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-request-id", "req-123")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// A loopback URL whose port was just released, so connections are refused.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
