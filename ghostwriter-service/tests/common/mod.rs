#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use ghostwriter_service::config::{CorsConfig, GeminiConfig, GhostwriterConfig, ModelConfig};
use ghostwriter_service::services::providers::mock::MockTextProvider;
use ghostwriter_service::services::{Ghostwriter, TextProvider};
use ghostwriter_service::startup::{build_router, AppState};
use http_body_util::BodyExt;
use service_core::config::Config;
use std::sync::Arc;
use tower::ServiceExt;

pub fn test_config() -> GhostwriterConfig {
    GhostwriterConfig {
        common: Config { port: 0 },
        models: ModelConfig {
            draft_url: "http://127.0.0.1:9/draft".to_string(),
            expansion_url: "http://127.0.0.1:9/expansion".to_string(),
            expansion_enabled: true,
            api_token: None,
            timeout_secs: 5,
        },
        gemini: GeminiConfig {
            api_key: None,
            model: "gemini-1.5-flash".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
            timeout_secs: 5,
        },
        cors: CorsConfig {
            allowed_origins: vec!["*".to_string()],
        },
    }
}

pub fn test_app(
    draft: MockTextProvider,
    expansion: Option<MockTextProvider>,
    editor: MockTextProvider,
) -> Router {
    let ghostwriter = Ghostwriter::new(
        Arc::new(draft),
        expansion.map(|e| Arc::new(e) as Arc<dyn TextProvider>),
        Arc::new(editor),
    );
    build_router(AppState {
        config: test_config(),
        ghostwriter: Arc::new(ghostwriter),
    })
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
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}
