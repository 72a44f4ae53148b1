#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use proofread_service::config::{
    CorsConfig, GrammarConfig, ProofreadConfig, SpellingConfig, MAX_SUGGESTIONS,
};
use proofread_service::services::{Dictionary, GrammarCorrector, SpellChecker};
use proofread_service::startup::{build_router, AppState};
use service_core::config::Config;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_WORDS: &str = "the 100\nthere 40\nthen 30\nthey 20\nthem 10\nthee 1\n\
                              hello 50\nhelp 45\nmarket 20\nwent 15\nreceive 5\n";

pub fn test_config() -> ProofreadConfig {
    ProofreadConfig {
        common: Config { port: 0 },
        grammar: GrammarConfig {
            model_url: "http://127.0.0.1:9/unused".to_string(),
            prompt_prefix: "gec: ".to_string(),
            max_length: 128,
            api_token: None,
            timeout_secs: 5,
        },
        spelling: SpellingConfig {
            dictionary_path: None,
            distance: 2,
            max_suggestions: MAX_SUGGESTIONS,
        },
        cors: CorsConfig {
            allowed_origins: vec!["*".to_string()],
        },
    }
}

pub fn test_app(grammar: impl GrammarCorrector + 'static) -> Router {
    let dictionary = Dictionary::from_reader(TEST_WORDS.as_bytes(), "test").unwrap();
    let state = AppState {
        config: test_config(),
        grammar: Arc::new(grammar),
        speller: Arc::new(SpellChecker::new(dictionary, 2)),
    };
    build_router(state)
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
