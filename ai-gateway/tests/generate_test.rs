mod common;

use axum::http::StatusCode;
use common::{post_json, test_app};
use httpmock::prelude::*;
use serde_json::json;

const ROUTE: &str = "/api/ai/generate";

#[tokio::test]
async fn generate_returns_generated_text() {
    let server = MockServer::start();
    let upstream = server.mock(|when, then| {
        when.method(POST)
            .path("/api/ghostwriter/generate")
            .json_body(json!({ "topic": "remote work", "tone": "casual" }));
        then.status(200)
            .json_body(json!({ "generated_text": "# Remote Work\n\nA post." }));
    });

    let (status, body) = post_json(
        test_app(&server),
        ROUTE,
        r#"{"topic": "remote work", "tone": "casual"}"#,
    )
    .await;

    upstream.assert();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "generated_text": "# Remote Work\n\nA post." }));
}

#[tokio::test]
async fn empty_topic_or_tone_is_rejected_before_upstream() {
    let server = MockServer::start();
    let upstream = server.mock(|when, then| {
        when.any_request();
        then.status(200);
    });

    for payload in [
        r#"{"topic": "", "tone": "casual"}"#,
        r#"{"topic": "remote work"}"#,
        "{}",
    ] {
        let (status, body) = post_json(test_app(&server), ROUTE, payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
        assert_eq!(body, json!({ "error": "Topic and tone are required" }));
    }

    upstream.assert_hits(0);
}

#[tokio::test]
async fn reply_without_text_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/ghostwriter/generate");
        then.status(200).json_body(json!({ "error": "model crashed" }));
    });

    let (status, body) = post_json(
        test_app(&server),
        ROUTE,
        r#"{"topic": "remote work", "tone": "casual"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "No generated text returned from AI backend." })
    );
}

#[tokio::test]
async fn upstream_failure_is_masked() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/ghostwriter/generate");
        then.status(500)
            .json_body(json!({ "error": "API error: draft model offline" }));
    });

    let (status, body) = post_json(
        test_app(&server),
        ROUTE,
        r#"{"topic": "remote work", "tone": "casual"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "AI generation failed" }));
}
