mod common;

use axum::http::StatusCode;
use common::{post_json, test_app};
use proofread_service::services::MockGrammarCorrector;
use serde_json::json;

fn app() -> axum::Router {
    test_app(MockGrammarCorrector::echo())
}

#[tokio::test]
async fn known_word_has_no_suggestions() {
    let (status, body) = post_json(app(), "/spellcheck", r#"{"word": "Market"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "suggestions": [] }));
}

#[tokio::test]
async fn misspelled_word_gets_ranked_suggestions() {
    let (status, body) = post_json(app(), "/spellcheck", r#"{"word": "helo"}"#).await;

    assert_eq!(status, StatusCode::OK);
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions[0], "hello");
    assert!(suggestions.contains(&json!("help")));
}

#[tokio::test]
async fn suggestions_never_exceed_five() {
    // "thex" is one edit from the, then, they, them, thee and two from "there".
    let (status, body) = post_json(app(), "/spellcheck", r#"{"word": "thex"}"#).await;

    assert_eq!(status, StatusCode::OK);
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 5);
    assert_eq!(suggestions[0], "the");
}

#[tokio::test]
async fn word_without_candidates_returns_empty_list() {
    let (status, body) = post_json(app(), "/spellcheck", r#"{"word": "qqqqqq"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "suggestions": [] }));
}

#[tokio::test]
async fn numbers_and_punctuation_are_not_checked() {
    for word in ["42", "!"] {
        let payload = json!({ "word": word }).to_string();
        let (status, body) = post_json(app(), "/spellcheck", &payload).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "suggestions": [] }));
    }
}

#[tokio::test]
async fn missing_word_is_bad_request() {
    let (status, body) = post_json(app(), "/spellcheck", r#"{"text": "helo"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing 'word' field" }));
}
