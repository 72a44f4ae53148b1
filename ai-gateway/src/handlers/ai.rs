//! `/api/ai/*` routes used by the blog editor.
//!
//! Upstream failures are never passed through; each route answers with its
//! own fixed message.

use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use service_core::error::AppError;
use service_core::extract::JsonObject;
use service_core::observability::extract_request_id;
use validator::Validate;

use crate::services::{CorrectReply, SpellcheckReply};
use crate::startup::AppState;

const CORRECT_FAILED: &str = "AI service unavailable";
const SPELLCHECK_FAILED: &str = "Spellcheck failed";
const GENERATE_FAILED: &str = "AI generation failed";
const GENERATE_EMPTY: &str = "No generated text returned from AI backend.";
const GENERATE_INVALID: &str = "Topic and tone are required";

#[derive(Debug, Default, Deserialize, Validate)]
pub struct GenerateRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub topic: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub tone: String,
}

impl GenerateRequest {
    /// Anything that does not yield two non-empty strings fails validation.
    fn from_body(body: JsonObject) -> Self {
        body.0
            .and_then(|map| serde_json::from_value(Value::Object(map)).ok())
            .unwrap_or_default()
    }
}

fn request_id(headers: &HeaderMap) -> String {
    extract_request_id(headers).unwrap_or_default()
}

/// `POST /api/ai/correct`
#[tracing::instrument(skip_all)]
pub async fn correct_proxy(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: JsonObject,
) -> Result<Json<CorrectReply>, AppError> {
    let payload = json!({ "text": body.get("text") });

    let reply = state
        .ai
        .correct(&payload, &request_id(&headers))
        .await
        .map_err(|e| {
            tracing::error!(error = %format!("{:#}", e), "AI correct route failed");
            AppError::internal_with_message(CORRECT_FAILED)
        })?;

    Ok(Json(reply))
}

/// `POST /api/ai/spellcheck`
#[tracing::instrument(skip_all)]
pub async fn spellcheck_proxy(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: JsonObject,
) -> Result<Json<SpellcheckReply>, AppError> {
    let payload = json!({ "word": body.get("word") });

    let reply = state
        .ai
        .spellcheck(&payload, &request_id(&headers))
        .await
        .map_err(|e| {
            tracing::error!(error = %format!("{:#}", e), "AI spellcheck route failed");
            AppError::internal_with_message(SPELLCHECK_FAILED)
        })?;

    Ok(Json(reply))
}

/// `POST /api/ai/generate`
#[tracing::instrument(skip_all)]
pub async fn generate_proxy(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: JsonObject,
) -> Result<Json<Value>, AppError> {
    let request = GenerateRequest::from_body(body);
    request
        .validate()
        .map_err(|_| AppError::bad_request(GENERATE_INVALID))?;

    let payload = json!({ "topic": request.topic, "tone": request.tone });

    let reply = state
        .ai
        .generate(&payload, &request_id(&headers))
        .await
        .map_err(|e| {
            tracing::error!(error = %format!("{:#}", e), "AI generation error");
            AppError::internal_with_message(GENERATE_FAILED)
        })?;

    match reply.generated_text.filter(|text| !text.is_empty()) {
        Some(generated_text) => Ok(Json(json!({ "generated_text": generated_text }))),
        None => {
            tracing::warn!("Ghostwriter answered without generated text");
            Err(AppError::internal_with_message(GENERATE_EMPTY))
        }
    }
}
