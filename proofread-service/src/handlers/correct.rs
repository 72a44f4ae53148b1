use axum::{extract::State, Json};
use serde::Serialize;
use service_core::error::AppError;
use service_core::extract::JsonObject;
use service_core::observability::record_inference;
use std::time::Instant;

use crate::startup::AppState;

#[derive(Debug, Serialize)]
pub struct CorrectResponse {
    pub corrected: String,
}

/// `POST /correct`: run the text through the grammar model.
#[tracing::instrument(skip(state, body))]
pub async fn correct_text(
    State(state): State<AppState>,
    body: JsonObject,
) -> Result<Json<CorrectResponse>, AppError> {
    let text = body.required_str("text")?;

    let start = Instant::now();
    let result = state.grammar.correct(text).await;
    let elapsed = start.elapsed().as_secs_f64();

    match result {
        Ok(corrected) => {
            record_inference(state.grammar.name(), "ok", elapsed);
            tracing::info!(
                backend = state.grammar.name(),
                input_len = text.len(),
                output_len = corrected.len(),
                "Text corrected"
            );
            Ok(Json(CorrectResponse { corrected }))
        }
        Err(e) => {
            record_inference(state.grammar.name(), "error", elapsed);
            tracing::error!(backend = state.grammar.name(), error = %e, "Grammar correction failed");
            Err(AppError::InternalError(anyhow::Error::new(e)))
        }
    }
}
