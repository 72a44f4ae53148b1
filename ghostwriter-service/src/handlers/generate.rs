use axum::{extract::State, Json};
use serde::Serialize;
use service_core::error::AppError;
use service_core::extract::JsonObject;

use crate::startup::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub generated_text: String,
}

/// `POST /api/ghostwriter/generate`
#[tracing::instrument(skip(state, body))]
pub async fn generate_blog(
    State(state): State<AppState>,
    body: JsonObject,
) -> Result<Json<GenerateResponse>, AppError> {
    let topic = body.required_str("topic")?;
    let tone = body.required_str("tone")?;

    let generated_text = state.ghostwriter.write(topic, tone).await.map_err(|e| {
        tracing::error!(error = %e, "Blog generation failed");
        AppError::internal_with_message(e.to_string())
    })?;

    tracing::info!(
        topic_len = topic.len(),
        output_len = generated_text.len(),
        "Blog generated"
    );

    Ok(Json(GenerateResponse { generated_text }))
}
