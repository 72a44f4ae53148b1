use axum::{extract::State, Json};
use serde::Serialize;
use service_core::error::AppError;
use service_core::extract::JsonObject;

use crate::services::metrics::record_spellcheck;
use crate::startup::AppState;

#[derive(Debug, Serialize)]
pub struct SpellcheckResponse {
    pub suggestions: Vec<String>,
}

/// `POST /spellcheck`: suggestions for a single word, empty when it is known.
#[tracing::instrument(skip(state, body))]
pub async fn spellcheck_word(
    State(state): State<AppState>,
    body: JsonObject,
) -> Result<Json<SpellcheckResponse>, AppError> {
    let word = body.required_str("word")?.to_string();

    let speller = state.speller.clone();
    let limit = state.config.spelling.max_suggestions;

    // Distance-2 search is CPU bound; keep it off the async workers.
    let (unknown, suggestions) = tokio::task::spawn_blocking(move || {
        let unknown = speller.is_unknown(&word);
        let suggestions = if unknown {
            speller.suggestions(&word, limit)
        } else {
            Vec::new()
        };
        (unknown, suggestions)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Spellcheck task failed");
        AppError::InternalError(anyhow::Error::new(e))
    })?;

    record_spellcheck(match (unknown, suggestions.is_empty()) {
        (false, _) => "known",
        (true, false) => "suggested",
        (true, true) => "no_candidates",
    });

    Ok(Json(SpellcheckResponse { suggestions }))
}
