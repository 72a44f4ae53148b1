use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::startup::AppState;

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "ghostwriter-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness probe. An unreachable editor only degrades output quality, so
/// it is reported but does not fail the probe.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let editor = match state.ghostwriter.editor().health_check().await {
        Ok(()) => "ok".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Editor not ready");
            "unavailable".to_string()
        }
    };

    (
        StatusCode::OK,
        Json(json!({ "status": "ready", "editor": editor })),
    )
}
