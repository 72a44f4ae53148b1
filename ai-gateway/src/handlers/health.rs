use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::startup::AppState;

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "ai-gateway",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness probe: both upstream services must answer their health checks.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let settings = state.ai.settings();
    let (proofread, ghostwriter) = tokio::join!(
        state.ai.is_healthy(&settings.proofread_url),
        state.ai.is_healthy(&settings.ghostwriter_url),
    );

    let status = if proofread && ghostwriter {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if status == StatusCode::OK { "ready" } else { "not_ready" },
            "proofread": proofread,
            "ghostwriter": ghostwriter,
        })),
    )
}
