//! Application startup and lifecycle management.

use crate::config::GatewayConfig;
use crate::handlers::{
    correct_proxy, generate_proxy, health_check, readiness_check, spellcheck_proxy,
};
use crate::services::AiClient;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors_layer, metrics_middleware, request_id_middleware, security_headers_middleware,
    trace_layer,
};
use service_core::server::{metrics_endpoint, shutdown_signal};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub ai: Arc<AiClient>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Result<Self, AppError> {
        let ai = AiClient::new(config.upstream.clone()).map_err(AppError::ConfigError)?;
        tracing::info!(
            proofread = %config.upstream.proofread_url,
            ghostwriter = %config.upstream.ghostwriter_url,
            "Configured AI upstreams"
        );

        Ok(Self {
            config,
            ai: Arc::new(ai),
        })
    }
}

/// Build the HTTP router with all routes and layers.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    Router::new()
        .route("/api/ai/correct", post(correct_proxy))
        .route("/api/ai/spellcheck", post(spellcheck_proxy))
        .route("/api/ai/generate", post(generate_proxy))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .layer(from_fn(metrics_middleware))
        .layer(trace_layer())
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration (port 0 = random port).
    pub async fn build(config: GatewayConfig) -> Result<Self, AppError> {
        let state = AppState::new(config)?;

        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("AI gateway: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
