//! Application startup and lifecycle management.

use crate::config::GhostwriterConfig;
use crate::handlers::{generate_blog, health_check, readiness_check};
use crate::services::providers::{gemini::GeminiTextProvider, hf::HfTextProvider};
use crate::services::{Ghostwriter, ProviderError, TextProvider};
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
    pub config: GhostwriterConfig,
    pub ghostwriter: Arc<Ghostwriter>,
}

/// Build the HTTP router with all routes and layers.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    Router::new()
        .route("/api/ghostwriter/generate", post(generate_blog))
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

/// Wire the pipeline stages from configuration.
pub fn build_ghostwriter(config: &GhostwriterConfig) -> Result<Ghostwriter, AppError> {
    let models = &config.models;
    let startup_error = |e: ProviderError| {
        tracing::error!("Failed to initialize provider: {}", e);
        AppError::ConfigError(anyhow::Error::new(e))
    };

    let draft = HfTextProvider::new(
        "draft",
        &models.draft_url,
        models.api_token.clone(),
        models.timeout_secs,
    )
    .map_err(startup_error)?;
    tracing::info!(endpoint = %models.draft_url, "Initialized draft model client");

    let expansion = if models.expansion_enabled {
        let provider = HfTextProvider::new(
            "expansion",
            &models.expansion_url,
            models.api_token.clone(),
            models.timeout_secs,
        )
        .map_err(startup_error)?;
        tracing::info!(endpoint = %models.expansion_url, "Initialized expansion model client");
        Some(Arc::new(provider) as Arc<dyn TextProvider>)
    } else {
        tracing::info!("Expansion stage disabled");
        None
    };

    if config.gemini.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set; posts will not be polished");
    }
    let editor = GeminiTextProvider::new(config.gemini.clone()).map_err(startup_error)?;

    Ok(Ghostwriter::new(Arc::new(draft), expansion, Arc::new(editor)))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: GhostwriterConfig) -> Result<Self, AppError> {
        let ghostwriter = build_ghostwriter(&config)?;

        let state = AppState {
            config,
            ghostwriter: Arc::new(ghostwriter),
        };

        Self::build_with_state(state).await
    }

    /// Bind the listener for an already assembled state (port 0 = random port).
    pub async fn build_with_state(state: AppState) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Ghostwriter service: HTTP on port {}", port);

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
