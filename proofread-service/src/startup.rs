//! Application startup and lifecycle management.

use crate::config::ProofreadConfig;
use crate::handlers::{correct_text, health_check, readiness_check, spellcheck_word};
use crate::services::{Dictionary, GrammarCorrector, HfGrammarCorrector, SpellChecker};
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

/// Shared application state. Models are loaded once and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: ProofreadConfig,
    pub grammar: Arc<dyn GrammarCorrector>,
    pub speller: Arc<SpellChecker>,
}

/// Build the HTTP router with all routes and layers.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    Router::new()
        .route("/correct", post(correct_text))
        .route("/spellcheck", post(spellcheck_word))
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

/// Load the spelling dictionary named in the config, or the embedded one.
pub fn load_speller(config: &ProofreadConfig) -> Result<SpellChecker, AppError> {
    let dictionary = match &config.spelling.dictionary_path {
        Some(path) => Dictionary::from_path(path),
        None => Dictionary::embedded(),
    }
    .map_err(|e| {
        tracing::error!("Failed to load spelling dictionary: {}", e);
        AppError::ConfigError(anyhow::Error::new(e))
    })?;

    tracing::info!(
        words = dictionary.len(),
        distance = config.spelling.distance,
        "Loaded spelling dictionary"
    );

    Ok(SpellChecker::new(dictionary, config.spelling.distance))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ProofreadConfig) -> Result<Self, AppError> {
        let grammar = HfGrammarCorrector::new(&config.grammar).map_err(|e| {
            tracing::error!("Failed to initialize grammar model client: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;
        tracing::info!(endpoint = %config.grammar.model_url, "Initialized grammar model client");

        let speller = load_speller(&config)?;

        let state = AppState {
            config: config.clone(),
            grammar: Arc::new(grammar),
            speller: Arc::new(speller),
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

        tracing::info!("Proofread service: HTTP on port {}", port);

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
