//! Text generation provider abstractions and implementations.
//!
//! Every stage of the ghostwriter pipeline talks to a `TextProvider`, so the
//! draft model, the expansion model and the editor can be swapped for mocks.

pub mod gemini;
pub mod hf;
pub mod mock;

use async_trait::async_trait;
use service_core::inference::InferenceError;
use thiserror::Error;

/// Generation parameters for provider requests.
///
/// Inference endpoints receive every field that is set; Gemini maps the
/// sampling fields onto its own generation config.
pub use service_core::inference::GenerationParameters as GenerationParams;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Provider returned no text")]
    EmptyResponse,

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// Trait for text generation providers.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;

    /// Backend label used in logs and metrics.
    fn name(&self) -> &str;
}
