//! Grammar correction backends.
//!
//! The correction model is reached through a trait so the handler can run
//! against the hosted model in production and a mock in tests.

pub mod hf;
pub mod mock;

pub use hf::HfGrammarCorrector;
pub use mock::MockGrammarCorrector;

use async_trait::async_trait;
use service_core::inference::InferenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("Grammar model failed: {0}")]
    Backend(String),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

#[async_trait]
pub trait GrammarCorrector: Send + Sync {
    /// Return the corrected form of `text`.
    async fn correct(&self, text: &str) -> Result<String, GrammarError>;

    /// Backend name used in logs and metric labels.
    fn name(&self) -> &str;
}
