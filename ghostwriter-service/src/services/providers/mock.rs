//! Mock provider for testing.

use super::{GenerationParams, ProviderError, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

enum Behaviour {
    Fixed(String),
    /// Append a marker to the prompt, like a causal model returning full text.
    Continue(String),
    Fail(String),
}

/// Mock text provider that remembers every prompt it was sent.
pub struct MockTextProvider {
    name: String,
    behaviour: Behaviour,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    fn with(name: &str, behaviour: Behaviour) -> Self {
        Self {
            name: name.to_string(),
            behaviour,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn fixed(name: &str, reply: impl Into<String>) -> Self {
        Self::with(name, Behaviour::Fixed(reply.into()))
    }

    pub fn continuing(name: &str, suffix: impl Into<String>) -> Self {
        Self::with(name, Behaviour::Continue(suffix.into()))
    }

    pub fn failing(name: &str, message: impl Into<String>) -> Self {
        Self::with(name, Behaviour::Fail(message.into()))
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.behaviour {
            Behaviour::Fixed(reply) => Ok(reply.clone()),
            Behaviour::Continue(suffix) => Ok(format!("{prompt}{suffix}")),
            Behaviour::Fail(msg) => Err(ProviderError::ApiError(msg.clone())),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.behaviour {
            Behaviour::Fail(msg) => Err(ProviderError::NotConfigured(msg.clone())),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
