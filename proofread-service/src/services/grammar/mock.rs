//! Mock grammar backend for testing.

use super::{GrammarCorrector, GrammarError};
use async_trait::async_trait;

enum Behaviour {
    Fixed(String),
    Echo,
    Fail(String),
}

pub struct MockGrammarCorrector {
    behaviour: Behaviour,
}

impl MockGrammarCorrector {
    /// Always answer with `reply`.
    pub fn fixed(reply: impl Into<String>) -> Self {
        Self {
            behaviour: Behaviour::Fixed(reply.into()),
        }
    }

    /// Answer with the input unchanged.
    pub fn echo() -> Self {
        Self {
            behaviour: Behaviour::Echo,
        }
    }

    /// Fail every call.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behaviour: Behaviour::Fail(message.into()),
        }
    }
}

#[async_trait]
impl GrammarCorrector for MockGrammarCorrector {
    async fn correct(&self, text: &str) -> Result<String, GrammarError> {
        match &self.behaviour {
            Behaviour::Fixed(reply) => Ok(reply.clone()),
            Behaviour::Echo => Ok(text.to_string()),
            Behaviour::Fail(msg) => Err(GrammarError::Backend(msg.clone())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
