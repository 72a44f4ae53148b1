use super::{GrammarCorrector, GrammarError};
use crate::config::GrammarConfig;
use async_trait::async_trait;
use service_core::inference::{GenerationParameters, InferenceClient};
use std::time::Duration;

/// Seq2seq correction model served behind a text2text inference endpoint.
pub struct HfGrammarCorrector {
    client: InferenceClient,
    prompt_prefix: String,
    parameters: GenerationParameters,
}

impl HfGrammarCorrector {
    pub fn new(config: &GrammarConfig) -> Result<Self, GrammarError> {
        let client = InferenceClient::new(
            config.model_url.clone(),
            config.api_token.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;

        Ok(Self {
            client,
            prompt_prefix: config.prompt_prefix.clone(),
            parameters: GenerationParameters {
                max_length: Some(config.max_length),
                ..Default::default()
            },
        })
    }

    fn prompt(&self, text: &str) -> String {
        format!("{}{}", self.prompt_prefix, text)
    }
}

#[async_trait]
impl GrammarCorrector for HfGrammarCorrector {
    async fn correct(&self, text: &str) -> Result<String, GrammarError> {
        let prompt = self.prompt(text);
        let corrected = self.client.generate(&prompt, &self.parameters).await?;
        Ok(corrected.trim().to_string())
    }

    fn name(&self) -> &str {
        "hf-grammar"
    }
}
