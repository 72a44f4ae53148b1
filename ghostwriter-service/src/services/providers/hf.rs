//! Providers backed by Hugging Face style inference endpoints.

use super::{GenerationParams, ProviderError, TextProvider};
use async_trait::async_trait;
use secrecy::Secret;
use service_core::inference::InferenceClient;
use std::time::Duration;

pub struct HfTextProvider {
    name: String,
    client: InferenceClient,
}

impl HfTextProvider {
    pub fn new(
        name: impl Into<String>,
        endpoint: &str,
        token: Option<Secret<String>>,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let client = InferenceClient::new(endpoint, token, Duration::from_secs(timeout_secs))?;
        Ok(Self {
            name: name.into(),
            client,
        })
    }
}

#[async_trait]
impl TextProvider for HfTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        tracing::debug!(
            provider = %self.name,
            endpoint = %self.client.endpoint(),
            prompt_len = prompt.len(),
            "Sending request to inference endpoint"
        );
        Ok(self.client.generate(prompt, params).await?)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.client.endpoint().is_empty() {
            return Err(ProviderError::NotConfigured(format!(
                "{} endpoint not configured",
                self.name
            )));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use service_core::inference::InferenceError;

    #[tokio::test]
    async fn forwards_prompt_and_parameters() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/draft").json_body_partial(
                r#"{"inputs": "casual coffee", "parameters": {"num_beams": 5}}"#,
            );
            then.status(200)
                .json_body(json!([{ "generated_text": "casual coffee is great" }]));
        });

        let provider = HfTextProvider::new("draft", &server.url("/draft"), None, 5).unwrap();
        let params = GenerationParams {
            num_beams: Some(5),
            ..Default::default()
        };

        let text = provider.generate("casual coffee", &params).await.unwrap();

        mock.assert();
        assert_eq!(text, "casual coffee is great");
        assert_eq!(provider.name(), "draft");
    }

    #[tokio::test]
    async fn surfaces_inference_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/draft");
            then.status(429);
        });

        let provider = HfTextProvider::new("draft", &server.url("/draft"), None, 5).unwrap();
        let err = provider
            .generate("x", &GenerationParams::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProviderError::Inference(InferenceError::RateLimited)
        ));
    }

    #[tokio::test]
    async fn empty_endpoint_is_not_healthy() {
        let provider = HfTextProvider::new("draft", "", None, 5).unwrap();
        assert!(matches!(
            provider.health_check().await,
            Err(ProviderError::NotConfigured(_))
        ));
    }
}
