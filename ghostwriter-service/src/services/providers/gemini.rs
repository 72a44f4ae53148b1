//! Gemini provider implementation.
//!
//! Used as the editor stage: it receives the expanded draft wrapped in the
//! editor prompt and returns the polished post.

use super::{GenerationParams, ProviderError, TextProvider};
use crate::config::GeminiConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The key travels in a header so it never appears in request URLs or in
/// the transport errors that echo them.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.config
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .ok_or_else(|| ProviderError::NotConfigured("Gemini API key not configured".into()))
    }

    /// Build the API URL for the given model and method.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.api_base, self.config.model, method
        )
    }

    fn build_generation_config(params: &GenerationParams) -> Option<GenerationConfig> {
        let config = GenerationConfig {
            temperature: params.temperature,
            top_p: params.top_p,
            top_k: params.top_k,
            max_output_tokens: params.max_new_tokens,
        };

        if config.temperature.is_none()
            && config.top_p.is_none()
            && config.top_k.is_none()
            && config.max_output_tokens.is_none()
        {
            None
        } else {
            Some(config)
        }
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        let key = self.api_key()?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: Self::build_generation_config(params),
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url("generateContent"))
            .header(API_KEY_HEADER, key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| {
                ProviderError::ApiError(format!("Failed to parse response: {}", e.without_url()))
            })?;

        if api_response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_ref())
            .is_some()
        {
            return Err(ProviderError::ContentFiltered);
        }

        let candidate = api_response
            .candidates
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse)?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(ProviderError::ContentFiltered);
        }

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(text)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        let key = self.api_key()?;

        // Listing models verifies the key.
        let response = self
            .client
            .get(format!("{}/models", self.config.api_base))
            .header(API_KEY_HEADER, key)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError(format!(
                "Health check failed: {}",
                response.status()
            )))
        }
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use secrecy::Secret;
    use serde_json::json;

    fn provider_at(api_base: String, key: Option<&str>) -> GeminiTextProvider {
        GeminiTextProvider::new(GeminiConfig {
            api_key: key.map(|k| Secret::new(k.to_string())),
            model: "gemini-1.5-flash".to_string(),
            api_base,
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn provider(server: &MockServer, key: Option<&str>) -> GeminiTextProvider {
        provider_at(server.base_url(), key)
    }

    /// Base URL of a port nothing listens on.
    fn closed_port_base() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn returns_candidate_text() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/models/gemini-1.5-flash:generateContent")
                .header("x-goog-api-key", "test-key")
                .json_body_partial(r#"{"contents": [{"role": "user", "parts": [{"text": "polish me"}]}]}"#);
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": "Polished " }, { "text": "post." }] },
                    "finishReason": "STOP"
                }]
            }));
        });

        let text = provider(&server, Some("test-key"))
            .generate("polish me", &GenerationParams::default())
            .await
            .unwrap();

        mock.assert();
        assert_eq!(text, "Polished post.");
    }

    #[tokio::test]
    async fn sampling_parameters_become_generation_config() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/models/gemini-1.5-flash:generateContent")
                .json_body_partial(r#"{"generationConfig": {"topK": 40, "maxOutputTokens": 256}}"#);
            then.status(200).json_body(json!({
                "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
            }));
        });

        let params = GenerationParams {
            top_k: Some(40),
            max_new_tokens: Some(256),
            ..Default::default()
        };
        provider(&server, Some("k")).generate("x", &params).await.unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn rate_limit_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(429).body("quota exceeded");
        });

        let err = provider(&server, Some("k"))
            .generate("x", &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::RateLimited));
    }

    #[tokio::test]
    async fn server_error_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(500).body("boom");
        });

        let err = provider(&server, Some("k"))
            .generate("x", &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::ApiError(msg) if msg.contains("boom")));
    }

    #[tokio::test]
    async fn safety_stop_is_content_filtered() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({
                "candidates": [{ "finishReason": "SAFETY" }]
            }));
        });

        let err = provider(&server, Some("k"))
            .generate("x", &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::ContentFiltered));
    }

    #[tokio::test]
    async fn blocked_prompt_is_content_filtered() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            }));
        });

        let err = provider(&server, Some("k"))
            .generate("x", &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::ContentFiltered));
    }

    #[tokio::test]
    async fn blank_candidate_is_empty_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({
                "candidates": [{ "content": { "parts": [{ "text": "  " }] } }]
            }));
        });

        let err = provider(&server, Some("k"))
            .generate("x", &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
    }

    #[tokio::test]
    async fn missing_key_fails_without_calling_api() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.any_request();
            then.status(200);
        });

        let provider = provider(&server, None);
        let err = provider
            .generate("x", &GenerationParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::NotConfigured(_)));
        assert!(provider.health_check().await.is_err());
        mock.assert_hits(0);
    }

    #[tokio::test]
    async fn health_check_lists_models() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/models").header("x-goog-api-key", "k");
            then.status(200).json_body(json!({ "models": [] }));
        });

        provider(&server, Some("k")).health_check().await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn network_errors_do_not_leak_the_key() {
        let secret = "SUPERSECRETKEY123";
        let provider = provider_at(closed_port_base(), Some(secret));

        let err = provider
            .generate("x", &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NetworkError(_)));
        assert!(!err.to_string().contains(secret), "{err}");
        assert!(!format!("{err:?}").contains(secret));

        let err = provider.health_check().await.unwrap_err();
        assert!(matches!(err, ProviderError::NetworkError(_)));
        assert!(!err.to_string().contains(secret), "{err}");
    }

    #[tokio::test]
    async fn key_is_not_sent_in_the_query_string() {
        let server = MockServer::start();
        let leaked = server.mock(|when, then| {
            when.query_param_exists("key");
            then.status(400);
        });
        let ok = server.mock(|when, then| {
            when.method(GET).path("/models").header("x-goog-api-key", "k");
            then.status(200).json_body(json!({ "models": [] }));
        });

        provider(&server, Some("k")).health_check().await.unwrap();
        ok.assert();
        leaked.assert_hits(0);
    }
}
