//! Client for Hugging Face style text-generation endpoints.
//!
//! Both the Inference API (`/models/{id}`) and self-hosted inference servers
//! accept `{"inputs", "parameters", "options"}` and answer with one or more
//! `{"generated_text"}` objects. The grammar model, the fine-tuned draft
//! model and the expansion model are all reached through this client.

use crate::observability::PropagateTrace;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Error type for inference calls.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Inference client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limited by inference endpoint")]
    RateLimited,

    #[error("Model is loading, estimated {0:.0}s")]
    ModelLoading(f64),

    #[error("Inference API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Inference endpoint returned no generated text")]
    EmptyResponse,

    #[error("Failed to parse inference response: {0}")]
    InvalidResponse(String),
}

/// Generation parameters forwarded to the model's `generate` call.
///
/// Unset fields are left out of the request so the model's defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_new_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_beams: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_repeat_ngram_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub early_stopping: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_sample: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_full_text: Option<bool>,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
    Error {
        error: String,
        #[serde(default)]
        estimated_time: Option<f64>,
    },
}

/// Text-generation client bound to a single model endpoint.
#[derive(Clone)]
pub struct InferenceClient {
    endpoint: String,
    token: Option<Secret<String>>,
    client: Client,
}

impl std::fmt::Debug for InferenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceClient")
            .field("endpoint", &self.endpoint)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl InferenceClient {
    pub fn new(
        endpoint: impl Into<String>,
        token: Option<Secret<String>>,
        timeout: Duration,
    ) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InferenceError::Client(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            token,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one generation and return the first decoded sequence.
    pub async fn generate(
        &self,
        inputs: &str,
        parameters: &GenerationParameters,
    ) -> Result<String, InferenceError> {
        let request = InferenceRequest {
            inputs,
            parameters,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            input_len = inputs.len(),
            "Sending request to inference endpoint"
        );

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token.expose_secret());
        }

        let response = builder
            .propagate_trace(None)
            .send()
            .await
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(InferenceError::RateLimited);
        }

        let body = response
            .text()
            .await
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        let parsed = serde_json::from_str::<InferenceResponse>(&body);

        if !status.is_success() {
            return Err(match parsed {
                Ok(InferenceResponse::Error {
                    estimated_time: Some(eta),
                    ..
                }) if status == StatusCode::SERVICE_UNAVAILABLE => {
                    InferenceError::ModelLoading(eta)
                }
                Ok(InferenceResponse::Error { error, .. }) => InferenceError::Api {
                    status: status.as_u16(),
                    message: error,
                },
                _ => InferenceError::Api {
                    status: status.as_u16(),
                    message: body,
                },
            });
        }

        match parsed.map_err(|e| InferenceError::InvalidResponse(e.to_string()))? {
            InferenceResponse::Batch(outputs) => outputs
                .into_iter()
                .next()
                .map(|o| o.generated_text)
                .ok_or(InferenceError::EmptyResponse),
            InferenceResponse::Single(output) => Ok(output.generated_text),
            InferenceResponse::Error { error, .. } => Err(InferenceError::Api {
                status: status.as_u16(),
                message: error,
            }),
        }
    }
}
