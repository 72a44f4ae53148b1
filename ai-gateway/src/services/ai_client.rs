//! HTTP client for the AI services behind the gateway.
//!
//! Every call carries the caller's request id and trace context so a
//! browser request can be followed through both hops.

use crate::config::UpstreamSettings;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service_core::observability::PropagateTrace;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectReply {
    pub corrected: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SpellcheckReply {
    pub suggestions: Vec<String>,
}

/// The ghostwriter may answer 2xx without text; that is for the caller to judge.
#[derive(Debug, Deserialize)]
pub struct GenerateReply {
    #[serde(default)]
    pub generated_text: Option<String>,
}

pub struct AiClient {
    client: Client,
    settings: UpstreamSettings,
}

impl AiClient {
    pub fn new(settings: UpstreamSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &UpstreamSettings {
        &self.settings
    }

    /// POST `body` to `url` and decode a successful JSON reply.
    ///
    /// Transport failures, non-2xx statuses and undecodable bodies are all errors.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &Value,
        request_id: &str,
    ) -> Result<T> {
        let response = self
            .client
            .post(url)
            .json(body)
            .propagate_trace(Some(request_id))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send POST request to {}: {}", url, e);
                anyhow::anyhow!("HTTP request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(url = %url, status = %status, body = %text, "Upstream returned an error");
            anyhow::bail!("Upstream {} returned {}", url, status);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Invalid JSON from {}", url))
    }

    pub async fn correct(&self, body: &Value, request_id: &str) -> Result<CorrectReply> {
        let url = format!("{}/correct", self.settings.proofread_url);
        self.post_json(&url, body, request_id).await
    }

    pub async fn spellcheck(&self, body: &Value, request_id: &str) -> Result<SpellcheckReply> {
        let url = format!("{}/spellcheck", self.settings.proofread_url);
        self.post_json(&url, body, request_id).await
    }

    pub async fn generate(&self, body: &Value, request_id: &str) -> Result<GenerateReply> {
        let url = format!("{}/api/ghostwriter/generate", self.settings.ghostwriter_url);
        self.post_json(&url, body, request_id).await
    }

    /// Whether `{base}/health` answers with a 2xx.
    pub async fn is_healthy(&self, base_url: &str) -> bool {
        let url = format!("{}/health", base_url);
        match self.client.get(&url).propagate_trace(None).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("Health check against {} failed: {}", url, e);
                false
            }
        }
    }
}
