//! Blog generation pipeline.
//!
//! 1. The fine-tuned draft model writes a short post from `"{tone} {topic}"`.
//! 2. An optional general-purpose model continues the draft.
//! 3. The editor polishes the result, or rewrites it when it is off topic.
//!
//! Draft and expansion failures fail the request. An editor failure falls
//! back to the text from the previous stage.

use super::metrics::record_polish_fallback;
use super::prompts::{draft_prompt, editor_prompt};
use super::providers::{GenerationParams, ProviderError, TextProvider};
use service_core::observability::record_inference;
use std::sync::Arc;
use std::time::Instant;

pub struct Ghostwriter {
    draft: Arc<dyn TextProvider>,
    expansion: Option<Arc<dyn TextProvider>>,
    editor: Arc<dyn TextProvider>,
}

/// Beam search settings for the fine-tuned draft model.
pub fn draft_params() -> GenerationParams {
    GenerationParams {
        max_length: Some(350),
        num_beams: Some(5),
        no_repeat_ngram_size: Some(2),
        early_stopping: Some(true),
        return_full_text: Some(true),
        ..Default::default()
    }
}

/// Sampling settings for the expansion model.
pub fn expansion_params() -> GenerationParams {
    GenerationParams {
        max_length: Some(600),
        temperature: Some(0.85),
        top_k: Some(50),
        top_p: Some(0.95),
        do_sample: Some(true),
        return_full_text: Some(true),
        ..Default::default()
    }
}

impl Ghostwriter {
    pub fn new(
        draft: Arc<dyn TextProvider>,
        expansion: Option<Arc<dyn TextProvider>>,
        editor: Arc<dyn TextProvider>,
    ) -> Self {
        Self {
            draft,
            expansion,
            editor,
        }
    }

    pub fn editor(&self) -> &Arc<dyn TextProvider> {
        &self.editor
    }

    /// Write a blog post about `topic` in the given `tone`.
    #[tracing::instrument(skip(self))]
    pub async fn write(&self, topic: &str, tone: &str) -> Result<String, ProviderError> {
        let draft = timed(self.draft.as_ref(), &draft_prompt(topic, tone), &draft_params()).await?;

        let text = match &self.expansion {
            Some(expansion) => timed(expansion.as_ref(), &draft, &expansion_params()).await?,
            None => draft,
        };

        let prompt = editor_prompt(topic, tone, &text);
        match timed(self.editor.as_ref(), &prompt, &GenerationParams::default()).await {
            Ok(polished) => Ok(polished.trim().to_string()),
            Err(e) => {
                tracing::warn!(
                    editor = self.editor.name(),
                    error = %e,
                    "Editor failed, returning unpolished text"
                );
                record_polish_fallback();
                Ok(text.trim().to_string())
            }
        }
    }
}

/// Run one stage and record its latency under the provider's name.
async fn timed(
    provider: &dyn TextProvider,
    prompt: &str,
    params: &GenerationParams,
) -> Result<String, ProviderError> {
    let start = Instant::now();
    let result = provider.generate(prompt, params).await;
    let elapsed = start.elapsed().as_secs_f64();

    match &result {
        Ok(text) => {
            record_inference(provider.name(), "ok", elapsed);
            tracing::debug!(
                provider = provider.name(),
                output_len = text.len(),
                elapsed_secs = elapsed,
                "Stage complete"
            );
        }
        Err(e) => {
            record_inference(provider.name(), "error", elapsed);
            tracing::error!(provider = provider.name(), error = %e, "Stage failed");
        }
    }

    result
}
