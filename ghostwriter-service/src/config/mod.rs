use secrecy::Secret;
use service_core::config::{self as core_config, get_env, get_env_opt, get_env_parsed};
use service_core::error::AppError;

/// Port the service listens on unless `PORT`/`APP__PORT` says otherwise.
pub const DEFAULT_PORT: u16 = 8000;

/// Self-hosted inference server for the fine-tuned blog model.
const DEFAULT_DRAFT_MODEL_URL: &str = "http://localhost:8080/generate";

const DEFAULT_EXPANSION_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/gpt2-medium";

/// Gemini API base URL.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct GhostwriterConfig {
    pub common: core_config::Config,
    pub models: ModelConfig,
    pub gemini: GeminiConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Fine-tuned model that writes the first draft from `"{tone} {topic}"`.
    pub draft_url: String,
    /// General-purpose model that continues the draft.
    pub expansion_url: String,
    pub expansion_enabled: bool,
    pub api_token: Option<Secret<String>>,
    pub timeout_secs: u64,
}

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Without a key every polish call fails and the expanded draft is returned.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl GhostwriterConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load(DEFAULT_PORT)?;
        let is_prod = core_config::is_prod();
        let timeout_secs: u64 = get_env_parsed("INFERENCE_TIMEOUT_SECS", 120, is_prod)?;

        Ok(GhostwriterConfig {
            common,
            models: ModelConfig {
                draft_url: get_env(
                    "GHOSTWRITER_DRAFT_MODEL_URL",
                    Some(DEFAULT_DRAFT_MODEL_URL),
                    is_prod,
                )?,
                expansion_url: get_env(
                    "GHOSTWRITER_EXPANSION_MODEL_URL",
                    Some(DEFAULT_EXPANSION_MODEL_URL),
                    is_prod,
                )?,
                expansion_enabled: get_env_parsed("GHOSTWRITER_EXPANSION_ENABLED", true, is_prod)?,
                api_token: get_env_opt("HF_API_TOKEN").map(Secret::new),
                timeout_secs,
            },
            gemini: GeminiConfig {
                api_key: get_env_opt("GEMINI_API_KEY").map(Secret::new),
                model: get_env("GEMINI_MODEL", Some("gemini-1.5-flash"), is_prod)?,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), is_prod)?
                    .trim_end_matches('/')
                    .to_string(),
                timeout_secs,
            },
            cors: CorsConfig {
                allowed_origins: get_env("CORS_ALLOWED_ORIGINS", Some("*"), is_prod)?
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect(),
            },
        })
    }
}
