use secrecy::Secret;
use service_core::config::{self as core_config, get_env, get_env_opt, get_env_parsed};
use service_core::error::AppError;
use std::path::PathBuf;

/// Port the service listens on unless `PORT`/`APP__PORT` says otherwise.
pub const DEFAULT_PORT: u16 = 8001;

/// Hard upper bound on suggestions per word.
pub const MAX_SUGGESTIONS: usize = 5;

const DEFAULT_GRAMMAR_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/prithivida/grammar_error_correcter_v1";

#[derive(Debug, Clone)]
pub struct ProofreadConfig {
    pub common: core_config::Config,
    pub grammar: GrammarConfig,
    pub spelling: SpellingConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct GrammarConfig {
    /// Text2text inference endpoint serving the correction model.
    pub model_url: String,
    /// Task prefix the model was trained with.
    pub prompt_prefix: String,
    pub max_length: u32,
    pub api_token: Option<Secret<String>>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SpellingConfig {
    /// `word [count]` file; the embedded English list is used when unset.
    pub dictionary_path: Option<PathBuf>,
    /// Maximum edit distance searched (1 or 2).
    pub distance: u8,
    pub max_suggestions: usize,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl ProofreadConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load(DEFAULT_PORT)?;
        let is_prod = core_config::is_prod();

        let distance: u8 = get_env_parsed("SPELLCHECK_DISTANCE", 2, is_prod)?;
        if !(1..=2).contains(&distance) {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "SPELLCHECK_DISTANCE must be 1 or 2, got {}",
                distance
            )));
        }

        let max_suggestions: usize =
            get_env_parsed("SPELLCHECK_MAX_SUGGESTIONS", MAX_SUGGESTIONS, is_prod)?;

        Ok(ProofreadConfig {
            common,
            grammar: GrammarConfig {
                model_url: get_env("GRAMMAR_MODEL_URL", Some(DEFAULT_GRAMMAR_MODEL_URL), is_prod)?,
                prompt_prefix: get_env("GRAMMAR_PROMPT_PREFIX", Some("gec: "), is_prod)?,
                max_length: get_env_parsed("GRAMMAR_MAX_LENGTH", 128, is_prod)?,
                api_token: get_env_opt("HF_API_TOKEN").map(Secret::new),
                timeout_secs: get_env_parsed("INFERENCE_TIMEOUT_SECS", 60, is_prod)?,
            },
            spelling: SpellingConfig {
                dictionary_path: get_env_opt("SPELLCHECK_DICTIONARY_PATH").map(PathBuf::from),
                distance,
                max_suggestions: max_suggestions.min(MAX_SUGGESTIONS),
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
