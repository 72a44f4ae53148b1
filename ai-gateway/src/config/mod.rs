use service_core::config::{self as core_config, get_env, get_env_parsed};
use service_core::error::AppError;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub common: core_config::Config,
    pub upstream: UpstreamSettings,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct UpstreamSettings {
    /// Base URL of proofread-service (`/correct`, `/spellcheck`).
    pub proofread_url: String,
    /// Base URL of ghostwriter-service (`/api/ghostwriter/generate`).
    pub ghostwriter_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load(DEFAULT_PORT)?;
        let is_prod = core_config::is_prod();

        Ok(GatewayConfig {
            common,
            upstream: UpstreamSettings {
                proofread_url: get_env(
                    "PROOFREAD_SERVICE_URL",
                    Some("http://localhost:8001"),
                    is_prod,
                )?
                .trim_end_matches('/')
                .to_string(),
                ghostwriter_url: get_env(
                    "GHOSTWRITER_SERVICE_URL",
                    Some("http://localhost:8000"),
                    is_prod,
                )?
                .trim_end_matches('/')
                .to_string(),
                // Generation chains three models, so allow it plenty of time.
                timeout_secs: get_env_parsed("UPSTREAM_TIMEOUT_SECS", 300, is_prod)?,
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
