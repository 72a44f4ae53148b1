pub mod ghostwriter;
pub mod metrics;
pub mod prompts;
pub mod providers;

pub use ghostwriter::Ghostwriter;
pub use providers::{GenerationParams, ProviderError, TextProvider};
