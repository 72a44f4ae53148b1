//! HTTP handlers for proofread-service.

pub mod correct;
pub mod health;
pub mod spellcheck;

pub use correct::correct_text;
pub use health::{health_check, readiness_check};
pub use spellcheck::spellcheck_word;
