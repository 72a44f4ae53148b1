//! HTTP handlers for ai-gateway.

pub mod ai;
pub mod health;

pub use ai::{correct_proxy, generate_proxy, spellcheck_proxy};
pub use health::{health_check, readiness_check};
