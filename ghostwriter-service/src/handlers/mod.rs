//! HTTP handlers for ghostwriter-service.

pub mod generate;
pub mod health;

pub use generate::generate_blog;
pub use health::{health_check, readiness_check};
