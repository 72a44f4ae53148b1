//! service-core: Shared infrastructure for the writing-assistant services.
pub mod config;
pub mod error;
pub mod extract;
pub mod inference;
pub mod middleware;
pub mod observability;
pub mod server;
