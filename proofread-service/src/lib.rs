//! proofread-service: grammar correction and spelling suggestions over HTTP.

pub mod config;
pub mod handlers;
pub mod services;
pub mod startup;

pub use startup::AppState;
