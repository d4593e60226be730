//! HTTP handlers for the NLP service.

pub mod health;
pub mod text;
pub mod tickets;

pub use health::{health_check, metrics, readiness_check};
