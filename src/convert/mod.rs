//! Lesson conversion and health endpoints.

pub mod handlers;

pub use handlers::{config, HealthResponse};
