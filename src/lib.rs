// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod alerts;
pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod news;
pub mod ranking;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::config::AppConfig;
pub use crate::error::{ApiError, PipelineError, PUBLIC_ERROR_MESSAGE};
