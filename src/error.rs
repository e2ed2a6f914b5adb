//! Error types for the pipelines and the HTTP boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// The only error text a client ever sees.
pub const PUBLIC_ERROR_MESSAGE: &str = "Failed to fetch news";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to serialize ranking request: {0}")]
    RankingRequest(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// `500 {"error": "Failed to fetch news"}`
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": PUBLIC_ERROR_MESSAGE })),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self, "request failed");
        internal_error_response()
    }
}
