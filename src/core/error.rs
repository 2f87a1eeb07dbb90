//! Error types and handling for the gateway.
//!
//! This module provides a unified error type [`AppError`] whose HTTP rendering
//! is the failure half of the response envelope: `{"error": <message>}` with
//! 400 for validation failures and 500 for everything that went wrong upstream.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the application.
///
/// Every handler failure is one of these; the display text is what the client
/// sees in the `error` field.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required query parameter was absent or empty
    #[error("Missing '{0}' parameter")]
    MissingParameter(&'static str),

    /// The chat provider answered without a `choices` array
    #[error("No response")]
    NoResponse,

    /// The image endpoint answered with a status other than 200
    #[error("Failed to generate image")]
    ImageGenerationFailed,

    /// A provider credential is not configured
    #[error("{0} is not configured")]
    MissingCredential(String),

    /// HTTP request errors from the reqwest client
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("{0}")]
    Serialization(#[from] serde_json::Error),

    /// Host name resolution failures
    #[error("{0}")]
    Resolve(#[from] std::io::Error),

    /// Upstream payload was present but unusable
    #[error("{0}")]
    Upstream(String),

    /// Generic internal server errors with custom message
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = %message, "Request failed");
        } else {
            tracing::debug!(error = %message, "Request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Convenience type alias for Results using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
