//! # Error Handling
//!
//! Error types for the service and their conversion into HTTP responses.
//!
//! The session gate itself never produces an error: a missing cookie is the
//! handled path and turns into a redirect. These types cover the API
//! handlers and startup configuration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-wide error type for request handlers
///
/// ## The `#[from]` attribute
/// `ConfigError` converts automatically with `?`, so `AppState::new` can
/// report configuration problems through `AppResult`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid configuration, raised while building the state
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Resource not found errors (404)
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Convert AppError into an HTTP response
///
/// Internal details are logged and replaced with a generic message; the
/// client-facing variants keep their message. The body is always
/// `{ "error": "..." }`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Config(e) => {
                tracing::error!("Configuration error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error".to_string())
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Errors raised while loading configuration from the environment
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue { var: String, reason: String },
    #[error("Required file not found: {0}")]
    MissingFile(String),
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
