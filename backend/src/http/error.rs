//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::services::IngestionError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (bad query parameter, bad upload)
    BadRequest(String),
    /// The path exists but only answers the given verb
    MethodNotAllowed(&'static str),
    /// Internal server error
    Internal(String),
    /// Repository error
    Repository(RepositoryError),
    /// CSV upload rejected
    Ingestion(IngestionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::MethodNotAllowed(verb) => (
                StatusCode::METHOD_NOT_ALLOWED,
                ApiError::new(
                    "METHOD_NOT_ALLOWED",
                    format!("This route supports only {} requests.", verb),
                ),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Repository(e) => repository_error(e),
            AppError::Ingestion(IngestionError::Repository(e)) => repository_error(e),
            AppError::Ingestion(e) => {
                let error = match &e {
                    IngestionError::MalformedRow { row, record, .. } => {
                        ApiError::new("INVALID_DATA", e.to_string())
                            .with_details(format!("row={} record=[{}]", row, record))
                    }
                    _ => ApiError::new("BAD_REQUEST", e.to_string()),
                };
                (StatusCode::BAD_REQUEST, error)
            }
        };

        if status.is_server_error() {
            log::error!("{}: {}", error.code, error.message);
        }

        (status, Json(error)).into_response()
    }
}

fn repository_error(e: RepositoryError) -> (StatusCode, ApiError) {
    if e.is_validation() {
        (
            StatusCode::BAD_REQUEST,
            ApiError::new("VALIDATION_ERROR", e.to_string()),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("REPOSITORY_ERROR", e.to_string()),
        )
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<IngestionError> for AppError {
    fn from(err: IngestionError) -> Self {
        AppError::Ingestion(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
