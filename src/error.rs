//! Error types for the Bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::envelope::{ApiResponse, NoData, ResponseStatus};

/// Main application error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A business rule rejected the request payload
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested book does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The server reached a state that should not happen
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Envelope status: client errors are `fail`, server anomalies are `error`
    pub fn envelope_status(&self) -> ResponseStatus {
        match self {
            AppError::Validation(_) | AppError::NotFound(_) => ResponseStatus::Fail,
            AppError::Internal(_) => ResponseStatus::Error,
        }
    }

    /// Message sent back to the client
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            other => tracing::debug!("Request rejected: {}", other),
        }

        let body = Json(ApiResponse::<NoData> {
            status: self.envelope_status(),
            message: Some(self.message().to_string()),
            data: None,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
