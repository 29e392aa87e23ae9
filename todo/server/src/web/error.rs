use axum::Json;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::task::TaskId;
use crate::validation::ValidationError;

/// JSON body of every failed API request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable reason
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self { error }
    }
}

/// Error type for JSON API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or incorrect bearer token.
    #[error("Unauthorized")]
    Unauthorized,
    /// Email/password pair did not match any account.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Todo not found")]
    TaskNotFound(TaskId),
    /// Anything unexpected. The cause is logged, never sent to the caller.
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::TaskNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// An undecodable path segment is reported like any other malformed id.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Path rejected: {}", rejection);
        ApiError::Validation(ValidationError::InvalidId)
    }
}

/// A body that cannot be read (too large, aborted) is an internal failure.
impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::Internal(anyhow::anyhow!("Failed to read request body: {}", rejection))
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            ApiError::Internal(err) => tracing::error!("Request failed: {:#}", err),
            ApiError::TaskNotFound(id) => tracing::debug!("Task {} not found", id),
            _ => tracing::debug!("Request rejected: {}", self),
        }
        let status_code = self.status_code();
        (status_code, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
