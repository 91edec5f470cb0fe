use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{debug, error};

use crate::response::{ApiResponse, INTERNAL_ERROR_MESSAGE};

pub const MALFORMED_REQUEST_MESSAGE: &str = "Please provide FirstName LastName and bio for the user";

/// Per-request failures. Each one is terminal for the request and is
/// rendered inside the `{"error": ...}` envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", MALFORMED_REQUEST_MESSAGE)]
    MalformedRequest,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// Detail is logged server side only.
    #[error("{}", INTERNAL_ERROR_MESSAGE)]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => ApiError::Validation(msg),
            ServiceError::NotFound(_) => ApiError::NotFound(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        debug!(reason = %e, "rejected request body");
        ApiError::MalformedRequest
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            error!(error = %detail, "internal error");
        }
        ApiResponse::error(self.status(), self.to_string()).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
