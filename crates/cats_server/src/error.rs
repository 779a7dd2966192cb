use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cats_core::{EntityRef, ServiceError};
use log::error;
use thiserror::Error;
use tokio::task::JoinError;

/// Stable error code constants sent in the `code` field of error bodies.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const SERVER_ERROR: &str = "SERVER_ERROR";
}

/// Message returned for every server-side failure. The cause is only logged.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Error type returned by every handler.
///
/// ```json
/// {"code": "NOT_FOUND", "error": "customer 7 not found"}
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// Target record does not exist. HTTP 404.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// Path or body could not be decoded. Carries the extractor's 4xx status.
    #[error("{message}")]
    InvalidRequest { status: StatusCode, message: String },

    /// Storage or internal failure. HTTP 500.
    #[error("{0}")]
    Server(String),
}

impl ApiError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => error_code::NOT_FOUND,
            ApiError::InvalidRequest { .. } => error_code::INVALID_REQUEST,
            ApiError::Server(_) => error_code::SERVER_ERROR,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest { status, .. } => *status,
            ApiError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message; server failures are masked.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::NotFound(_) | ApiError::InvalidRequest { .. } => self.to_string(),
            ApiError::Server(_) => SERVER_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::NotFound(target) => ApiError::NotFound(target),
            other => ApiError::Server(other.to_string()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        ApiError::InvalidRequest {
            status: value.status(),
            message: value.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        ApiError::InvalidRequest {
            status: value.status(),
            message: value.body_text(),
        }
    }
}

impl From<JoinError> for ApiError {
    fn from(value: JoinError) -> Self {
        ApiError::Server(format!("database task failed: {value}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Server(cause) = &self {
            error!(
                "event=request_failed module=api status=error error_code={} error={}",
                self.error_code(),
                cause
            );
        }
        let status = self.status_code();
        let body = serde_json::json!({
            "code": self.error_code(),
            "error": self.public_message(),
        });
        (status, axum::Json(body)).into_response()
    }
}
