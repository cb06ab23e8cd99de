//! HTTP-facing error type.
//!
//! Every failure of `/convert` ends up here and is rendered as a JSON body
//! with the status code the API contract promises.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::document::CompilationError;
use crate::lesson::ValidationError;
use crate::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Request too large")]
    PayloadTooLarge,
    #[error("Content-Type must be application/json")]
    UnsupportedContentType,
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("Failed to read request body: {0}")]
    Body(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Compilation(CompilationError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CompilationError> for ApiError {
    fn from(e: CompilationError) -> Self {
        match e {
            CompilationError::TempDir(_) | CompilationError::WriteSource(_) => {
                ApiError::Internal(e.to_string())
            }
            other => ApiError::Compilation(other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UnsupportedContentType
            | ApiError::InvalidJson(_)
            | ApiError::Body(_)
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Compilation(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Compilation(e) => ErrorResponse::with_details("PDF compilation failed", &e.to_string()),
            ApiError::Internal(detail) => {
                log::error!("Unexpected error: {}", detail);
                ErrorResponse::new("Internal server error")
            }
            other => ErrorResponse::new(&other.to_string()),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
