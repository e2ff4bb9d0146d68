use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Validation and document-reader failures are fatal to a request and map to
/// a single well-typed error; per-field extraction failures never reach this
/// type — the coordinator absorbs them into the result.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("File size {size} bytes exceeds maximum of {max} bytes")]
    FileTooLarge { size: usize, max: usize },

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Unsafe filename: {0}")]
    UnsafePath(String),

    #[error("Document parsing exceeded {0}s timeout")]
    ParsingTimeout(u64),

    #[error("Document parsing failed: {0}")]
    ParsingFailed(String),

    /// Registry drift: the validation gate admitted a type no reader is
    /// registered for. A configuration fault, not a caller error.
    #[error("No reader registered for content type: {0}")]
    UnsupportedFormat(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::FileTooLarge { .. } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "FILE_TOO_LARGE",
                self.to_string(),
            ),
            AppError::UnsupportedType(_) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_TYPE", self.to_string())
            }
            AppError::UnsafePath(_) => (StatusCode::BAD_REQUEST, "UNSAFE_PATH", self.to_string()),
            AppError::ParsingTimeout(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "PARSING_TIMEOUT",
                self.to_string(),
            ),
            AppError::ParsingFailed(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "PARSING_FAILED",
                self.to_string(),
            ),
            AppError::UnsupportedFormat(content_type) => {
                tracing::error!("Reader registry drift: no reader for {content_type}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal configuration error occurred".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
