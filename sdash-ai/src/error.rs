//! Error types for sdash-ai

use crate::extractor::ExtractError;
use crate::services::SessionError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Conflict (409) - an analysis batch is already running
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Upload rejected while extracting text (413 / 415 / 422)
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// sdash-common error
    #[error("Common error: {0}")]
    Common(#[from] sdash_common::Error),
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NoTexts => ApiError::BadRequest(err.to_string()),
            SessionError::Busy => ApiError::Conflict(err.to_string()),
            SessionError::HistoryNotFound(_) => ApiError::NotFound(err.to_string()),
            SessionError::Extract(e) => ApiError::Extract(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::Extract(ref err) => {
                let (status, code) = match err {
                    ExtractError::FileTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE"),
                    ExtractError::UnsupportedFormat { .. } => {
                        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_FORMAT")
                    }
                    ExtractError::EmptyContent { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_CONTENT"),
                    ExtractError::MalformedInput { .. } => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_INPUT")
                    }
                };
                (status, code, err.to_string())
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
            }
            ApiError::Common(ref err) => match err {
                sdash_common::Error::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
                sdash_common::Error::InvalidInput(_) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.to_string())
                }
                _ => {
                    error!("Common error: {}", err);
                    (StatusCode::INTERNAL_SERVER_ERROR, "COMMON_ERROR", err.to_string())
                }
            },
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::FileFormat;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_session_errors_map_to_statuses() {
        assert_eq!(status_of(SessionError::NoTexts.into()), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(SessionError::Busy.into()), StatusCode::CONFLICT);
        assert_eq!(
            status_of(SessionError::HistoryNotFound("history-x".to_string()).into()),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_extract_errors_map_to_statuses() {
        assert_eq!(
            status_of(ExtractError::FileTooLarge { size: 11, max: 10 }.into()),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            status_of(
                ExtractError::UnsupportedFormat {
                    extension: ".xyz".to_string()
                }
                .into()
            ),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            status_of(
                ExtractError::EmptyContent {
                    format: FileFormat::Pdf
                }
                .into()
            ),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_common_invalid_input_is_bad_request() {
        let err = ApiError::from(sdash_common::Error::InvalidInput("bad".to_string()));
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }
}
