use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use captioner_core::shared::caption_error::CaptionError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// JSON error body plus the status that classifies who caused it.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Map a pipeline failure. Validation messages are returned as-is;
    /// server-side failures are prefixed with `context`.
    pub fn from_caption(context: &str, err: CaptionError) -> Self {
        match err {
            CaptionError::NotFound(name) => {
                log::warn!("Requested file not found: {name}");
                Self::new(StatusCode::NOT_FOUND, "File not found")
            }
            CaptionError::InvalidInput(message) => Self::bad_request(message),
            err if err.is_client_error() => Self::bad_request(err.to_string()),
            err => {
                log::error!("{context}: {err}");
                Self::internal(format!("{context}: {err}"))
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_failure_is_server_error_with_cause() {
        let err = ApiError::from_caption(
            "Failed to generate captions",
            CaptionError::ExternalTool {
                tool: "ffmpeg".into(),
                stderr: "moov atom not found".into(),
            },
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.message(),
            "Failed to generate captions: ffmpeg error: moov atom not found"
        );
    }

    #[test]
    fn test_engine_failure_is_server_error() {
        let err = ApiError::from_caption("Failed to generate video", CaptionError::Engine("oom".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().starts_with("Failed to generate video: "));
    }

    #[test]
    fn test_validation_failure_is_bad_request_without_prefix() {
        let err = ApiError::from_caption(
            "Failed to generate captions",
            CaptionError::InvalidInput("No file selected".into()),
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "No file selected");
    }

    #[test]
    fn test_not_found_is_404() {
        let err = ApiError::from_caption("Failed to download file", CaptionError::NotFound("x.mkv".into()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "File not found");
    }
}
