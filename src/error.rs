use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid {input} dimensions: {width}x{height} (width and height must be positive)")]
    InvalidDimension {
        input: &'static str,
        width: f64,
        height: f64,
    },

    #[error("Failed to initialize text recognizer: {0}")]
    InitializationError(String),

    #[error("Text recognition failed: {0}")]
    RecognitionError(String),

    #[error("Failed to decode frame: {0}")]
    DecodeError(String),

    #[error("Text recognizer not available: {0}")]
    RecognizerUnavailable(String),

    #[error("Image too large: {size} bytes (max: {max} bytes)")]
    ImageTooLarge { size: usize, max: usize },

    #[error("Missing file in request")]
    MissingFile,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ScanError {
    /// Stable machine-readable code reported alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            ScanError::InvalidDimension { .. } => "INVALID_DIMENSION",
            ScanError::InitializationError(_) => "INIT_ERROR",
            ScanError::RecognitionError(_) => "RECOGNITION_ERROR",
            ScanError::DecodeError(_) => "DECODE_ERROR",
            ScanError::RecognizerUnavailable(_) => "RECOGNIZER_UNAVAILABLE",
            ScanError::ImageTooLarge { .. } => "IMAGE_TOO_LARGE",
            ScanError::MissingFile => "MISSING_FILE",
            ScanError::InvalidRequest(_) => "INVALID_REQUEST",
            ScanError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ScanError::InvalidDimension { .. }
            | ScanError::DecodeError(_)
            | ScanError::MissingFile
            | ScanError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ScanError::RecognitionError(_) => StatusCode::BAD_GATEWAY,
            ScanError::RecognizerUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ScanError::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ScanError::InitializationError(_) | ScanError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ScanError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimension_maps_to_bad_request() {
        let err = ScanError::InvalidDimension {
            input: "capture",
            width: 0.0,
            height: 720.0,
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "INVALID_DIMENSION");
        assert!(err.to_string().contains("capture"));
    }

    #[test]
    fn test_engine_failure_is_distinct_from_validation() {
        let err = ScanError::RecognitionError("model crashed".to_string());
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_ne!(err.code(), "INVALID_DIMENSION");
    }
}
