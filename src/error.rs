//! Error types and error handling for the application
//!
//! Every request-level failure is an `AppError`. Bad input maps to 400,
//! anything that goes wrong while reading the document maps to 500.

use crate::extract::ExtractionError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// The multipart body has no `file` field
    #[error("No file part in the request")]
    MissingFile,

    /// The `file` field was sent without a filename
    #[error("No selected file")]
    NoSelectedFile,

    /// The uploaded file has no content
    #[error("Uploaded file is empty: {0}")]
    EmptyUpload(String),

    /// The file extension is not one of xlsx, xls, pdf
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// The request body could not be read as multipart form data
    #[error("Invalid multipart request: {0}")]
    InvalidMultipart(String),

    /// The request body exceeds the configured upload limit
    #[error("Uploaded file is too large: {0}")]
    UploadTooLarge(String),

    /// The document could not be read
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFile
            | AppError::NoSelectedFile
            | AppError::EmptyUpload(_)
            | AppError::UnsupportedFileType(_)
            | AppError::InvalidMultipart(_) => StatusCode::BAD_REQUEST,
            AppError::UploadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Extraction(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_input_is_bad_request() {
        assert_eq!(AppError::MissingFile.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::NoSelectedFile.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UnsupportedFileType("csv".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_processing_failures_are_server_errors() {
        let err = AppError::from(ExtractionError::NoWorksheet);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Workbook contains no worksheets");

        let err = AppError::from(anyhow::anyhow!("worker crashed"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AppError::UnsupportedFileType("csv".to_string()).to_string(),
            "Unsupported file type: csv"
        );
        assert_eq!(
            AppError::MissingFile.to_string(),
            "No file part in the request"
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::NoSelectedFile.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
