#![allow(dead_code)]

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unreachable once upload validation has run; kept distinct so a routing
    /// bug surfaces under its own code instead of a generic 500.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read document {path}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("No text could be extracted from the document")]
    EmptyDocument,

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFormat(ext) => {
                tracing::error!("Unsupported format reached the extractor: {ext}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UNSUPPORTED_FORMAT",
                    format!("Unsupported file format: {ext}"),
                )
            }
            AppError::DocumentRead { path, source } => {
                tracing::warn!("Document read failed for {}: {source:?}", path.display());
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "DOCUMENT_READ_ERROR",
                    "Could not read the uploaded document. Please re-upload a valid file."
                        .to_string(),
                )
            }
            AppError::EmptyDocument => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EMPTY_DOCUMENT",
                "Could not extract text from the resume. Please check the file format."
                    .to_string(),
            ),
            AppError::Processing(msg) => {
                tracing::error!("Processing error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PROCESSING_ERROR",
                    "An error occurred while processing the resume".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
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
