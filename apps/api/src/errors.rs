use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extract::ExtractError;
use crate::llm_client::LlmError;

/// Application-level error type covering every way a submission can fail.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`;
/// the interactive shell instead renders `user_message()` into the page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("no resume file provided")]
    NoFileProvided,

    #[error("unsupported upload format: {0}")]
    UnsupportedFormat(String),

    #[error("extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The message shown on the page when a submission fails.
    /// Detail stays in the logs; the user gets something actionable.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NoFileProvided => "Please upload your resume to proceed.".to_string(),
            AppError::UnsupportedFormat(declared) => format!(
                "Unsupported file type '{declared}'. Please upload a PDF or DOCX file."
            ),
            AppError::ExtractionFailed(_) => {
                "Could not read your resume file. Please check the file and try again.".to_string()
            }
            AppError::EvaluationFailed(_) => {
                "The evaluation service is currently unavailable. Please try again shortly."
                    .to_string()
            }
            AppError::MalformedResponse(_) => {
                "The evaluation service returned an unexpected response. Please try again."
                    .to_string()
            }
            AppError::Internal(_) => "An internal error occurred. Please try again.".to_string(),
        }
    }
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        AppError::ExtractionFailed(e.to_string())
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::EvaluationFailed(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::NoFileProvided => (StatusCode::BAD_REQUEST, "NO_FILE_PROVIDED"),
            AppError::UnsupportedFormat(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_FORMAT")
            }
            AppError::ExtractionFailed(msg) => {
                tracing::warn!("extraction failed: {msg}");
                (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_FAILED")
            }
            AppError::EvaluationFailed(msg) => {
                tracing::error!("evaluation failed: {msg}");
                (StatusCode::BAD_GATEWAY, "EVALUATION_FAILED")
            }
            AppError::MalformedResponse(msg) => {
                tracing::error!("malformed model response: {msg}");
                (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.user_message()
            }
        }));

        (status, body).into_response()
    }
}
