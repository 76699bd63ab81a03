use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::onet::DirectoryError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Callers only ever see a short, non-technical `{"error": "..."}` body; the
/// underlying detail is logged server-side.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Occupation directory error: {source}")]
    Directory {
        message: &'static str,
        #[source]
        source: DirectoryError,
    },

    #[error("Upstream error (status {status}): {detail}")]
    Upstream {
        status: u16,
        message: &'static str,
        detail: String,
    },

    #[error("Parse error: {detail}")]
    Parse {
        message: &'static str,
        detail: String,
    },

    #[error("Invalid model output: {detail}")]
    InvalidModelOutput {
        message: &'static str,
        detail: String,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Classifies an LLM failure. `message` is what the caller sees for
    /// upstream and parse failures.
    pub fn from_llm(err: LlmError, message: &'static str) -> Self {
        match err {
            LlmError::Api { status, message: detail } => AppError::Upstream {
                status,
                message,
                detail,
            },
            LlmError::Parse(e) => AppError::Parse {
                message,
                detail: e.to_string(),
            },
            LlmError::EmptyContent => AppError::Parse {
                message,
                detail: "model returned no text".to_string(),
            },
            LlmError::Http(e) => AppError::Internal(anyhow::anyhow!("LLM request failed: {e}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "API key not configured".to_string(),
                )
            }
            AppError::Directory { message, source } => {
                tracing::error!("Occupation directory error: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            AppError::Upstream {
                status,
                message,
                detail,
            } => {
                tracing::error!("Upstream error (status {status}): {detail}");
                let status =
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, message.to_string())
            }
            AppError::Parse { message, detail } => {
                tracing::error!("Parse error: {detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            AppError::InvalidModelOutput { message, detail } => {
                tracing::error!("Invalid model output: {detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
