use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// --- Domain/Infrastructure Errors ---

/// Failures of the facts table, regardless of which backend serves it.
/// Callers outside the web layer treat everything except `NotFound` as one
/// flat "the backend call failed" condition.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Fact not found with id {0}")]
    NotFound(i64),

    #[error("Database backend error: {0}")]
    Backend(#[from] anyhow::Error),

    #[error("Corrupt row data: {0}")]
    DataCorruption(String),
}

/// One variant per rule of the draft submission gate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("recipe text must not be empty")]
    EmptyText,
    #[error("recipe text is {0} characters, the limit is 200")]
    TextTooLong(usize),
    #[error("source must be an http or https URL, got '{0}'")]
    InvalidSource(String),
    #[error("a category must be chosen")]
    EmptyCategory,
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}

// --- Web Layer Error ---

#[derive(Error, Debug)]
pub enum AppError {
    // Input validation / request parsing errors
    #[error("Invalid draft: {0}")]
    InvalidDraft(#[from] DraftError),
    #[error("Fact not found with id {0}")]
    FactNotFound(i64),

    // Domain/Service level errors (mapped from RepoError)
    #[error("Could not access fact data")]
    Repository(#[source] RepoError),

    // Configuration / Startup errors
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Initialization error: {0}")]
    Init(String),
    #[error("Failed to build AWS request: {0}")]
    Build(#[from] aws_smithy_types::error::operation::BuildError),
}

// --- Conversions from Domain Errors to AppError ---

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => AppError::FactNotFound(id),
            e => AppError::Repository(e),
        }
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

// --- Axum Response Implementation ---

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            // 4xx Client Errors
            AppError::InvalidDraft(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::FactNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Fact not found with id {}", id))
            }

            // 5xx Server Errors
            AppError::Repository(e) => {
                tracing::error!(error.source = ?e, "Repository error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database operation failed".to_string())
            }
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error".to_string())
            }
            AppError::Init(msg) => {
                tracing::error!("Initialization error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server initialization error".to_string())
            }
            AppError::Build(e) => {
                tracing::error!("AWS request build error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build backend request".to_string())
            }
        };

        tracing::debug!(error.message = %error_message, error.detail = %self, "Responding with error");

        let body = Json(serde_json::json!({ "error": error_message }));
        (status, body).into_response()
    }
}
