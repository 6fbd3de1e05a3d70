use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompanionError {
    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    #[error("LLM rate limit exceeded, retry after {retry_after:?} seconds")]
    LlmRateLimit { retry_after: Option<u64> },

    /// Any failure of the hosted model call, wrapped for the caller.
    #[error("Error calling language model: {0}")]
    ModelInvocation(String),

    #[error("Page context source not supported: {0}")]
    ContextUnsupported(String),
}

impl CompanionError {
    pub fn status(&self) -> StatusCode {
        match self {
            CompanionError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CompanionError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            CompanionError::Validation(msg) => msg.clone(),
            other => {
                tracing::error!(error = %other, "Request failed");
                other.to_string()
            }
        };

        let body = Json(json!({ "detail": message }));

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for CompanionError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CompanionError::Validation(errors.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CompanionError>;
