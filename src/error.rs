//! Error types for the mood agent

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Message returned to callers for any fault we do not want to describe.
pub const GENERIC_INTERNAL_ERROR: &str =
    "An internal error occurred while processing your request.";

#[derive(Error, Debug)]
pub enum AgentError {

    // =============================
    // Client-facing Errors
    // =============================

    #[error("{0}")]
    InvalidRequest(String),

    // =============================
    // External Services (absorbed locally)
    // =============================

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Verse API error: {0}")]
    VerseApi(String),

    // =============================
    // Startup / Internal
    // =============================

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AgentError {
    /// HTTP status surfaced for this error when it escapes a handler.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AgentError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show the caller. Internal faults never leak details.
    pub fn public_message(&self) -> String {
        match self {
            AgentError::InvalidRequest(msg) => msg.clone(),
            _ => GENERIC_INTERNAL_ERROR.to_string(),
        }
    }
}

impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Unhandled error while serving request: {}", self);
        }

        let body = serde_json::json!({
            "error": self.public_message(),
            "code": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
