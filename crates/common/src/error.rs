//! Error type shared by the Kitbag crates
//!
//! Handlers may return it directly; it renders as
//! `{"error": {"code": ..., "message": ...}}`. Code that answers API clients
//! usually converts it into `kitbag_http::ApiError` first.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Anything without a more specific variant
    #[error("unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("invalid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Bad environment or startup configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Input the caller can fix, such as a malformed timestamp
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Status code of the rendered response
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for clients
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Unexpected(_) => "UNEXPECTED",
            Error::Serialization(_) => "INVALID_JSON",
            Error::Config(_) => "CONFIGURATION",
            Error::Validation(_) => "VALIDATION",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "Request failed");
        }

        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}
