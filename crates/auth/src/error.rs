//! Authentication errors

use axum::response::{IntoResponse, Response};
use kitbag_http::{ApiError, ErrorKind};

/// Authentication error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication header is invalid: {0}")]
    InvalidAuthorizationHeader(String),

    #[error("Impersonation cannot be done without both user and group being set")]
    InvalidImpersonation,

    #[error("could not parse token ({0})")]
    InvalidToken(String),

    #[error("token has no '{0}' claim")]
    MissingClaim(&'static str),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidImpersonation => ApiError::unexpected("Problems impersonating", err),
            other => ApiError::cover_all(other, ErrorKind::User),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
