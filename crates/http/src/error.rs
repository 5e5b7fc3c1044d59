//! API error type
//!
//! Errors are divided into a small number of kinds, essentially
//! distinguished by whose fault the error is: the service's (`server`), a
//! missing resource (`missing`), or the caller's (`user`).

use std::{error::Error as StdError, fmt};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Whose fault an [`ApiError`] is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// The operation looked fine on paper, but something went wrong
    Server,
    /// The thing referred to does not exist
    Missing,
    /// The request was well-formed but cannot be satisfied as asked
    User,
}

impl ErrorKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::Server => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Missing => StatusCode::NOT_FOUND,
            ErrorKind::User => StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Server => write!(f, "server"),
            ErrorKind::Missing => write!(f, "missing"),
            ErrorKind::User => write!(f, "user"),
        }
    }
}

/// Error returned to API clients.
///
/// `message` is meant for the user; the optional source is the underlying
/// error for developers. Displays as the source when there is one.
#[derive(Debug)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    source: Option<BoxError>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Any unexpected error
    pub fn unexpected(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::Server, message).with_source(source)
    }

    /// An underlying type is missing
    pub fn type_missing(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::Missing, message).with_source(source)
    }

    /// `what` failed validation
    pub fn validation(what: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::User, message).with_source(format!("{} failed validation", what))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Missing, message)
    }

    /// The application was not found. Can also mean the caller has no access to it.
    pub fn application_not_found(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::Missing, message).with_source(source)
    }

    /// Wrap any other error, blaming `requester`
    pub fn cover_all(source: impl Into<BoxError>, requester: ErrorKind) -> Self {
        let source = source.into();
        Self::new(requester, format!("Error: {}", source)).with_source(source)
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}", source),
            None => write!(f, "{}", self.message),
        }
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

#[derive(Serialize)]
struct ApiErrorRef<'a> {
    #[serde(rename = "type")]
    kind: ErrorKind,
    message: &'a str,
    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorOwned {
    #[serde(rename = "type")]
    kind: ErrorKind,
    #[serde(default)]
    message: String,
    #[serde(rename = "error", default)]
    error: Option<String>,
}

impl Serialize for ApiError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ApiErrorRef {
            kind: self.kind,
            message: &self.message,
            error: self.source.as_ref().map(|e| e.to_string()),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ApiError {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let owned = ApiErrorOwned::deserialize(deserializer)?;
        Ok(ApiError {
            kind: owned.kind,
            message: owned.message,
            source: owned
                .error
                .filter(|e| !e.is_empty())
                .map(BoxError::from),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, detail = %self.message, "Internal server error");
        }
        (status, Json(self)).into_response()
    }
}

impl From<kitbag_common::Error> for ApiError {
    fn from(err: kitbag_common::Error) -> Self {
        let kind = match &err {
            kitbag_common::Error::NotFound(_) => ErrorKind::Missing,
            kitbag_common::Error::Validation(_) => ErrorKind::User,
            _ => ErrorKind::Server,
        };
        ApiError::new(kind, err.to_string()).with_source(err)
    }
}
