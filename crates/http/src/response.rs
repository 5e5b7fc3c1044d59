//! Response writers
//!
//! Error responses honour the request's `Accept` header: clients that ask
//! for JSON get the serialized [`ApiError`], clients that ask for plain text
//! get the user message, and clients that send no `Accept` header at all
//! get the error text.

use axum::{
    body::{Body, Bytes},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::{ApiError, ErrorKind};
use crate::negotiation::AcceptHeader;
use crate::{APPLICATION_JSON, TEXT_PLAIN};

const JSON_UTF8: &str = "application/json; charset=utf-8";
const TEXT_UTF8: &str = "text/plain; charset=utf-8";

/// Content types an error body can be rendered as, most preferred first
const ERROR_CONTENT_TYPES: [&str; 2] = [APPLICATION_JSON, TEXT_PLAIN];

fn text(status: StatusCode, body: String) -> Response {
    (status, [(CONTENT_TYPE, TEXT_UTF8)], body).into_response()
}

/// Render `err` with `status`, in the representation the client asked for
pub fn write_error_with_code(headers: &HeaderMap, status: StatusCode, err: &ApiError) -> Response {
    let accept = AcceptHeader::from_headers(headers);

    if !accept.is_empty() {
        match accept.negotiate(&ERROR_CONTENT_TYPES) {
            APPLICATION_JSON => {
                return match serde_json::to_vec(err) {
                    Ok(body) => (status, [(CONTENT_TYPE, JSON_UTF8)], body).into_response(),
                    Err(encode_err) => text(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!(
                            "Error encoding error response: {}\n\nOriginal error: {}",
                            encode_err, err
                        ),
                    ),
                };
            }
            TEXT_PLAIN => return text(status, err.message.clone()),
            _ => {}
        }
    }

    text(status, err.to_string())
}

fn error_response_for(
    requester: ErrorKind,
    headers: &HeaderMap,
    err: impl Into<anyhow::Error>,
) -> Response {
    let err = err.into();
    tracing::error!(error = %format!("{:#}", err), "Request failed");

    let api_error = match err.downcast::<ApiError>() {
        Ok(api_error) => api_error,
        Err(other) => ApiError::cover_all(other, requester),
    };

    write_error_with_code(headers, api_error.status_code(), &api_error)
}

/// Error response for a failure caused by the caller.
///
/// An [`ApiError`] keeps its own kind; any other error is reported as a `user` error.
pub fn error_response(headers: &HeaderMap, err: impl Into<anyhow::Error>) -> Response {
    error_response_for(ErrorKind::User, headers, err)
}

/// Like [`error_response`], but other errors are reported as `server` errors
pub fn error_response_for_server(headers: &HeaderMap, err: impl Into<anyhow::Error>) -> Response {
    error_response_for(ErrorKind::Server, headers, err)
}

/// Plain text `200 OK`, e.g. log output
pub fn string_response(result: impl Into<String>) -> Response {
    text(StatusCode::OK, result.into())
}

/// Raw bytes `200 OK` with the given content type, e.g. an image
pub fn bytes_response(content_type: &str, result: impl Into<Bytes>) -> Response {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, content_type.to_owned())],
        result.into(),
    )
        .into_response()
}

/// JSON `200 OK`. A value that fails to serialize becomes an error response.
pub fn json_response<T: Serialize>(headers: &HeaderMap, result: &T) -> Response {
    match serde_json::to_vec(result) {
        Ok(body) => (StatusCode::OK, [(CONTENT_TYPE, JSON_UTF8)], body).into_response(),
        Err(e) => error_response(headers, e),
    }
}

/// Stream `body` with the given content type
pub fn reader_response(content_type: &str, body: impl Into<Body>) -> Response {
    ([(CONTENT_TYPE, content_type.to_owned())], body.into()).into_response()
}

/// Stream `body` as a download named `file_name`
pub fn reader_file_response(file_name: &str, content_type: &str, body: impl Into<Body>) -> Response {
    (
        [
            (CONTENT_DISPOSITION, format!("attachment; filename={}", file_name)),
            (CONTENT_TYPE, content_type.to_owned()),
        ],
        body.into(),
    )
        .into_response()
}
