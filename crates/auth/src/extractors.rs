//! Axum extractors for authentication

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::Response,
};
use kitbag_http::{error_response, ApiError};

use crate::accounts::Accounts;

/// Takes the [`Accounts`] stored by the accounts middleware, or reads them
/// from the headers when the route is not behind it.
///
/// Rejections are negotiated error responses.
impl<S> FromRequestParts<S> for Accounts
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(accounts) = parts.extensions.get::<Accounts>() {
            return Ok(accounts.clone());
        }

        Accounts::from_headers(&parts.headers)
            .map_err(|err| error_response(&parts.headers, ApiError::from(err)))
    }
}
