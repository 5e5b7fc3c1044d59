//! Credential extraction from request headers and query

use std::collections::HashMap;

use axum::{
    extract::Query,
    http::{header::AUTHORIZATION, HeaderMap, Uri},
};

use crate::error::AuthError;
use crate::impersonation::Impersonation;

/// User to impersonate
pub const IMPERSONATE_USER: &str = "impersonate-user";
/// Comma separated groups to impersonate
pub const IMPERSONATE_GROUP: &str = "impersonate-group";

/// First value of a header, `""` when absent or not visible ASCII
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// Token from the `Authorization` header.
///
/// The header must be exactly two words separated by a single space, e.g.
/// `Bearer <token>`; the second word is the token.
pub fn bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let authorization = header_str(headers, AUTHORIZATION.as_str());
    let parts: Vec<&str> = authorization.split(' ').collect();

    match parts.as_slice() {
        [_, token] => Ok(token.to_string()),
        _ => Err(AuthError::InvalidAuthorizationHeader(
            authorization.to_string(),
        )),
    }
}

/// Impersonation from the `Impersonate-User` and `Impersonate-Group` headers
pub fn impersonation(headers: &HeaderMap) -> Result<Impersonation, AuthError> {
    let user = header_str(headers, IMPERSONATE_USER);

    let group_header = header_str(headers, IMPERSONATE_GROUP).trim();
    let groups = if group_header.is_empty() {
        Vec::new()
    } else {
        group_header
            .split(',')
            .map(|group| group.trim().to_string())
            .collect()
    };

    Impersonation::new(user, groups)
}

/// `token` query parameter, used where headers cannot be set (e.g. websockets)
pub fn token_from_query(uri: &Uri) -> Option<String> {
    let Query(mut params) = Query::<HashMap<String, String>>::try_from_uri(uri).ok()?;
    params.remove("token").filter(|token| !token.is_empty())
}
