//! Content-type negotiation
//!
//! [`negotiate_content_type`] never fails: a malformed `Accept` header is
//! logged and treated as if the client expressed no preference.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::accept::{accept_values, parse_accept, AcceptError, AcceptSpec};

/// Pick a content type from `ordered_prefs` (most preferred first) for the
/// given `Accept` header lines.
///
/// - no usable Accept specs: the first preference
/// - otherwise the supported type with the highest quality, ties going to
///   the one listed first in `ordered_prefs`
/// - none of the accepted types supported: `""`
///
/// Matching is exact; wildcards such as `*/*` only match a preference that
/// is literally the same string.
pub fn negotiate_content_type<'a, I, S, P>(values: I, ordered_prefs: &'a [P]) -> &'a str
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: AsRef<str>,
{
    let specs = parse_accept(values).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Error getting header Accept");
        Vec::new()
    });

    let Some(default) = ordered_prefs.first() else {
        return "";
    };
    if specs.is_empty() {
        return default.as_ref();
    }

    let mut preferred: Vec<(usize, &AcceptSpec)> = specs
        .iter()
        .filter_map(|spec| index_of(ordered_prefs, &spec.value).map(|index| (index, spec)))
        .collect();

    preferred.sort_by(|(index_a, a), (index_b, b)| {
        b.quality
            .total_cmp(&a.quality)
            .then_with(|| index_a.cmp(index_b))
    });

    preferred
        .first()
        .map(|(index, _)| ordered_prefs[*index].as_ref())
        .unwrap_or("")
}

fn index_of<P: AsRef<str>>(prefs: &[P], search: &str) -> Option<usize> {
    prefs.iter().position(|p| p.as_ref() == search)
}

/// None of the supported content types is acceptable to the client
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("none of the supported content types is acceptable: {}", .supported.join(", "))]
pub struct NotAcceptable {
    pub supported: Vec<String>,
}

impl IntoResponse for NotAcceptable {
    fn into_response(self) -> Response {
        (StatusCode::NOT_ACCEPTABLE, self.to_string()).into_response()
    }
}

/// [`negotiate_content_type`] for a request, with "nothing acceptable" as an error
pub fn select_content_type<'a, P: AsRef<str>>(
    headers: &HeaderMap,
    ordered_prefs: &'a [P],
) -> Result<&'a str, NotAcceptable> {
    match negotiate_content_type(accept_values(headers), ordered_prefs) {
        "" => Err(NotAcceptable {
            supported: ordered_prefs.iter().map(|p| p.as_ref().to_string()).collect(),
        }),
        selected => Ok(selected),
    }
}

/// The raw `Accept` lines of a request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcceptHeader(Vec<String>);

impl AcceptHeader {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self(accept_values(headers).into_iter().map(String::from).collect())
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }

    /// No `Accept` header was sent, or all lines were empty
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|line| line.is_empty())
    }

    pub fn specs(&self) -> Result<Vec<AcceptSpec>, AcceptError> {
        parse_accept(&self.0)
    }

    pub fn negotiate<'a, P: AsRef<str>>(&self, ordered_prefs: &'a [P]) -> &'a str {
        negotiate_content_type(&self.0, ordered_prefs)
    }
}

impl<S> FromRequestParts<S> for AcceptHeader
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(AcceptHeader::from_headers(&parts.headers))
    }
}
