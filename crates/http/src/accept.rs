//! `Accept` header parsing
//!
//! The parser is deliberately loose: it understands media types and the `q`
//! parameter and ignores any other parameter shape it does not recognise.
//! Errors are reported faithfully; callers that want graceful degradation go
//! through [`crate::negotiation`].

use std::num::ParseFloatError;

use axum::http::{header::ACCEPT, HeaderMap};
use regex::Regex;

lazy_static::lazy_static! {
    /// Quality parameter, matched anywhere in a `;`-segment. ASCII digits only.
    static ref QUALITY_PARAM: Regex = Regex::new(r"q=[0-9]+\.[0-9]*").unwrap();

    /// Two characters separated by ASCII whitespace, i.e. more than one token in a segment
    static ref SPACE_BETWEEN_CHARS: Regex = Regex::new(r".[\t\n\f\r ].").unwrap();
}

/// One media range from an `Accept` header
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptSpec {
    /// Media type as sent, e.g. `text/html` or `*/*`
    pub value: String,
    /// Quality, `1.0` when not given. Not clamped.
    pub quality: f64,
}

impl AcceptSpec {
    pub fn new(value: impl Into<String>, quality: f64) -> Self {
        Self {
            value: value.into(),
            quality,
        }
    }
}

/// Why an `Accept` header could not be parsed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AcceptErrorKind {
    #[error("invalid element in header Accept: '{0}'")]
    InvalidElement(String),

    #[error("invalid quality value '{value}' in header Accept: {source}")]
    InvalidQuality {
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Parse failure, carrying the specs parsed before the offending item
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}")]
pub struct AcceptError {
    #[source]
    kind: AcceptErrorKind,
    parsed: Vec<AcceptSpec>,
}

impl AcceptError {
    pub fn kind(&self) -> &AcceptErrorKind {
        &self.kind
    }

    /// Specs parsed before the failure, in encounter order
    pub fn parsed(&self) -> &[AcceptSpec] {
        &self.parsed
    }

    pub fn into_parsed(self) -> Vec<AcceptSpec> {
        self.parsed
    }
}

/// Parse raw `Accept` header lines into specs, in encounter order.
///
/// No lines yields an empty list; the caller applies its own default.
/// Items whose media type resolves to empty (e.g. a bare `q=1.0`) are dropped.
/// When a segment holds several tokens without a `;` between them the parse
/// fails, unless the segment looks like a quality parameter. When an item has
/// several non-quality segments the last one becomes the media type.
pub fn parse_accept<I, S>(values: I) -> Result<Vec<AcceptSpec>, AcceptError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut specs = Vec::new();

    for line in values {
        for item in line.as_ref().split(',') {
            match parse_item(item) {
                Ok(Some(spec)) => specs.push(spec),
                Ok(None) => {}
                Err(kind) => {
                    return Err(AcceptError {
                        kind,
                        parsed: specs,
                    })
                }
            }
        }
    }

    Ok(specs)
}

fn parse_item(item: &str) -> Result<Option<AcceptSpec>, AcceptErrorKind> {
    let mut value = "";
    let mut quality = 1.0;

    for element in item.split(';').map(str::trim) {
        if QUALITY_PARAM.is_match(element) {
            let parts: Vec<&str> = element.split('=').collect();
            if parts.len() != 2 {
                continue;
            }
            quality = parts[1]
                .parse::<f64>()
                .map_err(|source| AcceptErrorKind::InvalidQuality {
                    value: parts[1].to_string(),
                    source,
                })?;
        } else if SPACE_BETWEEN_CHARS.is_match(element) {
            return Err(AcceptErrorKind::InvalidElement(element.to_string()));
        } else {
            value = element;
        }
    }

    if value.is_empty() {
        return Ok(None);
    }
    Ok(Some(AcceptSpec::new(value, quality)))
}

/// Every `Accept` line of a request. Lines that are not visible ASCII are skipped.
pub fn accept_values(headers: &HeaderMap) -> Vec<&str> {
    headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| match value.to_str() {
            Ok(s) => Some(s),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping non-ASCII Accept header line");
                None
            }
        })
        .collect()
}

/// [`parse_accept`] over the `Accept` lines of `headers`
pub fn parse_accept_header(headers: &HeaderMap) -> Result<Vec<AcceptSpec>, AcceptError> {
    parse_accept(accept_values(headers))
}
