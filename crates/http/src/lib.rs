//! HTTP helpers shared by Kitbag services
//!
//! - `accept`: parser for the `Accept` request header
//! - `negotiation`: picks a response content type from the parsed header
//! - `error`: JSON-friendly API error type
//! - `response`: response writers that honour the client's Accept header

pub mod accept;
pub mod error;
pub mod negotiation;
pub mod response;

pub use accept::{accept_values, parse_accept, parse_accept_header, AcceptError, AcceptErrorKind, AcceptSpec};
pub use error::{ApiError, ErrorKind};
pub use negotiation::{negotiate_content_type, select_content_type, AcceptHeader, NotAcceptable};
pub use response::{
    bytes_response, error_response, error_response_for_server, json_response, reader_file_response,
    reader_response, string_response, write_error_with_code,
};

/// `application/json`
pub const APPLICATION_JSON: &str = "application/json";
/// `text/plain`
pub const TEXT_PLAIN: &str = "text/plain";
