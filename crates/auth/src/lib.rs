//! Request authentication plumbing for Kitbag services
//!
//! Extracts the caller's bearer token and optional impersonation from
//! request headers, exposes them to handlers as [`Accounts`], and wraps
//! routes in a middleware that rejects requests without them.

mod accounts;
mod claims;
mod controller;
mod error;
mod extractors;
mod headers;
mod impersonation;
mod jwt;
mod middleware;

pub use accounts::Accounts;
pub use claims::TokenClaims;
pub use controller::{router, Controller, Route};
pub use error::AuthError;
pub use headers::{bearer_token, impersonation, token_from_query, IMPERSONATE_GROUP, IMPERSONATE_USER};
pub use impersonation::Impersonation;
pub use middleware::{accounts_middleware, AccountsMiddleware, HandledRequest};
