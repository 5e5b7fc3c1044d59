//! Credentials of the caller, as handed to request handlers

use std::fmt;

use axum::http::HeaderMap;

use crate::error::AuthError;
use crate::headers::{bearer_token, impersonation};
use crate::impersonation::Impersonation;
use crate::jwt::principal_name_from_token;

/// The caller's token and requested impersonation
#[derive(Clone, PartialEq)]
pub struct Accounts {
    token: String,
    impersonation: Impersonation,
}

impl Accounts {
    pub fn new(token: impl Into<String>, impersonation: Impersonation) -> Self {
        Self {
            token: token.into(),
            impersonation,
        }
    }

    /// Read token and impersonation from request headers.
    ///
    /// The token is checked first, so a request with neither gets the token error.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AuthError> {
        let token = bearer_token(headers)?;
        let impersonation = impersonation(headers)?;
        Ok(Self::new(token, impersonation))
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn impersonation(&self) -> &Impersonation {
        &self.impersonation
    }

    /// The impersonated user when impersonating, otherwise the `upn` of the token
    pub fn user_principal_name(&self) -> Result<String, AuthError> {
        if self.impersonation.perform_impersonation() {
            return Ok(self.impersonation.user.clone());
        }
        principal_name_from_token(&self.token)
    }
}

impl fmt::Debug for Accounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accounts")
            .field("token", &"<redacted>")
            .field("impersonation", &self.impersonation)
            .finish()
    }
}
