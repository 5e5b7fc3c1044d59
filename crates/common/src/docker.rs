//! Payload of a `kubernetes.io/dockerconfigjson` secret

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Registry credentials keyed by registry host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub auths: BTreeMap<String, Credential>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    /// base64 of `username:password`
    #[serde(default)]
    pub auth: String,
}

impl Credential {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let username = username.into();
        let password = password.into();
        let auth = STANDARD.encode(format!("{}:{}", username, password));
        Self {
            username,
            password,
            email: email.into(),
            auth,
        }
    }
}

impl AuthConfig {
    pub fn with_registry(mut self, registry: impl Into<String>, credential: Credential) -> Self {
        self.auths.insert(registry.into(), credential);
        self
    }
}
