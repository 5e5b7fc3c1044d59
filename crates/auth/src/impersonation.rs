//! Impersonation requested by the caller

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// User and groups to impersonate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Impersonation {
    pub user: String,
    pub groups: Vec<String>,
}

impl Impersonation {
    /// Build an impersonation. The user is trimmed.
    ///
    /// Fails when only one of user and groups is set; setting neither means
    /// "no impersonation".
    pub fn new(user: &str, groups: Vec<String>) -> Result<Self, AuthError> {
        let impersonation = Self {
            user: user.trim().to_string(),
            groups,
        };
        impersonation.validate()?;
        Ok(impersonation)
    }

    /// Whether requests should be made as the impersonated user
    pub fn perform_impersonation(&self) -> bool {
        !self.user.is_empty() && !self.groups.is_empty()
    }

    fn validate(&self) -> Result<(), AuthError> {
        let user_set = !self.user.is_empty();
        let groups_set = !self.groups.is_empty();

        if user_set != groups_set {
            return Err(AuthError::InvalidImpersonation);
        }
        Ok(())
    }
}
