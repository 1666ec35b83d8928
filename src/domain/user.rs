use serde::Serialize;

use super::ids::UserId;
use super::patch::{self, Body, PatchError};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Email/password pair used for both sign-up and login.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn from_request(body: &Body) -> Result<Self, PatchError> {
        let email = patch::text(body, "email")?.filter(|e| !e.is_empty()).ok_or(PatchError::Missing("email"))?;
        let password = match body.get("password") {
            Some(serde_json::Value::String(p)) => p.clone(),
            Some(_) => return Err(PatchError::InvalidField { field: "password", expected: "a string" }),
            None => return Err(PatchError::Missing("password")),
        };
        Ok(Self { email, password })
    }

    /// Sign-up rules; login skips them so old accounts keep working.
    pub fn validate_new(&self) -> Result<(), PatchError> {
        let (local, domain) = self.email.split_once('@').unwrap_or(("", ""));
        if local.is_empty() || domain.is_empty() {
            return Err(PatchError::InvalidField { field: "email", expected: "a valid email address" });
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(PatchError::InvalidField { field: "password", expected: "at least 6 characters" });
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("email", &self.email).finish_non_exhaustive()
    }
}
