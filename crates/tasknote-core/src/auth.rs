//! Fixed-credential gate in front of the task list.
//!
//! This is a local entry check for a single-user app, not an account system:
//! one configured username/password pair either matches or it does not.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_USERNAME: &str = "root";
const DEFAULT_PASSWORD: &str = "root";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// Checks entered credentials against the configured pair
#[derive(Debug, Clone, Default)]
pub struct CredentialGate {
    expected: Credentials,
}

impl CredentialGate {
    pub const fn new(expected: Credentials) -> Self {
        Self { expected }
    }

    pub fn verify(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if username == self.expected.username && password == self.expected.password {
            tracing::debug!("Credential check passed for '{username}'");
            Ok(())
        } else {
            tracing::warn!("Credential check failed for '{username}'");
            Err(AuthError::InvalidCredentials)
        }
    }
}
