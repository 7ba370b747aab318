//! Result value returned by login and register.

use serde::Serialize;

/// Message shown when no server message is available.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed";

/// Structured outcome of an authentication attempt.
///
/// The session boundary reports every failure through this value; transport
/// error types never reach its callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AuthOutcome {
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    pub fn network_error() -> Self {
        Self::failure(NETWORK_ERROR_MESSAGE)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
