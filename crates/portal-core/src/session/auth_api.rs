//! Contract between the session layer and the REST backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::request::{LoginRequest, RegisterRequest};
use crate::user::{SessionToken, UserProfile};

/// Response shape of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<SessionToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AuthResponse {
    /// Returns the issued credentials when the response is a complete success.
    ///
    /// `success: true` without both a user and a non-empty token is not a
    /// usable session.
    pub fn into_credentials(self) -> Result<(UserProfile, SessionToken), Option<String>> {
        match (self.success, self.user, self.token) {
            (true, Some(user), Some(token)) if !token.is_empty() => Ok((user, token)),
            _ => Err(self.message),
        }
    }
}

/// Response shape of `POST /auth/logout`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutAck {
    #[serde(default)]
    pub success: bool,
}

/// Failure classes at the REST boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response was obtained: DNS, refused connection, timeout.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered outside the 2xx range.
    ///
    /// `message` is the server-supplied `message` field when present, else
    /// `HTTP error! status: <code>`.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A 2xx response whose body was not the expected JSON.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP error! status: {}", status));
        Self::Rejected { status, message }
    }

    /// True when there is no server message worth showing to the user.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Authentication endpoints consumed by the session manager.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;

    /// Best-effort server-side invalidation.
    async fn logout(&self) -> Result<LogoutAck, ApiError>;

    /// Installs or clears the bearer attached to subsequent requests.
    ///
    /// Clients that rely on cookies alone can ignore it.
    fn set_bearer(&self, _token: Option<SessionToken>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_falls_back_to_status_message() {
        let err = ApiError::rejected(500, None);
        assert_eq!(err.to_string(), "HTTP error! status: 500");
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_transport());

        let err = ApiError::rejected(401, Some("Invalid credentials".into()));
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn transport_and_decode_are_transport() {
        assert!(ApiError::Transport("connection refused".into()).is_transport());
        assert!(ApiError::Decode("expected value".into()).is_transport());
    }

    #[test]
    fn partial_success_is_not_a_session() {
        let response: AuthResponse =
            serde_json::from_str(r#"{"success":true,"user":{"_id":"1","name":"A","email":"a@b.com"}}"#)
                .unwrap();
        assert_eq!(response.into_credentials(), Err(None));
    }

    #[test]
    fn complete_success_yields_credentials() {
        let response: AuthResponse = serde_json::from_str(
            r#"{"success":true,"user":{"_id":"1","name":"A","email":"a@b.com"},"token":"tok"}"#,
        )
        .unwrap();
        let (user, token) = response.into_credentials().unwrap();
        assert_eq!(user.id, "1");
        assert_eq!(token.as_str(), "tok");
    }

    #[test]
    fn failure_keeps_server_message() {
        let response: AuthResponse =
            serde_json::from_str(r#"{"success":false,"message":"Email already registered"}"#).unwrap();
        assert_eq!(
            response.into_credentials(),
            Err(Some("Email already registered".to_string()))
        );
    }
}
