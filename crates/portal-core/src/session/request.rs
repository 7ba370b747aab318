//! Credential payloads sent to the authentication backend.

use serde::Serialize;
use thiserror::Error;

/// Rejection of a form before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } => field,
        }
    }
}

fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(())
}

/// Body of `POST /auth/login`.
///
/// `Debug` omits the password.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Builds the request, rejecting empty fields.
    ///
    /// Anything beyond presence (format, strength) is the backend's call.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();
        let password = password.into();
        required("Email", &email)?;
        required("Password", &password)?;
        Ok(Self { email, password })
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Body of `POST /auth/register`.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let email = email.into();
        let password = password.into();
        required("Name", &name)?;
        required("Email", &email)?;
        required("Password", &password)?;
        Ok(Self {
            name,
            email,
            password,
        })
    }
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
