//! Authenticated user identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Profile of the signed-in user as issued by the authentication backend.
///
/// `id` is opaque. The backend emits it as `_id`; the persisted copy uses `id`,
/// and both spellings are accepted on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

impl UserProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Opaque bearer token paired with a [`UserProfile`].
///
/// The client never inspects it; it is trusted until the server rejects it.
/// `Debug` is redacted so the value cannot leak into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_backend_id_spelling() {
        let user: UserProfile =
            serde_json::from_str(r#"{"_id":"42","name":"Asha","email":"asha@example.com"}"#)
                .unwrap();
        assert_eq!(user, UserProfile::new("42", "Asha", "asha@example.com"));
    }

    #[test]
    fn persisted_form_uses_plain_id() {
        let json = serde_json::to_string(&UserProfile::new("1", "A", "a@b.com")).unwrap();
        assert_eq!(json, r#"{"id":"1","name":"A","email":"a@b.com"}"#);
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = SessionToken::new("secret-value");
        assert_eq!(format!("{:?}", token), "SessionToken(***)");
        assert_eq!(token.as_str(), "secret-value");
    }
}
