//! Persistent credential store contract and the record mirrored into it.

use async_trait::async_trait;

use crate::error::Result;
use crate::user::{SessionToken, UserProfile};

/// Key holding the serialized [`UserProfile`].
pub const USER_KEY: &str = "user";
/// Key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Durable string key-value storage surviving process restarts.
///
/// Values are plain serialized text with no integrity check. Only the
/// session manager writes the [`USER_KEY`] and [`TOKEN_KEY`] entries.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// What [`CredentialRecord::inspect`] found in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredCredentials {
    /// Neither entry exists.
    Absent,
    /// One entry without the other, or an empty token.
    Partial,
    Present(CredentialRecord),
}

/// The persisted `(UserProfile, SessionToken)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub user: UserProfile,
    pub token: SessionToken,
}

impl CredentialRecord {
    pub fn new(user: UserProfile, token: SessionToken) -> Self {
        Self { user, token }
    }

    /// Classifies what the store currently holds.
    ///
    /// A user entry that does not parse is a serialization error, never
    /// `Partial`.
    pub async fn inspect(store: &dyn CredentialStore) -> Result<StoredCredentials> {
        let user = store.get(USER_KEY).await?;
        let token = store.get(TOKEN_KEY).await?;

        let (user, token) = match (user, token) {
            (None, None) => return Ok(StoredCredentials::Absent),
            (Some(user), Some(token)) => (user, token),
            _ => return Ok(StoredCredentials::Partial),
        };

        let user: UserProfile = serde_json::from_str(&user)?;
        let token = SessionToken::new(token);
        if token.is_empty() {
            return Ok(StoredCredentials::Partial);
        }

        Ok(StoredCredentials::Present(Self { user, token }))
    }

    /// Reads the record; `Ok(None)` unless both entries are present.
    pub async fn load(store: &dyn CredentialStore) -> Result<Option<Self>> {
        match Self::inspect(store).await? {
            StoredCredentials::Present(record) => Ok(Some(record)),
            StoredCredentials::Absent | StoredCredentials::Partial => Ok(None),
        }
    }

    pub async fn save(&self, store: &dyn CredentialStore) -> Result<()> {
        let user = serde_json::to_string(&self.user)?;
        store.set(USER_KEY, &user).await?;
        store.set(TOKEN_KEY, self.token.as_str()).await
    }

    /// Removes both entries, attempting the second even if the first fails.
    pub async fn clear(store: &dyn CredentialStore) -> Result<()> {
        let user = store.remove(USER_KEY).await;
        let token = store.remove(TOKEN_KEY).await;
        user.and(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStore(Mutex<HashMap<String, String>>);

    #[async_trait]
    impl CredentialStore for MapStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            self.0.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<()> {
            self.0.lock().unwrap().remove(key);
            Ok(())
        }
    }

    #[tokio::test]
    async fn save_then_load_returns_same_record() {
        let store = MapStore::default();
        let record = CredentialRecord::new(
            UserProfile::new("1", "A", "a@b.com"),
            SessionToken::new("tok"),
        );

        record.save(&store).await.unwrap();
        assert_eq!(store.get(TOKEN_KEY).await.unwrap().as_deref(), Some("tok"));

        let loaded = CredentialRecord::load(&store).await.unwrap();
        assert_eq!(loaded, Some(record));
    }

    #[tokio::test]
    async fn missing_token_is_partial() {
        let store = MapStore::default();
        store
            .set(USER_KEY, r#"{"id":"1","name":"A","email":"a@b.com"}"#)
            .await
            .unwrap();
        assert_eq!(
            CredentialRecord::inspect(&store).await.unwrap(),
            StoredCredentials::Partial
        );
        assert_eq!(CredentialRecord::load(&store).await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_store_is_absent() {
        let store = MapStore::default();
        assert_eq!(
            CredentialRecord::inspect(&store).await.unwrap(),
            StoredCredentials::Absent
        );
    }

    #[tokio::test]
    async fn truncated_user_is_a_serialization_error() {
        let store = MapStore::default();
        store.set(USER_KEY, r#"{"id":"1","na"#).await.unwrap();
        store.set(TOKEN_KEY, "tok").await.unwrap();

        let err = CredentialRecord::load(&store).await.unwrap_err();
        assert!(err.is_serialization());
    }

    #[tokio::test]
    async fn clear_removes_both_entries() {
        let store = MapStore::default();
        store.set(USER_KEY, "x").await.unwrap();
        store.set(TOKEN_KEY, "y").await.unwrap();

        CredentialRecord::clear(&store).await.unwrap();
        assert!(store.0.lock().unwrap().is_empty());
    }
}
