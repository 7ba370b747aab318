//! File-backed persistent credential store.
//!
//! Keeps every entry in one JSON object (`{"user": "...", "token": "..."}`)
//! under the data directory.

use super::atomic_file::{AtomicFile, FileFormat};
use crate::paths::PortalPaths;
use async_trait::async_trait;
use portal_core::error::{PortalError, Result};
use portal_core::session::CredentialStore;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

type Entries = BTreeMap<String, String>;

/// Durable key-value store surviving process restarts.
///
/// Writes go through [`AtomicFile::update`], so concurrent processes sharing
/// the file serialize on its lock. The file is created with mode 600 on Unix.
/// Nothing is encrypted.
#[derive(Clone)]
pub struct FileCredentialStore {
    file: Arc<AtomicFile<Entries>>,
}

impl FileCredentialStore {
    /// Store at the default location (`<data dir>/credentials.json`).
    pub fn new(paths: &PortalPaths) -> Result<Self> {
        Ok(Self::with_path(paths.credentials_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicFile::new(path, FileFormat::Json).with_mode(0o600)),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    async fn read(&self) -> Result<Entries> {
        let file = self.file.clone();
        run_blocking(move || file.load().map(Option::unwrap_or_default)).await
    }

    async fn write<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Entries) + Send + 'static,
    {
        let file = self.file.clone();
        run_blocking(move || {
            file.update(Entries::new(), |entries| {
                f(entries);
                Ok(())
            })
        })
        .await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| PortalError::internal(format!("Failed to join task: {}", e)))?
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.write(move |entries| {
            entries.insert(key, value);
        })
        .await?;
        tracing::debug!(path = %self.file.path().display(), "Credential entry written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        if !self.file.path().exists() {
            return Ok(());
        }
        let key = key.to_string();
        self.write(move |entries| {
            entries.remove(&key);
        })
        .await
    }
}
