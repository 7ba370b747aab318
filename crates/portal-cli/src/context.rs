//! Composition root: wires configuration, stores and API adapters into a
//! session manager.

use anyhow::{Context, Result};
use portal_application::SessionManager;
use portal_core::config::PortalConfig;
use portal_core::guard::{GuardDecision, RouteAccess, RouteGuard};
use portal_core::session::CredentialStore;
use portal_infrastructure::{
    ApiClient, ConfigService, FileCredentialStore, HttpAuthApi, HttpCatalogApi,
    MemoryCredentialStore,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Global options that shape how the context is built.
#[derive(Debug, Clone, Default)]
pub struct ContextOptions {
    pub base_url: Option<String>,
    pub ephemeral: bool,
}

/// Everything a command needs, built once per process.
pub struct AppContext {
    pub config: PortalConfig,
    pub credentials_path: Option<PathBuf>,
    pub session: Arc<SessionManager>,
    pub catalog: HttpCatalogApi,
    pub guard: RouteGuard,
}

impl AppContext {
    /// Builds the collaborators and bootstraps the session.
    pub async fn open(
        config_service: &ConfigService,
        mut config: PortalConfig,
        options: &ContextOptions,
    ) -> Result<Self> {
        if let Some(base_url) = &options.base_url {
            config.api.base_url = base_url.clone();
        }

        let client = Arc::new(ApiClient::new(&config.api)?);
        let auth = Arc::new(HttpAuthApi::new(client.clone()));
        let catalog = HttpCatalogApi::new(client);

        let (store, credentials_path): (Arc<dyn CredentialStore>, Option<PathBuf>) =
            if options.ephemeral {
                (Arc::new(MemoryCredentialStore::new()), None)
            } else {
                let path = config_service
                    .credentials_path(&config)
                    .context("Failed to resolve credentials file")?;
                (
                    Arc::new(FileCredentialStore::with_path(path.clone())),
                    Some(path),
                )
            };

        let session = Arc::new(SessionManager::new(auth, store));
        session.bootstrap().await;

        Ok(Self {
            config,
            credentials_path,
            session,
            catalog,
            guard: RouteGuard::default(),
        })
    }

    /// Fails unless the current session may enter a protected view.
    pub fn require_login(&self) -> Result<()> {
        match self.guard.decide(&self.session.state(), RouteAccess::Protected) {
            GuardDecision::Allow => Ok(()),
            GuardDecision::Redirect(_) => {
                anyhow::bail!("Not logged in. Run `studyportal login` first.")
            }
            GuardDecision::Pending => anyhow::bail!("Session is still starting up"),
        }
    }

    pub async fn close(&self) {
        self.session.dispose().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::session::SessionPhase;
    use portal_infrastructure::PortalPaths;
    use tempfile::TempDir;

    #[tokio::test]
    async fn ephemeral_context_starts_signed_out() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(PortalPaths::new(Some(temp_dir.path()))).unwrap();
        let options = ContextOptions {
            base_url: Some("http://127.0.0.1:9/api".to_string()),
            ephemeral: true,
        };

        let ctx = AppContext::open(&service, PortalConfig::default(), &options)
            .await
            .unwrap();

        assert_eq!(ctx.config.api.base_url, "http://127.0.0.1:9/api");
        assert!(ctx.credentials_path.is_none());
        assert_eq!(ctx.session.state().phase(), SessionPhase::Unauthenticated);
        assert!(ctx.require_login().is_err());

        ctx.close().await;
        assert_eq!(ctx.session.state().phase(), SessionPhase::Disposed);
    }

    #[tokio::test]
    async fn persisted_context_uses_data_directory() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(PortalPaths::new(Some(temp_dir.path()))).unwrap();

        let ctx = AppContext::open(&service, PortalConfig::default(), &ContextOptions::default())
            .await
            .unwrap();

        assert_eq!(
            ctx.credentials_path,
            Some(temp_dir.path().join("data").join("credentials.json"))
        );
    }
}
