//! Configuration service.
//!
//! Loads `PortalConfig` from `config.toml` and layers `STUDYPORTAL_*`
//! environment overrides on top.

use crate::paths::PortalPaths;
use crate::storage::{AtomicFile, FileFormat};
use portal_core::config::PortalConfig;
use portal_core::error::Result;
use std::path::PathBuf;

pub const ENV_API_BASE_URL: &str = "STUDYPORTAL_API_BASE_URL";
pub const ENV_CREDENTIALS_FILE: &str = "STUDYPORTAL_CREDENTIALS_FILE";
pub const ENV_LOG: &str = "STUDYPORTAL_LOG";

#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: PortalPaths,
    file: AtomicFile<PortalConfig>,
}

impl ConfigService {
    pub fn new(paths: PortalPaths) -> Result<Self> {
        let file = AtomicFile::new(paths.config_file()?, FileFormat::Toml);
        Ok(Self { paths, file })
    }

    /// Service reading an explicit config file instead of the default one.
    pub fn with_file(paths: PortalPaths, path: PathBuf) -> Self {
        Self {
            paths,
            file: AtomicFile::new(path, FileFormat::Toml),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    /// Reads the file as written, without environment overrides.
    ///
    /// A missing file yields the defaults. A malformed one is an error, so a
    /// typo never silently points the client at the default backend.
    pub fn load_file(&self) -> Result<PortalConfig> {
        Ok(self.file.load()?.unwrap_or_default())
    }

    /// Effective configuration: file contents plus process environment.
    pub fn load(&self) -> Result<PortalConfig> {
        let mut config = self.load_file()?;
        apply_overrides(&mut config, |key| std::env::var(key).ok());
        tracing::debug!(
            path = %self.file.path().display(),
            base_url = %config.api.base_url,
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn save(&self, config: &PortalConfig) -> Result<()> {
        self.file.save(config)?;
        tracing::info!(path = %self.file.path().display(), "Configuration saved");
        Ok(())
    }

    /// Writes the default configuration unless a file already exists.
    ///
    /// Returns whether a file was written.
    pub fn init(&self) -> Result<bool> {
        if self.file.path().exists() {
            return Ok(false);
        }
        self.save(&PortalConfig::default())?;
        Ok(true)
    }

    /// Credential file location: the configured path, else the data
    /// directory default.
    pub fn credentials_path(&self, config: &PortalConfig) -> Result<PathBuf> {
        match &config.storage.credentials_file {
            Some(path) => Ok(path.clone()),
            None => Ok(self.paths.credentials_file()?),
        }
    }
}

/// Applies `STUDYPORTAL_*` overrides read through `lookup`.
///
/// Empty values are ignored.
pub fn apply_overrides<F>(config: &mut PortalConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(base_url) = get(ENV_API_BASE_URL) {
        config.api.base_url = base_url;
    }
    if let Some(path) = get(ENV_CREDENTIALS_FILE) {
        config.storage.credentials_file = Some(PathBuf::from(path));
    }
    if let Some(level) = get(ENV_LOG) {
        config.logging.level = level;
    }
}
