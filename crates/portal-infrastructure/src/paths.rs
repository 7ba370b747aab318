//! Unified path management for StudyPortal files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/studyportal/          # Config directory
//! └── config.toml                 # Application configuration
//!
//! ~/.local/share/studyportal/     # Data directory
//! └── credentials.json            # Persisted user profile + bearer token
//! ```
//!
//! A base directory can be supplied to root both trees elsewhere (tests,
//! portable installs).

use std::path::{Path, PathBuf};

const APP_DIR: &str = "studyportal";
const CONFIG_FILE: &str = "config.toml";
const CREDENTIALS_FILE: &str = "credentials.json";

/// Errors that can occur during path resolution.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("Cannot find home directory")]
    HomeDirNotFound,
}

impl From<PathError> for portal_core::PortalError {
    fn from(err: PathError) -> Self {
        portal_core::PortalError::config(err.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PortalPaths {
    base: Option<PathBuf>,
}

impl PortalPaths {
    /// `None` resolves against the platform directories.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory (e.g., `~/.config/studyportal/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.join("config")),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the data directory (e.g., `~/.local/share/studyportal/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.join("data")),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CONFIG_FILE))
    }

    /// Default credential store location.
    ///
    /// # Security Note
    ///
    /// The file holds a bearer token in plain text; the store creates it
    /// with mode 600 on Unix.
    pub fn credentials_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join(CREDENTIALS_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_dirs_end_with_app_name() {
        let paths = PortalPaths::default();
        if let Ok(config_dir) = paths.config_dir() {
            assert!(config_dir.ends_with("studyportal"));
            assert!(paths.config_file().unwrap().starts_with(&config_dir));
        }
        if let Ok(data_dir) = paths.data_dir() {
            assert!(paths.credentials_file().unwrap().starts_with(&data_dir));
        }
    }

    #[test]
    fn base_dir_roots_both_trees() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = PortalPaths::new(Some(temp_dir.path()));

        assert_eq!(
            paths.config_file().unwrap(),
            temp_dir.path().join("config").join("config.toml")
        );
        assert_eq!(
            paths.credentials_file().unwrap(),
            temp_dir.path().join("data").join("credentials.json")
        );
    }
}
