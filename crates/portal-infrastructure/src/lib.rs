//! Infrastructure layer for StudyPortal: file-backed configuration and
//! credentials, and the REST adapters for the backend.

pub mod config_service;
pub mod http;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::http::{ApiClient, HttpAuthApi, HttpCatalogApi};
pub use crate::paths::PortalPaths;
pub use crate::storage::{FileCredentialStore, MemoryCredentialStore};
