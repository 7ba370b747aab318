//! REST adapters for the StudyPortal backend.

mod auth;
mod catalog;
mod client;

pub use auth::HttpAuthApi;
pub use catalog::HttpCatalogApi;
pub use client::ApiClient;
