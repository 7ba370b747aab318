//! Domain layer for StudyPortal.
//!
//! Types and collaborator contracts shared by the infrastructure and
//! application crates. Nothing here performs I/O.

pub mod catalog;
pub mod config;
pub mod error;
pub mod guard;
pub mod session;
pub mod user;

// Re-export common error type
pub use error::PortalError;
