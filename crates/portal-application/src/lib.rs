//! Application layer for StudyPortal.
//!
//! Hosts the session manager, which coordinates the credential store and the
//! authentication backend on behalf of whichever front end owns it.

pub mod session;

pub use session::SessionManager;
