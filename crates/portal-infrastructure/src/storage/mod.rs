//! Storage layer: atomic document files and the credential stores built on
//! them.

mod atomic_file;
mod file_credential_store;
mod memory_credential_store;

pub use atomic_file::{AtomicFile, FileFormat};
pub use file_credential_store::FileCredentialStore;
pub use memory_credential_store::MemoryCredentialStore;
