//! Session domain: state, credentials and the collaborator contracts the
//! session manager is built on.

mod auth_api;
mod credential;
mod outcome;
mod request;
mod state;

pub use auth_api::{ApiError, AuthApi, AuthResponse, LogoutAck};
pub use credential::{CredentialRecord, CredentialStore, StoredCredentials, TOKEN_KEY, USER_KEY};
pub use outcome::{
    AuthOutcome, LOGIN_FAILED_MESSAGE, NETWORK_ERROR_MESSAGE, REGISTRATION_FAILED_MESSAGE,
};
pub use request::{LoginRequest, RegisterRequest, ValidationError};
pub use state::{Lifecycle, SessionPhase, SessionState};
