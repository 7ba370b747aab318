use portal_core::session::{
    ApiError, AuthApi, AuthOutcome, AuthResponse, CredentialRecord, CredentialStore,
    LOGIN_FAILED_MESSAGE, Lifecycle, LoginRequest, REGISTRATION_FAILED_MESSAGE, RegisterRequest,
    SessionState, StoredCredentials,
};
use portal_core::user::{SessionToken, UserProfile};
use std::sync::{Arc, RwLock};
use tokio::sync::{Mutex, watch};

/// Message returned by login and register once the manager is disposed.
pub const DISPOSED_MESSAGE: &str = "Session has been closed";

/// Owns the in-memory authentication state of one front end.
///
/// `SessionManager` is responsible for:
/// - Restoring the session from the credential store at startup
/// - Logging in, registering and logging out through the auth backend
/// - Mirroring the current credentials into the store
/// - Publishing every state transition to subscribers
///
/// Construct it once and hand it (usually as `Arc<SessionManager>`) to every
/// layer that needs session state. Operations are serialized by an internal
/// gate, so at most one of them is in flight at a time and `loading` is only
/// true while it runs.
///
/// No method returns an error. Backend failures surface as
/// [`AuthOutcome`] failures; store failures are logged and swallowed.
pub struct SessionManager {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn CredentialStore>,
    state: watch::Sender<SessionState>,
    token: RwLock<Option<SessionToken>>,
    gate: Mutex<()>,
}

impl SessionManager {
    /// Creates a manager in the `init` lifecycle: bootstrapping, `loading`
    /// set, no route decided yet.
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(SessionState::bootstrapping());
        Self {
            api,
            store,
            state,
            token: RwLock::new(None),
            gate: Mutex::new(()),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Bearer of the current session, if authenticated.
    pub fn token(&self) -> Option<SessionToken> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Restores the session persisted by a previous run.
    ///
    /// Runs once; later calls are no-ops. A complete record authenticates the
    /// session. A partial or unreadable record is cleared and the session
    /// starts unauthenticated. An empty store is left untouched.
    pub async fn bootstrap(&self) {
        let _gate = self.gate.lock().await;

        if self.lifecycle() != Lifecycle::Init {
            tracing::debug!("Session already bootstrapped");
            return;
        }

        let next = match CredentialRecord::inspect(self.store.as_ref()).await {
            Ok(StoredCredentials::Present(record)) => {
                tracing::info!(user_id = %record.user.id, "Restored persisted session");
                self.install_token(Some(record.token));
                SessionState::authenticated(record.user)
            }
            Ok(StoredCredentials::Absent) => {
                tracing::debug!("No persisted session");
                SessionState::unauthenticated()
            }
            Ok(StoredCredentials::Partial) => {
                tracing::warn!("Incomplete persisted session, clearing store");
                self.clear_store().await;
                SessionState::unauthenticated()
            }
            Err(err) => {
                tracing::warn!(error = %err, "Unreadable persisted session, clearing store");
                self.clear_store().await;
                SessionState::unauthenticated()
            }
        };

        self.publish(next);
    }

    /// Authenticates with email and password.
    ///
    /// Blank fields are rejected before any network call.
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        let _gate = self.gate.lock().await;

        if self.lifecycle() == Lifecycle::Disposed {
            return AuthOutcome::failure(DISPOSED_MESSAGE);
        }

        let request = match LoginRequest::new(email, password) {
            Ok(request) => request,
            Err(err) => return AuthOutcome::failure(err.to_string()),
        };

        self.begin();
        let result = self.api.login(&request).await;
        let outcome = self.complete("login", result, LOGIN_FAILED_MESSAGE).await;
        self.settle();
        outcome
    }

    /// Creates an account and signs into it.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> AuthOutcome {
        let _gate = self.gate.lock().await;

        if self.lifecycle() == Lifecycle::Disposed {
            return AuthOutcome::failure(DISPOSED_MESSAGE);
        }

        let request = match RegisterRequest::new(name, email, password) {
            Ok(request) => request,
            Err(err) => return AuthOutcome::failure(err.to_string()),
        };

        self.begin();
        let result = self.api.register(&request).await;
        let outcome = self
            .complete("register", result, REGISTRATION_FAILED_MESSAGE)
            .await;
        self.settle();
        outcome
    }

    /// Ends the session.
    ///
    /// The backend is notified on a best-effort basis. Memory and store are
    /// cleared whatever it answers.
    pub async fn logout(&self) {
        let _gate = self.gate.lock().await;

        if self.lifecycle() == Lifecycle::Disposed {
            return;
        }

        self.begin();

        match self.api.logout().await {
            Ok(ack) if !ack.success => tracing::debug!("Backend did not acknowledge logout"),
            Ok(_) => {}
            Err(err) => tracing::warn!(error = %err, "Remote logout failed"),
        }

        self.install_token(None);
        self.clear_store().await;

        tracing::info!("Logged out");
        self.publish(SessionState::unauthenticated());
    }

    /// Moves the manager to the `disposed` lifecycle.
    ///
    /// The bearer is dropped from the shared client, but persisted
    /// credentials are kept so the next process can restore them.
    pub async fn dispose(&self) {
        let _gate = self.gate.lock().await;

        if self.lifecycle() == Lifecycle::Disposed {
            return;
        }

        self.install_token(None);
        self.publish(SessionState::disposed());
        tracing::debug!("Session manager disposed");
    }

    async fn complete(
        &self,
        operation: &'static str,
        result: Result<AuthResponse, ApiError>,
        fallback: &str,
    ) -> AuthOutcome {
        let response = match result {
            Ok(response) => response,
            Err(err) if err.is_transport() => {
                tracing::warn!(operation, error = %err, "Authentication request failed");
                return AuthOutcome::network_error();
            }
            Err(err) => {
                tracing::info!(operation, status = ?err.status(), "Authentication rejected");
                return AuthOutcome::failure(err.to_string());
            }
        };

        match response.into_credentials() {
            Ok((user, token)) => {
                tracing::info!(operation, user_id = %user.id, "Authenticated");
                self.accept(user, token).await;
                AuthOutcome::success()
            }
            Err(message) => {
                tracing::info!(operation, "Authentication refused by backend");
                AuthOutcome::failure(message.unwrap_or_else(|| fallback.to_string()))
            }
        }
    }

    async fn accept(&self, user: UserProfile, token: SessionToken) {
        let record = CredentialRecord::new(user, token);
        if let Err(err) = record.save(self.store.as_ref()).await {
            tracing::warn!(error = %err, "Failed to persist session");
        }

        self.install_token(Some(record.token));
        self.publish(SessionState::authenticated(record.user));
    }

    async fn clear_store(&self) {
        if let Err(err) = CredentialRecord::clear(self.store.as_ref()).await {
            tracing::warn!(error = %err, "Failed to clear persisted session");
        }
    }

    fn install_token(&self, token: Option<SessionToken>) {
        self.api.set_bearer(token.clone());
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = token;
    }

    fn lifecycle(&self) -> Lifecycle {
        self.state.borrow().lifecycle()
    }

    fn begin(&self) {
        self.state.send_modify(|state| *state = state.clone().with_loading(true));
    }

    fn settle(&self) {
        self.state.send_if_modified(|state| {
            if !state.loading() {
                return false;
            }
            *state = state.clone().with_loading(false);
            true
        });
    }

    /// Replaces the state and clears `loading`.
    fn publish(&self, next: SessionState) {
        self.state.send_replace(next.with_loading(false));
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;
