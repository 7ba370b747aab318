//! In-memory authentication state.

use serde::Serialize;

use crate::user::UserProfile;

/// Lifecycle of the owning session manager: `init -> active -> disposed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// Constructed, bootstrap not yet finished.
    Init,
    Active,
    Disposed,
}

/// Externally visible phase, derived from lifecycle and user presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Bootstrapping,
    Unauthenticated,
    Authenticated,
    Disposed,
}

/// Authoritative in-memory projection of the session.
///
/// `is_authenticated()` is defined as `user().is_some()`, so the two can never
/// disagree. Fields are private; every transition goes through a constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    user: Option<UserProfile>,
    loading: bool,
    lifecycle: Lifecycle,
}

impl SessionState {
    /// Initial state of a freshly constructed manager.
    pub fn bootstrapping() -> Self {
        Self {
            user: None,
            loading: true,
            lifecycle: Lifecycle::Init,
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            user: None,
            loading: false,
            lifecycle: Lifecycle::Active,
        }
    }

    pub fn authenticated(user: UserProfile) -> Self {
        Self {
            user: Some(user),
            loading: false,
            lifecycle: Lifecycle::Active,
        }
    }

    pub fn disposed() -> Self {
        Self {
            user: None,
            loading: false,
            lifecycle: Lifecycle::Disposed,
        }
    }

    /// Same state with the in-flight flag changed.
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// True once bootstrap has settled; route decisions wait for this.
    pub fn is_ready(&self) -> bool {
        self.lifecycle != Lifecycle::Init
    }

    pub fn phase(&self) -> SessionPhase {
        match self.lifecycle {
            Lifecycle::Init => SessionPhase::Bootstrapping,
            Lifecycle::Disposed => SessionPhase::Disposed,
            Lifecycle::Active if self.user.is_some() => SessionPhase::Authenticated,
            Lifecycle::Active => SessionPhase::Unauthenticated,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::bootstrapping()
    }
}
