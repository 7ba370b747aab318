//! Route access control.
//!
//! The guard is a pure function of [`SessionState`]; it is re-evaluated on
//! every navigation and never caches a decision.

use serde::Serialize;

use crate::session::SessionState;

pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_HOME_PATH: &str = "/home";

/// Access class of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::EnumString, strum::Display)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum RouteAccess {
    /// Requires an authenticated session.
    Protected,
    /// Only for signed-out users (the login view).
    PublicOnly,
    /// Reachable in every state.
    Open,
}

/// Outcome of a navigation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "to", rename_all = "snake_case")]
pub enum GuardDecision {
    Allow,
    Redirect(String),
    /// Bootstrap still running; render neither protected nor public views.
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    login_path: String,
    home_path: String,
}

impl RouteGuard {
    pub fn new(login_path: impl Into<String>, home_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            home_path: home_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    pub fn can_enter_protected(state: &SessionState) -> bool {
        state.is_authenticated()
    }

    pub fn can_enter_public_only(state: &SessionState) -> bool {
        !state.is_authenticated()
    }

    pub fn decide(&self, state: &SessionState, access: RouteAccess) -> GuardDecision {
        if !state.is_ready() {
            return GuardDecision::Pending;
        }

        match access {
            RouteAccess::Open => GuardDecision::Allow,
            RouteAccess::Protected if Self::can_enter_protected(state) => GuardDecision::Allow,
            RouteAccess::Protected => GuardDecision::Redirect(self.login_path.clone()),
            RouteAccess::PublicOnly if Self::can_enter_public_only(state) => GuardDecision::Allow,
            RouteAccess::PublicOnly => GuardDecision::Redirect(self.home_path.clone()),
        }
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_PATH, DEFAULT_HOME_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserProfile;

    fn signed_in() -> SessionState {
        SessionState::authenticated(UserProfile::new("1", "A", "a@b.com"))
    }

    #[test]
    fn signed_out_user_is_sent_to_login() {
        let guard = RouteGuard::default();
        let decision = guard.decide(&SessionState::unauthenticated(), RouteAccess::Protected);
        assert_eq!(decision, GuardDecision::Redirect("/login".to_string()));
    }

    #[test]
    fn signed_in_user_is_sent_home_from_login() {
        let guard = RouteGuard::default();
        let decision = guard.decide(&signed_in(), RouteAccess::PublicOnly);
        assert_eq!(decision, GuardDecision::Redirect("/home".to_string()));
    }

    #[test]
    fn matching_access_is_allowed() {
        let guard = RouteGuard::default();
        assert_eq!(guard.decide(&signed_in(), RouteAccess::Protected), GuardDecision::Allow);
        assert_eq!(
            guard.decide(&SessionState::unauthenticated(), RouteAccess::PublicOnly),
            GuardDecision::Allow
        );
        assert_eq!(
            guard.decide(&SessionState::unauthenticated(), RouteAccess::Open),
            GuardDecision::Allow
        );
    }

    #[test]
    fn bootstrap_in_flight_is_pending() {
        let guard = RouteGuard::default();
        let state = SessionState::bootstrapping();
        assert_eq!(guard.decide(&state, RouteAccess::Protected), GuardDecision::Pending);
        assert_eq!(guard.decide(&state, RouteAccess::PublicOnly), GuardDecision::Pending);
    }

    #[test]
    fn login_in_flight_still_decides() {
        let guard = RouteGuard::default();
        let state = SessionState::unauthenticated().with_loading(true);
        assert_eq!(
            guard.decide(&state, RouteAccess::Protected),
            GuardDecision::Redirect("/login".to_string())
        );
    }

    #[test]
    fn parses_access_names() {
        assert_eq!("protected".parse::<RouteAccess>().unwrap(), RouteAccess::Protected);
        assert_eq!("public-only".parse::<RouteAccess>().unwrap(), RouteAccess::PublicOnly);
        assert!("admin".parse::<RouteAccess>().is_err());
    }
}
