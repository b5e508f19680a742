//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards and user-aware components read this tuple through the
//! session context to coordinate login redirects and identity-dependent
//! rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::UserProfile;

/// Authentication state tracking the current user and loading status.
///
/// `loading` is true only until the first hydration pass resolves; it never
/// becomes true again afterwards. `authenticated` tracks the presence of a
/// token in the store as of the last state computation.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub authenticated: bool,
    pub user: Option<UserProfile>,
    pub loading: bool,
}

impl Default for AuthState {
    /// The pre-hydration frame.
    fn default() -> Self {
        Self { authenticated: false, user: None, loading: true }
    }
}

impl AuthState {
    /// State computed from the store's contents. A cached profile without a
    /// token is stale and is dropped.
    pub fn resolved(token_present: bool, user: Option<UserProfile>) -> Self {
        Self {
            authenticated: token_present,
            user: if token_present { user } else { None },
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self { authenticated: false, user: None, loading: false }
    }
}
