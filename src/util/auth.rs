//! Shared auth route-guard helpers.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// Whether the guard should send this visitor to the login page: loading has
/// resolved and no authenticated session exists.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && !state.authenticated
}

/// Redirect to `/login` whenever auth has resolved with no session.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate("/login", NavigateOptions::default());
        }
    });
}
