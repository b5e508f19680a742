use super::*;

fn sample_user() -> UserProfile {
    UserProfile {
        id: 1,
        name: "Jane".to_owned(),
        email: None,
        phone: None,
        position: None,
        department: None,
        avatar_url: None,
    }
}

// =============================================================
// Pre-hydration frame
// =============================================================

#[test]
fn default_is_loading_and_unauthenticated() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(!state.authenticated);
    assert!(state.user.is_none());
}

// =============================================================
// Resolution from the store
// =============================================================

#[test]
fn resolved_without_token_is_unauthenticated() {
    let state = AuthState::resolved(false, None);
    assert_eq!(state, AuthState { authenticated: false, user: None, loading: false });
}

#[test]
fn resolved_with_token_and_profile_is_authenticated() {
    let state = AuthState::resolved(true, Some(sample_user()));
    assert!(state.authenticated);
    assert_eq!(state.user, Some(sample_user()));
    assert!(!state.loading);
}

#[test]
fn resolved_with_token_but_no_profile_keeps_authenticated() {
    let state = AuthState::resolved(true, None);
    assert!(state.authenticated);
    assert!(state.user.is_none());
}

#[test]
fn resolved_without_token_drops_stale_profile() {
    let state = AuthState::resolved(false, Some(sample_user()));
    assert!(state.user.is_none());
}

// =============================================================
// Signed-out frame
// =============================================================

#[test]
fn signed_out_is_resolved_and_empty() {
    let state = AuthState::signed_out();
    assert!(!state.authenticated);
    assert!(state.user.is_none());
    assert!(!state.loading);
}
