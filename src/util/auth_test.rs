use super::*;
use crate::net::types::UserProfile;

#[test]
fn redirects_when_resolved_and_unauthenticated() {
    let state = AuthState { authenticated: false, user: None, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn does_not_redirect_while_loading() {
    let state = AuthState { authenticated: false, user: None, loading: true };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn does_not_redirect_when_authenticated() {
    let state = AuthState {
        authenticated: true,
        user: Some(UserProfile {
            id: 1,
            name: "Alice".to_owned(),
            email: None,
            phone: None,
            position: None,
            department: None,
            avatar_url: None,
        }),
        loading: false,
    };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn does_not_redirect_when_authenticated_without_profile() {
    let state = AuthState { authenticated: true, user: None, loading: false };
    assert!(!should_redirect_unauth(&state));
}
