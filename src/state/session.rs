//! The authoritative session: hydration, login/logout, profile refresh.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`Session`] owns the in-memory [`AuthState`] plus the store and the
//! broadcaster; [`SessionContext`] is the UI-facing handle provided through
//! Leptos context, mirroring the state into a signal for reactive reads.
//! State is always updated before the corresponding announcement goes out,
//! so a listener fired by its own context's announcement observes the new
//! state.
//!
//! CANCELLATION
//! ============
//! In-flight profile refreshes are never cancelled; a generation counter is
//! bumped on every login/logout (and on externally-driven flips) so a
//! late-arriving response from a superseded session is discarded instead of
//! resurrecting it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use leptos::prelude::*;

use crate::net::api;
use crate::net::http::{ApiError, Gateway};
use crate::net::types::{LoginSession, UserProfile};
use crate::state::auth::AuthState;
use crate::state::broadcast::{SessionBroadcaster, Subscription};
use crate::state::store::TokenStore;

/// Shared session state machine. Clones are handles onto the same state.
#[derive(Clone)]
pub struct Session {
    state: Arc<Mutex<AuthState>>,
    store: TokenStore,
    broadcaster: SessionBroadcaster,
    generation: Arc<AtomicU64>,
}

impl Session {
    pub fn new(store: TokenStore, broadcaster: SessionBroadcaster) -> Self {
        Self {
            state: Arc::new(Mutex::new(AuthState::default())),
            store,
            broadcaster,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn broadcaster(&self) -> &SessionBroadcaster {
        &self.broadcaster
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AuthState {
        self.lock().clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }

    /// Resolve the initial state synchronously from the store. Does not
    /// announce; only this context's first frame is affected.
    pub fn hydrate(&self) {
        let token_present = self.store.token().is_some();
        let user = self.store.user();
        *self.lock() = AuthState::resolved(token_present, user);
    }

    /// Mark the session authenticated. The token must already have been
    /// written to the store by the login flow; this caches the profile,
    /// updates in-memory state, and announces.
    pub fn login(&self, user: UserProfile) {
        self.generation.fetch_add(1, Ordering::Relaxed);
        self.store.set_user(&user);
        {
            let mut state = self.lock();
            state.authenticated = true;
            state.user = Some(user);
            state.loading = false;
        }
        self.broadcaster.announce();
    }

    /// End the session locally. Idempotent: a repeat call clears nothing new
    /// and makes no further announcement.
    pub fn logout(&self) {
        self.generation.fetch_add(1, Ordering::Relaxed);
        self.store.clear();
        let changed = {
            let mut state = self.lock();
            let was_authenticated = state.authenticated;
            *state = AuthState::signed_out();
            was_authenticated
        };
        if changed {
            self.broadcaster.announce();
        }
    }

    /// Replace the cached profile in memory and in the store. Leaves
    /// `authenticated` untouched.
    pub fn update_user(&self, user: UserProfile) {
        self.store.set_user(&user);
        self.lock().user = Some(user);
    }

    /// Reconcile in-memory state with the store after a peer context
    /// changed it. Never announces (the notification already happened).
    pub fn resync(&self) {
        let token_present = self.store.token().is_some();
        let user = self.store.user();
        let mut state = self.lock();
        if state.loading {
            return;
        }
        if state.authenticated != token_present {
            // Externally-driven flip: invalidate in-flight refreshes.
            self.generation.fetch_add(1, Ordering::Relaxed);
        }
        let resolved = AuthState::resolved(token_present, user);
        *state = resolved;
    }

    /// Re-fetch the profile from the backend. A failure ends the session: a
    /// profile that can no longer be fetched means the token is no longer
    /// trusted.
    pub async fn refresh_user(&self, gateway: &Gateway) {
        let generation = self.generation();
        let result = api::fetch_me(gateway).await;
        self.apply_refresh(generation, result);
    }

    fn apply_refresh(&self, generation: u64, result: Result<UserProfile, ApiError>) {
        if self.generation() != generation {
            // A login/logout happened while the fetch was in flight.
            return;
        }
        match result {
            Ok(user) => {
                if self.state().authenticated {
                    self.update_user(user);
                }
            }
            Err(_err) => {
                #[cfg(feature = "hydrate")]
                log::warn!("profile refresh failed: {_err}; ending session");
                self.logout();
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, AuthState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// UI-facing session handle provided through Leptos context.
#[derive(Clone)]
pub struct SessionContext {
    session: Session,
    gateway: Gateway,
    state: RwSignal<AuthState>,
    _subscription: Arc<Subscription>,
}

impl SessionContext {
    /// Reactive view of the session state.
    pub fn state(&self) -> RwSignal<AuthState> {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Finish a credential exchange the gateway already confirmed: persist
    /// the token, resolve the profile (from the login envelope or `/api/me`),
    /// and flip the session to authenticated.
    ///
    /// # Errors
    ///
    /// If the profile cannot be resolved the token is removed again and the
    /// session stays unauthenticated.
    pub async fn complete_login(&self, login: LoginSession) -> Result<(), ApiError> {
        self.session.store().set_token(&login.token);
        let user = match login.user {
            Some(user) => user,
            None => match api::fetch_me(&self.gateway).await {
                Ok(user) => user,
                Err(err) => {
                    self.session.store().clear();
                    return Err(err);
                }
            },
        };
        self.session.login(user);
        self.sync();
        Ok(())
    }

    /// End the session. The backend call is advisory; local state clearing
    /// always succeeds.
    pub async fn logout(&self) {
        if api::logout(&self.gateway).await.is_err() {
            #[cfg(feature = "hydrate")]
            log::warn!("backend logout failed; clearing local session anyway");
        }
        self.session.logout();
        self.sync();
    }

    /// Replace the cached profile after a successful edit.
    pub fn update_user(&self, user: UserProfile) {
        self.session.update_user(user);
        self.sync();
    }

    /// Re-fetch the profile; failure ends the session.
    pub async fn refresh_user(&self) {
        self.session.refresh_user(&self.gateway).await;
        self.sync();
    }

    fn sync(&self) {
        self.state.set(self.session.state());
    }
}

/// Build the session from persisted state and provide it (plus the gateway)
/// as context. Call once, at the root of the component tree.
pub fn provide_session() -> SessionContext {
    #[cfg(feature = "hydrate")]
    let store = TokenStore::browser();
    #[cfg(not(feature = "hydrate"))]
    let store = TokenStore::in_memory();

    let broadcaster = SessionBroadcaster::new();
    #[cfg(feature = "hydrate")]
    broadcaster.install_cross_context();

    let session = Session::new(store.clone(), broadcaster.clone());
    session.hydrate();
    let gateway = Gateway::new(store);

    let state = RwSignal::new(session.state());
    let listener_session = session.clone();
    let subscription = broadcaster.subscribe(move || {
        listener_session.resync();
        state.set(listener_session.state());
    });

    let context = SessionContext {
        session,
        gateway: gateway.clone(),
        state,
        _subscription: Arc::new(subscription),
    };
    provide_context(gateway);
    provide_context(context.clone());

    // A restored token is only trusted once the backend confirms it.
    #[cfg(feature = "hydrate")]
    if context.session.state().authenticated {
        let refresh = context.clone();
        leptos::task::spawn_local(async move {
            refresh.refresh_user().await;
        });
    }

    context
}
