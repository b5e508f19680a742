//! Persisted session storage: the raw token and the cached profile.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is last-writer-wins with no locking; the only concurrent
//! writers are the user's own tabs acting on the same logical session, and
//! the broadcaster reconciles them after the fact. A corrupted cached
//! profile reads as absent rather than failing hydration.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::net::types::UserProfile;

/// Storage key holding the raw session token.
pub const TOKEN_KEY: &str = "peopledesk_token";
/// Storage key holding the serialized profile record.
pub const USER_KEY: &str = "peopledesk_user";
/// Storage key bumped by the broadcaster to wake other contexts.
pub const SIGNAL_KEY: &str = "peopledesk_session_signal";

/// Origin-scoped key/value persistence behind the token store.
pub trait KeyValueBackend: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory backend for tests and server rendering.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.entries().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }
}

/// `localStorage`-backed persistence. All failures degrade to "absent";
/// storage being unavailable must never take the app down.
#[cfg(feature = "hydrate")]
pub struct BrowserBackend;

#[cfg(feature = "hydrate")]
impl BrowserBackend {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueBackend for BrowserBackend {
    fn read(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn write(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Durable store for the session token and cached profile.
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn KeyValueBackend>,
}

impl TokenStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Store kept only for the lifetime of the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::default()))
    }

    /// Store persisted in the browser's `localStorage`.
    #[cfg(feature = "hydrate")]
    pub fn browser() -> Self {
        Self::new(Arc::new(BrowserBackend))
    }

    pub fn token(&self) -> Option<String> {
        self.backend.read(TOKEN_KEY)
    }

    /// Persist the token. Announcing the change is the caller's job.
    pub fn set_token(&self, token: &str) {
        self.backend.write(TOKEN_KEY, token);
    }

    /// Read the cached profile; corrupted serialization reads as `None`.
    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.backend.read(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn set_user(&self, user: &UserProfile) {
        if let Ok(raw) = serde_json::to_string(user) {
            self.backend.write(USER_KEY, &raw);
        }
    }

    /// Remove both keys; no partial state is observable afterwards.
    pub fn clear(&self) {
        self.backend.remove(TOKEN_KEY);
        self.backend.remove(USER_KEY);
    }
}
