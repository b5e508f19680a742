//! Session-change fan-out within and across browsing contexts.
//!
//! DESIGN
//! ======
//! One `announce()` reaches two audiences. Local listeners are invoked
//! synchronously, in registration order, before the call returns. Other
//! same-origin contexts are woken through the platform's storage-change
//! notification: the broadcaster bumps a signal key, and `storage` events on
//! the session keys are folded back into local delivery on the receiving
//! side. Delivery is at-least-once and best-effort; nothing is replayed to
//! late subscribers.

#[cfg(test)]
#[path = "broadcast_test.rs"]
mod broadcast_test;

use std::sync::{Arc, Mutex, PoisonError, Weak};

#[cfg(any(test, feature = "hydrate"))]
use crate::state::store::{SIGNAL_KEY, TOKEN_KEY, USER_KEY};

/// Page-level DOM event dispatched alongside local delivery, for consumers
/// outside the Leptos tree.
pub const SESSION_EVENT: &str = "peopledesk:session-change";

type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Handle returned by [`SessionBroadcaster::subscribe`]; dropping it removes
/// the listener.
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Remove the listener now instead of at drop time.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Publish/subscribe on "session state changed".
#[derive(Clone, Default)]
pub struct SessionBroadcaster {
    registry: Arc<Mutex<Registry>>,
}

impl SessionBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for announcements made strictly after this call.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(listener)));
        Subscription { id, registry: Arc::downgrade(&self.registry) }
    }

    /// Fire a change notification to both audiences.
    pub fn announce(&self) {
        notify_all(&self.registry);
        #[cfg(feature = "hydrate")]
        {
            dispatch_page_event();
            bump_signal_key();
        }
    }

    /// Wire the platform storage-change notification into local delivery, so
    /// peer contexts' announcements (and direct writes to the session keys)
    /// reach this context's listeners.
    #[cfg(feature = "hydrate")]
    pub fn install_cross_context(&self) {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::prelude::Closure;

        let Some(window) = web_sys::window() else {
            return;
        };
        let registry = Arc::clone(&self.registry);
        let closure = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(move |event: web_sys::StorageEvent| {
            if storage_key_is_session(event.key().as_deref()) {
                notify_all(&registry);
            }
        });
        if window
            .add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref())
            .is_ok()
        {
            // Listener lives for the page's lifetime.
            closure.forget();
        }
    }
}

/// Whether a storage-event key belongs to the session. `None` means the
/// whole storage area was cleared, which also affects the session.
#[cfg(any(test, feature = "hydrate"))]
fn storage_key_is_session(key: Option<&str>) -> bool {
    match key {
        None => true,
        Some(key) => key == TOKEN_KEY || key == USER_KEY || key == SIGNAL_KEY,
    }
}

fn notify_all(registry: &Arc<Mutex<Registry>>) {
    // Snapshot under the lock, call outside it: listeners may subscribe or
    // unsubscribe from within their callback.
    let listeners: Vec<Listener> = lock(registry)
        .listeners
        .iter()
        .map(|(_, listener)| Arc::clone(listener))
        .collect();
    for listener in listeners {
        listener();
    }
}

fn lock(registry: &Mutex<Registry>) -> std::sync::MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(feature = "hydrate")]
fn dispatch_page_event() {
    if let Some(window) = web_sys::window() {
        if let Ok(event) = web_sys::CustomEvent::new(SESSION_EVENT) {
            let _ = window.dispatch_event(&event);
        }
    }
}

#[cfg(feature = "hydrate")]
fn bump_signal_key() {
    let Some(storage) = web_sys::window().and_then(|window| window.local_storage().ok().flatten()) else {
        return;
    };
    let current = storage
        .get_item(SIGNAL_KEY)
        .ok()
        .flatten()
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(0);
    let _ = storage.set_item(SIGNAL_KEY, &current.wrapping_add(1).to_string());
}
