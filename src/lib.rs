//! # peopledesk
//!
//! Leptos + WASM employee self-service portal: attendance, leave and
//! overtime requests, payslips, documents, and profile management against a
//! remote REST backend.
//!
//! The crate is organized around a small session/auth core (`state`): a
//! persisted token store, an HTTP gateway that attaches credentials and
//! reacts to authentication failure, a cross-context session broadcaster,
//! and the session context provider consumed by pages.

pub mod app;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: mounts the app over server-rendered HTML.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(crate::app::App);
}
