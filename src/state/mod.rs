//! Client-side session state modules.
//!
//! DESIGN
//! ======
//! The session core is split into small pieces: `store` persists the token
//! and cached profile, `broadcast` fans session-change notifications out to
//! this and other browsing contexts, `auth` is the state tuple pages read,
//! and `session` ties them together behind the UI-facing provider.

pub mod auth;
pub mod broadcast;
pub mod session;
pub mod store;
