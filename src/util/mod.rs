//! Utility helpers shared across page modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components apply identical unauthenticated redirect behavior
//! through `auth` instead of each re-implementing the guard.

pub mod auth;
