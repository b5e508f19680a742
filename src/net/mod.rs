//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` is the single gateway every request passes through (credentials,
//! auth-failure handling), `api` wraps individual endpoints, and `types`
//! defines the wire DTOs plus the tolerant response-envelope decoding.

pub mod api;
pub mod http;
pub mod types;
