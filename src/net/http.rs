//! HTTP gateway: the single choke point for REST calls.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every outbound request is routed through [`Gateway`] so that the bearer
//! credential is attached and authentication failure is handled in one
//! place. A 401 response clears the persisted session and forces navigation
//! to the login route, no matter which page issued the call.
//!
//! ERROR HANDLING
//! ==============
//! Server-rejected calls keep the server's message text; transport failures
//! are a distinct variant so forms can tell "bad input" from "no network".
//! Credential values are truncated before reaching any log line.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use serde::Serialize;
use serde_json::Value;

use crate::state::store::TokenStore;

/// Route navigated to when the backend rejects the session.
#[cfg(any(test, feature = "hydrate"))]
const LOGIN_ROUTE: &str = "/login";

/// Failure taxonomy for gateway calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend rejected the session token. The gateway has already
    /// cleared local state and redirected to the login route.
    #[error("authentication rejected")]
    Unauthorized,
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// No response was received at all.
    #[error("network unavailable: {0}")]
    Network(String),
    /// The response body could not be read or parsed.
    #[error("malformed response: {0}")]
    Decode(String),
    /// The response parsed, but matched none of the tolerated shapes.
    #[error("unrecognized response shape")]
    UnrecognizedShape,
}

/// REST gateway bound to the session's [`TokenStore`].
#[derive(Clone)]
pub struct Gateway {
    store: TokenStore,
}

impl Gateway {
    pub fn new(store: TokenStore) -> Self {
        Self { store }
    }

    /// Issue a GET request.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]; a 401 additionally clears the store and redirects.
    pub async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            log::debug!("GET {path}");
            let request = self.authorize(gloo_net::http::Request::get(path));
            let response = request.send().await.map_err(|err| ApiError::Network(err.to_string()))?;
            self.inspect(response).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
            Err(server_unavailable())
        }
    }

    /// Issue a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]; a 401 additionally clears the store and redirects.
    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            log::debug!("POST {path}");
            let request = self
                .authorize(gloo_net::http::Request::post(path))
                .json(body)
                .map_err(|err| ApiError::Decode(err.to_string()))?;
            let response = request.send().await.map_err(|err| ApiError::Network(err.to_string()))?;
            self.inspect(response).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (path, body);
            Err(server_unavailable())
        }
    }

    /// Issue a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]; a 401 additionally clears the store and redirects.
    pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            log::debug!("PUT {path}");
            let request = self
                .authorize(gloo_net::http::Request::put(path))
                .json(body)
                .map_err(|err| ApiError::Decode(err.to_string()))?;
            let response = request.send().await.map_err(|err| ApiError::Network(err.to_string()))?;
            self.inspect(response).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (path, body);
            Err(server_unavailable())
        }
    }
}

#[cfg(feature = "hydrate")]
impl Gateway {
    /// Attach the bearer credential when a token is present.
    fn authorize(&self, builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
        match self.store.token() {
            Some(token) => {
                log::debug!("attaching credential {}", redact(&token));
                builder.header("Authorization", &bearer_value(&token))
            }
            None => builder,
        }
    }

    /// Classify the response. 401 is terminal for the session: local state
    /// is cleared synchronously and the browser is sent to the login route.
    async fn inspect(&self, response: gloo_net::http::Response) -> Result<Value, ApiError> {
        let status = response.status();
        if status == 401 {
            log::warn!("authentication rejected by server; clearing session");
            self.store.clear();
            force_login_redirect();
            return Err(ApiError::Unauthorized);
        }
        let text = response.text().await.map_err(|err| ApiError::Network(err.to_string()))?;
        if !response.ok() {
            let message = error_message_from_body(status, &text);
            log::warn!("request failed with {status}: {message}");
            return Err(ApiError::Server { status, message });
        }
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[cfg(feature = "hydrate")]
fn force_login_redirect() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(LOGIN_ROUTE);
    }
}

#[cfg(not(feature = "hydrate"))]
fn server_unavailable() -> ApiError {
    ApiError::Network("not available on server".to_owned())
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}

/// Truncate a credential for diagnostic output. Short tokens are hidden
/// entirely so the redacted form never reveals most of the secret.
#[cfg(any(test, feature = "hydrate"))]
fn redact(token: &str) -> String {
    if token.chars().count() <= 8 {
        "\u{2026}".to_owned()
    } else {
        let prefix: String = token.chars().take(8).collect();
        format!("{prefix}\u{2026}")
    }
}

/// Extract the server-provided message from an error body: a JSON `message`
/// or `error` field, else the raw text, else a generic status line.
#[cfg(any(test, feature = "hydrate"))]
fn error_message_from_body(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = value.get(key).and_then(Value::as_str) {
                return message.to_owned();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("request failed: {status}")
    } else {
        trimmed.to_owned()
    }
}
