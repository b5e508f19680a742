//! Login page: email + password credential exchange.
//!
//! ERROR HANDLING
//! ==============
//! Credential rejection and transport failure are rendered inline on the
//! form; session state stays unauthenticated until the exchange completes.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::net::http::ApiError;
use crate::net::types::Credentials;
use crate::state::session::SessionContext;

/// Validate the login form fields into a request payload.
fn validate_login_input(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    if password.is_empty() {
        return Err("Enter your password.");
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

/// Map a failed exchange onto the inline form message.
fn login_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized => "Your credentials were not accepted.".to_owned(),
        ApiError::Server { message, .. } => message.clone(),
        ApiError::Network(_) => "Cannot reach the server. Check your connection.".to_owned(),
        ApiError::Decode(_) | ApiError::UnrecognizedShape => {
            "The server response could not be understood.".to_owned()
        }
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let context = expect_context::<SessionContext>();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match validate_login_input(&email.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let context = context.clone();
            leptos::task::spawn_local(async move {
                let outcome = match crate::net::api::login(context.gateway(), &credentials).await {
                    Ok(login) => context.complete_login(login).await,
                    Err(err) => Err(err),
                };
                match outcome {
                    Ok(()) => {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href("/");
                        }
                    }
                    Err(err) => {
                        info.set(login_error_message(&err));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&context, credentials);
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"PeopleDesk"</h1>
                <p class="login-card__subtitle">"Employee Self-Service"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@company.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
