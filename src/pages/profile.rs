//! Profile page: edit display name and contact phone.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::types::UserProfile;
use crate::state::session::SessionContext;
use crate::util::auth::install_unauth_redirect;

fn validate_profile_input(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Display name cannot be empty.");
    }
    Ok(())
}

/// Fold the form fields into the full profile record the backend expects.
fn apply_profile_edits(mut user: UserProfile, name: &str, phone: &str) -> UserProfile {
    user.name = name.trim().to_owned();
    let phone = phone.trim();
    user.phone = if phone.is_empty() { None } else { Some(phone.to_owned()) };
    user
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let context = expect_context::<SessionContext>();
    let auth = context.state();
    let navigate = use_navigate();
    install_unauth_redirect(auth, navigate);

    let name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Prefill once the profile is available.
    let prefilled = RwSignal::new(false);
    Effect::new(move || {
        if prefilled.get() {
            return;
        }
        if let Some(user) = auth.get().user {
            name.set(user.name);
            phone.set(user.phone.unwrap_or_default());
            prefilled.set(true);
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        if let Err(message) = validate_profile_input(&name.get()) {
            info.set(message.to_owned());
            return;
        }
        let Some(current) = auth.get_untracked().user else {
            return;
        };
        let updated = apply_profile_edits(current, &name.get(), &phone.get());
        busy.set(true);
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let context = context.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::update_profile(context.gateway(), &updated).await {
                    Ok(saved) => {
                        context.update_user(saved);
                        info.set("Profile saved.".to_owned());
                    }
                    Err(err) => info.set(format!("Could not save profile: {err}")),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&context, updated);
            busy.set(false);
        }
    };

    view! {
        <div class="profile-page">
            <header class="profile-page__header toolbar">
                <a class="btn" href="/">
                    "Back"
                </a>
                <span class="toolbar__title">"My Profile"</span>
            </header>
            <form class="profile-form" on:submit=on_submit>
                <label class="profile-form__label">
                    "Display Name"
                    <input
                        class="profile-form__input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label class="profile-form__label">
                    "Phone"
                    <input
                        class="profile-form__input"
                        type="tel"
                        prop:value=move || phone.get()
                        on:input=move |ev| phone.set(event_target_value(&ev))
                    />
                </label>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    "Save"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="profile-page__message">{move || info.get()}</p>
            </Show>
        </div>
    }
}
