//! Dashboard page: the authenticated landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Greets the signed-in employee, offers clock-in/out, and lists recent
//! payslips and leave requests through the endpoint wrappers. Transient
//! load failures render as a dismissible banner; an expired session never
//! reaches this page's error handling (the gateway redirects first).

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::http::ApiError;
use crate::net::types::{AttendanceRecord, LeaveRequest, Payslip, RequestStatus};
use crate::state::session::SessionContext;
use crate::util::auth::install_unauth_redirect;

fn load_error_message(resource: &str, error: &ApiError) -> String {
    match error {
        ApiError::Network(_) => format!("Could not load {resource}: no connection."),
        other => format!("Could not load {resource}: {other}."),
    }
}

fn status_label(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "pending",
        RequestStatus::Approved => "approved",
        RequestStatus::Rejected => "rejected",
    }
}

fn payslip_line(payslip: &Payslip) -> String {
    match &payslip.currency {
        Some(currency) => format!("{}: net {:.2} {currency}", payslip.period, payslip.net_pay),
        None => format!("{}: net {:.2}", payslip.period, payslip.net_pay),
    }
}

fn leave_line(request: &LeaveRequest) -> String {
    format!(
        "{} {} to {} ({})",
        request.leave_type,
        request.start_date,
        request.end_date,
        status_label(request.status)
    )
}

fn clock_note(record: &AttendanceRecord) -> String {
    if let Some(time) = &record.clock_out {
        format!("Clocked out at {time}")
    } else if let Some(time) = &record.clock_in {
        format!("Clocked in at {time}")
    } else {
        "Attendance updated.".to_owned()
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let context = expect_context::<SessionContext>();
    let auth = context.state();
    let navigate = use_navigate();
    install_unauth_redirect(auth, navigate);

    let payslips = RwSignal::new(Vec::<Payslip>::new());
    let leave_requests = RwSignal::new(Vec::<LeaveRequest>::new());
    let attendance_note = RwSignal::new(String::new());
    let load_error = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    {
        let gateway = context.gateway().clone();
        leptos::task::spawn_local(async move {
            match crate::net::api::list_payslips(&gateway).await {
                Ok(items) => payslips.set(items),
                Err(err) => load_error.set(Some(load_error_message("payslips", &err))),
            }
            match crate::net::api::list_leave(&gateway).await {
                Ok(items) => leave_requests.set(items),
                Err(err) => load_error.set(Some(load_error_message("leave requests", &err))),
            }
        });
    }

    let clock_context = context.clone();
    let on_clock_in = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let gateway = clock_context.gateway().clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::clock_in(&gateway).await {
                    Ok(record) => attendance_note.set(clock_note(&record)),
                    Err(err) => load_error.set(Some(load_error_message("attendance", &err))),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = &clock_context;
    };

    let clock_out_context = context.clone();
    let on_clock_out = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let gateway = clock_out_context.gateway().clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::clock_out(&gateway).await {
                    Ok(record) => attendance_note.set(clock_note(&record)),
                    Err(err) => load_error.set(Some(load_error_message("attendance", &err))),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = &clock_out_context;
    };

    let logout_context = context.clone();
    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let context = logout_context.clone();
            leptos::task::spawn_local(async move {
                context.logout().await;
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href("/login");
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = &logout_context;
    };

    let greeting = move || {
        auth.get()
            .user
            .map_or_else(|| "Welcome".to_owned(), |user| format!("Welcome, {}", user.name))
    };

    view! {
        <Show
            when=move || !auth.get().loading && auth.get().authenticated
            fallback=move || {
                view! {
                    <div class="dashboard-page">
                        <p>
                            {move || {
                                if auth.get().loading { "Loading..." } else { "Redirecting to login..." }
                            }}
                        </p>
                    </div>
                }
            }
        >
            <div class="dashboard-page">
                <header class="dashboard-page__header toolbar">
                    <span class="toolbar__title">{greeting}</span>
                    <span class="toolbar__spacer"></span>
                    <a class="btn toolbar__profile" href="/profile">
                        "Profile"
                    </a>
                    <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                        "Logout"
                    </button>
                </header>

                <Show when=move || load_error.get().is_some()>
                    <div class="dashboard-page__banner">
                        <span>{move || load_error.get().unwrap_or_default()}</span>
                        <button class="btn" on:click=move |_| load_error.set(None)>
                            "Dismiss"
                        </button>
                    </div>
                </Show>

                <section class="dashboard-page__section">
                    <h2>"Attendance"</h2>
                    <div class="dashboard-page__actions">
                        <button class="btn btn--primary" on:click=on_clock_in>
                            "Clock In"
                        </button>
                        <button class="btn" on:click=on_clock_out>
                            "Clock Out"
                        </button>
                    </div>
                    <Show when=move || !attendance_note.get().is_empty()>
                        <p class="dashboard-page__note">{move || attendance_note.get()}</p>
                    </Show>
                </section>

                <section class="dashboard-page__section">
                    <h2>"Recent Payslips"</h2>
                    <ul class="dashboard-page__list">
                        {move || {
                            payslips
                                .get()
                                .iter()
                                .map(|payslip| view! { <li>{payslip_line(payslip)}</li> })
                                .collect::<Vec<_>>()
                        }}
                    </ul>
                </section>

                <section class="dashboard-page__section">
                    <h2>"Leave Requests"</h2>
                    <ul class="dashboard-page__list">
                        {move || {
                            leave_requests
                                .get()
                                .iter()
                                .map(|request| view! { <li>{leave_line(request)}</li> })
                                .collect::<Vec<_>>()
                        }}
                    </ul>
                </section>
            </div>
        </Show>
    }
}
