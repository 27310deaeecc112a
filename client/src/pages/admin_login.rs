//! Admin credential exchange for a backend session token.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::toast_host::notify;
use crate::net::api::{ApiClient, NetworkError};
use crate::pages::login::validate_sign_in_input;
use crate::state::admin::AdminSession;
use crate::state::toast::{ToastKind, ToastState};

fn describe_failure(err: &NetworkError) -> String {
    match err {
        NetworkError::Unauthorized => "Those admin credentials were rejected.".to_owned(),
        other => format!("Admin sign-in failed: {other}"),
    }
}

#[component]
pub fn AdminLoginPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let admin = expect_context::<RwSignal<AdminSession>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_sign_in_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        info.set(String::new());
        busy.set(true);
        let api = api.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api.admin_session_token(&email_value, &password_value).await {
                Ok(token) => {
                    admin.update(|a| a.store(token));
                    password.set(String::new());
                    notify(toasts, ToastKind::Success, "Admin session started.");
                    navigate("/admin/students", NavigateOptions::default());
                }
                Err(e) => {
                    leptos::logging::warn!("admin session token request failed: {e}");
                    notify(toasts, ToastKind::Error, describe_failure(&e));
                }
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Admin sign in"</h1>
                <Show when=move || admin.get().is_active()>
                    <p class="auth-message">
                        "An admin session is already active. " <a href="/admin/students">"Manage records"</a>
                    </p>
                </Show>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="admin@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
