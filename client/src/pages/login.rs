//! Login page supporting email + password and federated sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::toast_host::notify;
use crate::state::auth::AuthContext;
use crate::state::toast::{ToastKind, ToastState};
use crate::util::forms::is_valid_email;

/// Trim and check sign-in input before calling the identity provider.
pub(crate) fn validate_sign_in_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    if !is_valid_email(email) {
        return Err("Enter a valid email address.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = expect_context::<AuthContext>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let sign_in_ctx = ctx.clone();
    let on_sign_in = move |ev: leptos::ev::SubmitEvent| {
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
        let ctx = sign_in_ctx.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match ctx.sign_in(&email_value, &password_value).await {
                Ok(session) => {
                    notify(toasts, ToastKind::Success, format!("Welcome back, {}.", session.label()));
                    navigate("/dashboard", NavigateOptions::default());
                }
                Err(e) => notify(toasts, ToastKind::Error, e.user_message()),
            }
            busy.set(false);
        });
    };

    let on_federated = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        let ctx = ctx.clone();
        leptos::task::spawn_local(async move {
            // Success leaves the page; only failures come back here.
            if let Err(e) = ctx.sign_in_with_federated_provider().await {
                notify(toasts, ToastKind::Error, e.user_message());
                busy.set(false);
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign in"</h1>
                <form class="auth-form" on:submit=on_sign_in>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
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
                <div class="auth-divider"></div>
                <button class="btn auth-federated" on:click=on_federated disabled=move || busy.get()>
                    "Continue with Google"
                </button>
                <p class="auth-footnote">
                    "New here? " <a href="/signup">"Create an account"</a> " or register as a "
                    <a href="/register/student">"student"</a> " or " <a href="/register/mentor">"mentor"</a> "."
                </p>
            </div>
        </div>
    }
}
