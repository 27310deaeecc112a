//! Top navigation bar with session-aware actions.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::toast_host::notify;
use crate::state::auth::{AuthContext, AuthState};
use crate::state::toast::{ToastKind, ToastState};

#[component]
pub fn SiteHeader() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <header class="site-header">
            <a class="site-header__brand" href="/">
                "MentorHub"
            </a>
            <nav class="site-header__nav">
                <a href="/programs">"Programs"</a>
                <a href="/about">"About"</a>
                <a href="/faq">"FAQ"</a>
                <a href="/contact">"Contact"</a>
            </nav>
            <span class="site-header__spacer"></span>
            <Show
                when=move || auth.get().session.is_some()
                fallback=|| {
                    view! {
                        <a class="btn" href="/login">
                            "Sign in"
                        </a>
                        <a class="btn btn--primary" href="/signup">
                            "Join"
                        </a>
                    }
                }
            >
                <SessionActions/>
            </Show>
        </header>
    }
}

/// Dashboard link, identity label, and sign-out for a signed-in user.
#[component]
fn SessionActions() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ctx = expect_context::<AuthContext>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();

    let label = move || {
        auth.get()
            .session
            .as_ref()
            .map(|s| s.label().to_owned())
            .unwrap_or_default()
    };

    let on_sign_out = move |_| match ctx.sign_out() {
        Ok(()) => {
            notify(toasts, ToastKind::Info, "Signed out.");
            navigate("/", NavigateOptions::default());
        }
        Err(e) => notify(toasts, ToastKind::Error, e.user_message()),
    };

    view! {
        <a class="btn" href="/dashboard">
            "Dashboard"
        </a>
        <span class="site-header__self">{label}</span>
        <button class="btn site-header__logout" on:click=on_sign_out>
            "Sign out"
        </button>
    }
}
