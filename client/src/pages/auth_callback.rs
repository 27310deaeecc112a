//! Landing route for the federated provider's redirect.

#[cfg(test)]
#[path = "auth_callback_test.rs"]
mod auth_callback_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::toast_host::notify;
use crate::state::auth::AuthContext;
use crate::state::toast::{ToastKind, ToastState};
use crate::util::browser;

/// Reason the provider gave for backing out, from the decoded `error`
/// query parameter.
pub(crate) fn provider_error(error: Option<&str>) -> Option<String> {
    error.map(str::trim).filter(|reason| !reason.is_empty()).map(str::to_owned)
}

#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let ctx = expect_context::<AuthContext>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();
    let query = use_query_map();
    let status = RwSignal::new("Finishing sign-in...".to_owned());
    let failed = RwSignal::new(false);
    let started = StoredValue::new(false);

    Effect::new(move || {
        if started.get_value() {
            return;
        }
        started.set_value(true);
        let href = browser::current_href();
        if let Some(reason) = query.with_untracked(|q| provider_error(q.get_str("error"))) {
            leptos::logging::warn!("federated sign-in cancelled by provider: {reason}");
            status.set(format!("Sign-in was cancelled ({reason})."));
            failed.set(true);
            return;
        }
        let ctx = ctx.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match ctx.complete_federated_sign_in(&href).await {
                Ok(session) => {
                    notify(toasts, ToastKind::Success, format!("Signed in as {}.", session.label()));
                    navigate("/dashboard", NavigateOptions { replace: true, ..NavigateOptions::default() });
                }
                Err(e) => {
                    notify(toasts, ToastKind::Error, e.user_message());
                    status.set(e.user_message().to_owned());
                    failed.set(true);
                }
            }
        });
    });

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <p class="auth-message">{move || status.get()}</p>
                <Show when=move || failed.get()>
                    <a class="btn btn--primary" href="/login">
                        "Back to sign in"
                    </a>
                </Show>
            </div>
        </div>
    }
}
