//! Account creation without a role; the role is chosen on the completion
//! form afterwards.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::toast_host::notify;
use crate::state::auth::AuthContext;
use crate::state::toast::{ToastKind, ToastState};
use crate::util::forms::{self, FormError, FormValues};
use crate::util::route_guard::COMPLETION_PATH;

/// Validated account credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AccountInput {
    pub display_name: String,
    pub email: String,
    pub password: String,
}

/// Validate the shared account fields used by signup and registration.
pub(crate) fn account_from_form(values: &FormValues) -> Result<AccountInput, FormError> {
    let display_name = forms::required(values, "display_name")?;
    let email = forms::email(values, "email")?;
    let password = forms::password(values, "password")?;
    if values.get("confirm").map(String::as_str) != Some(password.as_str()) {
        return Err(FormError::new("confirm", "does not match the password"));
    }
    Ok(AccountInput { display_name, email, password })
}

/// Two-way binding between an input and one key of a `FormValues` signal.
pub(crate) fn bind(values: RwSignal<FormValues>, key: &'static str) -> (impl Fn() -> String + Copy, impl Fn(leptos::ev::Event) + Copy) {
    let read = move || values.with(|v| v.get(key).cloned().unwrap_or_default());
    let write = move |ev: leptos::ev::Event| {
        let input = event_target_value(&ev);
        values.update(|v| {
            v.insert(key.to_owned(), input);
        });
    };
    (read, write)
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let ctx = expect_context::<AuthContext>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();

    let values = RwSignal::new(FormValues::new());
    let error = RwSignal::new(None::<FormError>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let input = match values.with_untracked(account_from_form) {
            Ok(input) => input,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        error.set(None);
        busy.set(true);
        let ctx = ctx.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match ctx.sign_up(&input.email, &input.password, &input.display_name).await {
                Ok(_) => {
                    notify(toasts, ToastKind::Success, "Account created. Tell us a little about yourself.");
                    navigate(COMPLETION_PATH, NavigateOptions::default());
                }
                Err(e) => notify(toasts, ToastKind::Error, e.user_message()),
            }
            busy.set(false);
        });
    };

    let (name, on_name) = bind(values, "display_name");
    let (email, on_email) = bind(values, "email");
    let (password, on_password) = bind(values, "password");
    let (confirm, on_confirm) = bind(values, "confirm");

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create an account"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input class="auth-input" type="text" placeholder="Full name" prop:value=name on:input=on_name/>
                    <input class="auth-input" type="email" placeholder="you@example.com" prop:value=email on:input=on_email/>
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="new-password"
                        prop:value=password
                        on:input=on_password
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Confirm password"
                        autocomplete="new-password"
                        prop:value=confirm
                        on:input=on_confirm
                    />
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating..." } else { "Create account" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="auth-message">{move || error.get().map(|e| e.to_string())}</p>
                </Show>
                <p class="auth-footnote">
                    "Already registered? " <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
