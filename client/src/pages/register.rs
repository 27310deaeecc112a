//! Student and mentor registration: account creation plus a completed
//! profile in one form.
//!
//! SYSTEM CONTEXT
//! ==============
//! The account is created first; the profile save needs the new session's
//! token. If the save fails the user is signed in with no profile and the
//! route guard sends them to the completion form.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::toast_host::notify;
use crate::net::api::ApiClient;
use crate::net::types::{ProfileDraft, Role};
use crate::pages::signup::{AccountInput, account_from_form, bind};
use crate::state::auth::AuthContext;
use crate::state::toast::{ToastKind, ToastState};
use crate::util::access::dashboard_path_for;
use crate::util::forms::{self, FormError, FormValues};
use crate::util::route_guard::COMPLETION_PATH;

/// Validated registration form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Registration {
    pub account: AccountInput,
    pub profile: ProfileDraft,
}

/// Validate a registration for `role`.
pub(crate) fn registration_from_form(values: &FormValues, role: Role) -> Result<Registration, FormError> {
    let account = account_from_form(values)?;
    let profile = ProfileDraft {
        role,
        display_name: account.display_name.clone(),
        phone: forms::optional(values, "phone"),
        bio: forms::optional(values, "bio"),
        completed: true,
    };
    if role == Role::Mentor && profile.bio.is_none() {
        return Err(FormError::new("bio", "tell students about your expertise"));
    }
    Ok(Registration { account, profile })
}

fn heading(role: Role) -> &'static str {
    match role {
        Role::Mentor => "Become a mentor",
        _ => "Join as a student",
    }
}

#[component]
pub fn StudentRegisterPage() -> impl IntoView {
    view! { <RegisterForm role=Role::Student/> }
}

#[component]
pub fn MentorRegisterPage() -> impl IntoView {
    view! { <RegisterForm role=Role::Mentor/> }
}

#[component]
fn RegisterForm(role: Role) -> impl IntoView {
    let ctx = expect_context::<AuthContext>();
    let api = expect_context::<ApiClient>();
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
        let registration = match values.with_untracked(|v| registration_from_form(v, role)) {
            Ok(r) => r,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        error.set(None);
        busy.set(true);
        let ctx = ctx.clone();
        let api = api.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let Registration { account, profile } = registration;
            let session = match ctx.sign_up(&account.email, &account.password, &account.display_name).await {
                Ok(session) => session,
                Err(e) => {
                    notify(toasts, ToastKind::Error, e.user_message());
                    busy.set(false);
                    return;
                }
            };
            let token = ctx.get_token().await.ok().flatten().unwrap_or(session.id_token);
            match api.save_profile(&session.uid, &token, &profile).await {
                Ok(saved) => {
                    ctx.profile_saved(saved);
                    notify(toasts, ToastKind::Success, "Registration complete. Welcome to MentorHub!");
                    navigate(dashboard_path_for(role), NavigateOptions::default());
                }
                Err(e) => {
                    leptos::logging::warn!("registration profile save failed uid={}: {e}", session.uid);
                    notify(toasts, ToastKind::Error, "Your account was created, but we could not save your profile.");
                    navigate(COMPLETION_PATH, NavigateOptions::default());
                }
            }
            busy.set(false);
        });
    };

    let (name, on_name) = bind(values, "display_name");
    let (email, on_email) = bind(values, "email");
    let (password, on_password) = bind(values, "password");
    let (confirm, on_confirm) = bind(values, "confirm");
    let (phone, on_phone) = bind(values, "phone");
    let (bio, on_bio) = bind(values, "bio");
    let bio_placeholder = if role == Role::Mentor { "Your expertise and experience" } else { "What do you hope to learn? (optional)" };

    view! {
        <div class="auth-page">
            <div class="auth-card auth-card--wide">
                <h1>{heading(role)}</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input class="auth-input" type="text" placeholder="Full name" prop:value=name on:input=on_name/>
                    <input class="auth-input" type="email" placeholder="you@example.com" prop:value=email on:input=on_email/>
                    <input class="auth-input" type="password" placeholder="Password" prop:value=password on:input=on_password/>
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Confirm password"
                        prop:value=confirm
                        on:input=on_confirm
                    />
                    <input class="auth-input" type="tel" placeholder="Phone (optional)" prop:value=phone on:input=on_phone/>
                    <textarea class="auth-input" rows="4" placeholder=bio_placeholder prop:value=bio on:input=on_bio></textarea>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Registering..." } else { "Register" }}
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
