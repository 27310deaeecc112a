//! Profile completion form: the canonical destination of the route guard.

#[cfg(test)]
#[path = "complete_profile_test.rs"]
mod complete_profile_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::protected_route::ProtectedRoute;
use crate::components::toast_host::notify;
use crate::net::api::ApiClient;
use crate::net::types::{ProfileDraft, Role};
use crate::pages::signup::bind;
use crate::state::auth::{AuthContext, AuthState};
use crate::state::toast::{ToastKind, ToastState};
use crate::util::access::dashboard_path_for;
use crate::util::forms::{self, FormError, FormValues};

/// Roles a user may pick for themselves.
pub(crate) const SELF_SERVICE_ROLES: &[Role] = &[Role::Student, Role::Mentor];

/// Seed the form from whatever the session and any partial profile know.
pub(crate) fn initial_values(state: &AuthState) -> FormValues {
    let mut values = FormValues::new();
    if let Some(session) = &state.session {
        values.insert("display_name".to_owned(), session.display_name.clone().unwrap_or_default());
    }
    values.insert("role".to_owned(), Role::Student.as_str().to_owned());
    if let Some(profile) = state.profile() {
        values.insert("display_name".to_owned(), profile.display_name.clone());
        values.insert("role".to_owned(), profile.role.as_str().to_owned());
        values.insert("phone".to_owned(), profile.phone.clone().unwrap_or_default());
        values.insert("bio".to_owned(), profile.bio.clone().unwrap_or_default());
    }
    values
}

/// Validate the completion form. An existing admin keeps their role.
pub(crate) fn profile_from_form(values: &FormValues, current: Option<Role>) -> Result<ProfileDraft, FormError> {
    let role = forms::required(values, "role")?
        .parse::<Role>()
        .map_err(|_| FormError::new("role", "choose student or mentor"))?;
    let allowed = SELF_SERVICE_ROLES.contains(&role) || current == Some(role);
    if !allowed {
        return Err(FormError::new("role", "choose student or mentor"));
    }
    Ok(ProfileDraft {
        role,
        display_name: forms::required(values, "display_name")?,
        phone: forms::optional(values, "phone"),
        bio: forms::optional(values, "bio"),
        completed: true,
    })
}

#[component]
pub fn CompleteProfilePage() -> impl IntoView {
    view! {
        <ProtectedRoute require_auth=true>
            <CompleteProfileForm/>
        </ProtectedRoute>
    }
}

#[component]
fn CompleteProfileForm() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ctx = expect_context::<AuthContext>();
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();

    let values = RwSignal::new(auth.with_untracked(initial_values));
    let error = RwSignal::new(None::<FormError>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let current_role = auth.with_untracked(AuthState::role);
        let draft = match values.with_untracked(|v| profile_from_form(v, current_role)) {
            Ok(draft) => draft,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        let Some(uid) = auth.with_untracked(|a| a.session.as_ref().map(|s| s.uid.clone())) else {
            return;
        };
        error.set(None);
        busy.set(true);
        let ctx = ctx.clone();
        let api = api.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let token = match ctx.get_token().await {
                Ok(Some(token)) => token,
                Ok(None) => {
                    notify(toasts, ToastKind::Error, "Your session has ended. Please sign in again.");
                    busy.set(false);
                    return;
                }
                Err(e) => {
                    notify(toasts, ToastKind::Error, e.user_message());
                    busy.set(false);
                    return;
                }
            };
            match api.save_profile(&uid, &token, &draft).await {
                Ok(saved) => {
                    let role = saved.role;
                    ctx.profile_saved(saved);
                    notify(toasts, ToastKind::Success, "Profile saved.");
                    navigate(dashboard_path_for(role), NavigateOptions::default());
                }
                Err(e) => {
                    leptos::logging::warn!("profile save failed uid={uid}: {e}");
                    notify(toasts, ToastKind::Error, format!("Could not save your profile: {e}"));
                }
            }
            busy.set(false);
        });
    };

    let (name, on_name) = bind(values, "display_name");
    let (role, on_role) = bind(values, "role");
    let (phone, on_phone) = bind(values, "phone");
    let (bio, on_bio) = bind(values, "bio");

    view! {
        <div class="auth-page">
            <div class="auth-card auth-card--wide">
                <h1>"Complete your profile"</h1>
                <p class="auth-card__subtitle">"We need a few details before you can use your dashboard."</p>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-label">
                        "I am joining as"
                        <select class="auth-input" prop:value=role on:change=on_role>
                            <option value="student">"Student"</option>
                            <option value="mentor">"Mentor"</option>
                            <Show when=move || auth.get().role() == Some(Role::Admin)>
                                <option value="admin">"Admin"</option>
                            </Show>
                        </select>
                    </label>
                    <input class="auth-input" type="text" placeholder="Display name" prop:value=name on:input=on_name/>
                    <input class="auth-input" type="tel" placeholder="Phone (optional)" prop:value=phone on:input=on_phone/>
                    <textarea class="auth-input" rows="4" placeholder="Short bio (optional)" prop:value=bio on:input=on_bio></textarea>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Saving..." } else { "Save profile" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="auth-message">{move || error.get().map(|e| e.to_string())}</p>
                </Show>
            </div>
        </div>
    }
}
