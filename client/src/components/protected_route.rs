//! Rendering gate for sign-in and role-restricted subtrees.
//!
//! SYSTEM CONTEXT
//! ==============
//! Dashboards and admin screens wrap their content in `ProtectedRoute`. It
//! renders placeholders only and never navigates; the profile-completion
//! redirect is the route guard's concern.

use leptos::prelude::*;

use crate::net::types::Role;
use crate::state::auth::AuthState;
use crate::util::access::{AccessRequirement, AccessState, DeniedReason, evaluate_access};

/// Render `children` only when the viewer satisfies `roles` / `require_auth`.
#[component]
pub fn ProtectedRoute(
    #[prop(optional)] roles: Vec<Role>,
    #[prop(optional)] require_auth: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let requirement = AccessRequirement { require_auth, roles };
    let access = Memo::new(move |_| evaluate_access(&auth.get(), &requirement));

    move || match access.get() {
        AccessState::Loading => view! {
            <div class="gate gate--loading">
                <p>"Loading..."</p>
            </div>
        }
        .into_any(),
        AccessState::LoadingProfile => view! {
            <div class="gate gate--loading">
                <p>"Loading your profile..."</p>
            </div>
        }
        .into_any(),
        AccessState::Denied(reason) => {
            let show_login = reason == DeniedReason::Unauthenticated;
            view! {
                <div class="gate gate--denied">
                    <h2>"Access denied"</h2>
                    <p>{reason.message()}</p>
                    <Show when=move || show_login>
                        <a class="btn btn--primary" href="/login">
                            "Sign in"
                        </a>
                    </Show>
                </div>
            }
            .into_any()
        }
        AccessState::Granted => children().into_any(),
    }
}
