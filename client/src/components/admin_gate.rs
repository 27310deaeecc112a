//! Gate for admin CRUD screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! CRUD requests authorize with the backend-issued admin session token, not
//! the identity provider session, so these screens check `AdminSession`
//! instead of going through `ProtectedRoute`.

use leptos::prelude::*;

use crate::components::toast_host::notify;
use crate::net::api::NetworkError;
use crate::state::admin::AdminSession;
use crate::state::toast::{ToastKind, ToastState};

#[component]
pub fn AdminGate(children: ChildrenFn) -> impl IntoView {
    let admin = expect_context::<RwSignal<AdminSession>>();

    view! {
        <Show
            when=move || admin.get().is_active()
            fallback=|| {
                view! {
                    <div class="gate gate--denied">
                        <h2>"Admin sign-in required"</h2>
                        <p>"Sign in with your admin credentials to manage records."</p>
                        <a class="btn btn--primary" href="/admin/login">
                            "Admin sign in"
                        </a>
                    </div>
                }
            }
        >
            <nav class="admin-nav">
                <a href="/admin/students">"Students"</a>
                <a href="/admin/mentors">"Mentors"</a>
                <a href="/admin/cohorts">"Cohorts"</a>
                <a href="/admin/assignments">"Assignments"</a>
                <AdminSignOut/>
            </nav>
            {children()}
        </Show>
    }
}

#[component]
fn AdminSignOut() -> impl IntoView {
    let admin = expect_context::<RwSignal<AdminSession>>();
    view! {
        <button class="btn btn--small admin-nav__logout" on:click=move |_| admin.update(AdminSession::clear)>
            "Leave admin"
        </button>
    }
}

/// Surface a CRUD failure; an expired admin token ends the admin session.
pub fn report_admin_error(admin: RwSignal<AdminSession>, toasts: RwSignal<ToastState>, action: &str, err: &NetworkError) {
    leptos::logging::warn!("admin {action} failed: {err}");
    if *err == NetworkError::Unauthorized {
        admin.update(AdminSession::clear);
        notify(toasts, ToastKind::Error, "Admin session expired. Sign in again.");
        return;
    }
    notify(toasts, ToastKind::Error, format!("Could not {action}: {err}"));
}
