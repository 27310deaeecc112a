//! Role dashboards and the `/dashboard` dispatcher.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/dashboard` is where sign-in lands. Once the profile resolves it
//! forwards to the dashboard for the user's role; each role dashboard is
//! wrapped in `ProtectedRoute` with that role.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::protected_route::ProtectedRoute;
use crate::net::types::{Role, UserProfile};
use crate::state::admin::AdminSession;
use crate::state::auth::AuthState;
use crate::util::access::dashboard_path_for;

/// Where `/dashboard` should forward, once there is enough state to decide.
pub(crate) fn dispatch_target(state: &AuthState) -> Option<&'static str> {
    if state.loading {
        return None;
    }
    let profile = state.profile()?;
    profile.completed.then(|| dashboard_path_for(profile.role))
}

pub(crate) fn greeting(profile: Option<&UserProfile>) -> String {
    match profile.map(|p| p.display_name.trim()).filter(|n| !n.is_empty()) {
        Some(name) => format!("Welcome, {name}"),
        None => "Welcome".to_owned(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        if let Some(target) = dispatch_target(&auth.get()) {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        <ProtectedRoute require_auth=true>
            <div class="dashboard-page">
                <p>"Opening your dashboard..."</p>
            </div>
        </ProtectedRoute>
    }
}

/// Greeting and profile summary shared by the role dashboards.
#[component]
fn ProfileSummary() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let profile = move || auth.get().profile().cloned();

    view! {
        <header class="dashboard-page__header">
            <h1>{move || greeting(profile().as_ref())}</h1>
            <a class="btn" href="/complete-profile">
                "Edit profile"
            </a>
        </header>
        <dl class="dashboard-page__profile">
            <dt>"Role"</dt>
            <dd>{move || profile().map(|p| p.role.to_string()).unwrap_or_default()}</dd>
            <dt>"Phone"</dt>
            <dd>{move || profile().and_then(|p| p.phone).unwrap_or_else(|| "—".to_owned())}</dd>
            <dt>"Bio"</dt>
            <dd>{move || profile().and_then(|p| p.bio).unwrap_or_else(|| "—".to_owned())}</dd>
        </dl>
    }
}

#[component]
pub fn StudentDashboardPage() -> impl IntoView {
    view! {
        <ProtectedRoute roles=vec![Role::Student]>
            <div class="dashboard-page">
                <ProfileSummary/>
                <section class="dashboard-page__panel">
                    <h2>"Your program"</h2>
                    <p>"Your mentor and cohort assignments appear here once an administrator has placed you."</p>
                    <a href="/programs">"Browse programs"</a>
                </section>
            </div>
        </ProtectedRoute>
    }
}

#[component]
pub fn MentorDashboardPage() -> impl IntoView {
    view! {
        <ProtectedRoute roles=vec![Role::Mentor]>
            <div class="dashboard-page">
                <ProfileSummary/>
                <section class="dashboard-page__panel">
                    <h2>"Your mentees"</h2>
                    <p>"Mentee matches and cohort assignments are managed by program administrators."</p>
                    <a href="/faq">"Mentor FAQ"</a>
                </section>
            </div>
        </ProtectedRoute>
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    view! {
        <ProtectedRoute roles=vec![Role::Admin]>
            <AdminOverview/>
        </ProtectedRoute>
    }
}

#[component]
fn AdminOverview() -> impl IntoView {
    let admin = expect_context::<RwSignal<AdminSession>>();

    view! {
        <div class="dashboard-page">
            <ProfileSummary/>
            <section class="dashboard-page__panel">
                <h2>"Program administration"</h2>
                <Show
                    when=move || admin.get().is_active()
                    fallback=|| {
                        view! {
                            <p>"Record management needs an admin session. "</p>
                            <a class="btn btn--primary" href="/admin/login">
                                "Admin sign in"
                            </a>
                        }
                    }
                >
                    <ul class="dashboard-page__links">
                        <li><a href="/admin/students">"Students"</a></li>
                        <li><a href="/admin/mentors">"Mentors"</a></li>
                        <li><a href="/admin/cohorts">"Cohorts"</a></li>
                        <li><a href="/admin/assignments">"Assignments"</a></li>
                    </ul>
                </Show>
            </section>
        </div>
    }
}
