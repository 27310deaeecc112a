//! Profile-completion route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Signed-in users whose profile is missing or incomplete may only visit
//! public pages and the onboarding flow; everything else sends them to the
//! completion form. Anonymous visitors are not redirected here; role and
//! sign-in gating is `ProtectedRoute`'s job.
//!
//! DESIGN
//! ======
//! `evaluate` is a pure function of (path, auth state). `RouteGuard` adds the
//! memory needed for idempotence: it will not issue the same redirect twice
//! for one path while navigation is still landing.

#[cfg(test)]
#[path = "route_guard_test.rs"]
mod route_guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

pub const COMPLETION_PATH: &str = "/complete-profile";

/// Pages anyone may view regardless of session or profile.
pub const PUBLIC_PATHS: &[&str] = &["/", "/about", "/programs", "/faq", "/contact", "/privacy", "/terms"];

/// Pages a signed-in user with an incomplete profile may still visit.
pub const ONBOARDING_PATHS: &[&str] = &[
    COMPLETION_PATH,
    "/login",
    "/signup",
    "/register/student",
    "/register/mentor",
    "/auth/callback",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Public,
    AllowedIncomplete,
    RedirectToCompletion,
    Normal,
}

impl GuardState {
    /// Navigation target implied by this state, if any.
    pub fn redirect_target(self) -> Option<&'static str> {
        match self {
            Self::RedirectToCompletion => Some(COMPLETION_PATH),
            _ => None,
        }
    }
}

/// Exact match, or the same path followed by a query string.
pub fn path_matches(location: &str, allowed: &str) -> bool {
    match location.strip_prefix(allowed) {
        Some(rest) => rest.is_empty() || rest.starts_with('?'),
        None => false,
    }
}

pub fn in_allow_list(location: &str, list: &[&str]) -> bool {
    list.iter().any(|allowed| path_matches(location, allowed))
}

/// Join a pathname and search string into the form the allow-lists match on.
pub fn location_string(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() {
        pathname.to_owned()
    } else {
        format!("{pathname}?{search}")
    }
}

/// Classify `location` for the given auth state.
pub fn evaluate(location: &str, auth: &AuthState) -> GuardState {
    if auth.loading {
        return GuardState::Loading;
    }
    if in_allow_list(location, PUBLIC_PATHS) {
        return GuardState::Public;
    }
    if auth.session.is_some() && auth.needs_profile_completion() {
        if in_allow_list(location, ONBOARDING_PATHS) {
            return GuardState::AllowedIncomplete;
        }
        return GuardState::RedirectToCompletion;
    }
    GuardState::Normal
}

/// Stateful wrapper that suppresses duplicate redirects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteGuard {
    /// Location we last redirected away from.
    redirected_from: Option<String>,
}

impl RouteGuard {
    /// Evaluate and return the navigation to perform, if any.
    pub fn check(&mut self, location: &str, auth: &AuthState) -> (GuardState, Option<&'static str>) {
        let state = evaluate(location, auth);
        let Some(target) = state.redirect_target() else {
            self.redirected_from = None;
            return (state, None);
        };
        if self.redirected_from.as_deref() == Some(location) {
            return (state, None);
        }
        self.redirected_from = Some(location.to_owned());
        (state, Some(target))
    }
}

/// Re-evaluate the guard on every navigation and auth change.
pub fn install_route_guard<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let location = leptos_router::hooks::use_location();
    let guard = StoredValue::new(RouteGuard::default());
    Effect::new(move || {
        let current = location_string(&location.pathname.get(), &location.search.get());
        let state = auth.get();
        let mut decision = (GuardState::Loading, None);
        guard.update_value(|g| decision = g.check(&current, &state));
        if let (_, Some(target)) = decision {
            leptos::logging::log!("route guard: {current} -> {target} (profile incomplete)");
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
