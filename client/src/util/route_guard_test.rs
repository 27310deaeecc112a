use super::*;
use crate::net::api::{NetworkError, ProfileLoadError};
use crate::net::types::{Role, Session, UserProfile};
use crate::state::auth::ProfileStatus;

fn session() -> Session {
    Session {
        uid: "u1".to_owned(),
        email: "u1@example.com".to_owned(),
        display_name: None,
        id_token: "tok".to_owned(),
        refresh_token: "ref".to_owned(),
        expires_at_ms: u64::MAX,
    }
}

fn profile(completed: bool) -> UserProfile {
    UserProfile {
        uid: "u1".to_owned(),
        role: Role::Student,
        completed,
        display_name: "Ada".to_owned(),
        phone: None,
        bio: None,
    }
}

fn anonymous() -> AuthState {
    AuthState { session: None, profile: ProfileStatus::Idle, loading: false, generation: 0 }
}

fn signed_in(profile: ProfileStatus) -> AuthState {
    AuthState { session: Some(session()), profile, loading: false, generation: 0 }
}

fn incomplete() -> AuthState {
    signed_in(ProfileStatus::Loaded(profile(false)))
}

// =============================================================
// Matching
// =============================================================

#[test]
fn path_matches_exact_or_with_query() {
    assert!(path_matches("/login", "/login"));
    assert!(path_matches("/login?next=/dashboard", "/login"));
    assert!(!path_matches("/login-help", "/login"));
    assert!(!path_matches("/login/extra", "/login"));
}

#[test]
fn root_does_not_prefix_match_everything() {
    assert!(in_allow_list("/", PUBLIC_PATHS));
    assert!(in_allow_list("/?ref=ad", PUBLIC_PATHS));
    assert!(!in_allow_list("/dashboard", PUBLIC_PATHS));
}

#[test]
fn location_string_joins_search() {
    assert_eq!(location_string("/faq", ""), "/faq");
    assert_eq!(location_string("/faq", "?q=1"), "/faq?q=1");
    assert_eq!(location_string("/faq", "q=1"), "/faq?q=1");
}

// =============================================================
// evaluate
// =============================================================

#[test]
fn loading_takes_precedence_everywhere() {
    let state = AuthState::default();
    for path in ["/", "/dashboard", COMPLETION_PATH] {
        assert_eq!(evaluate(path, &state), GuardState::Loading);
    }
}

#[test]
fn public_paths_are_public_for_everyone() {
    for path in PUBLIC_PATHS {
        assert_eq!(evaluate(path, &anonymous()), GuardState::Public);
        assert_eq!(evaluate(path, &incomplete()), GuardState::Public);
    }
}

#[test]
fn incomplete_profile_is_redirected_off_private_pages() {
    assert_eq!(evaluate("/dashboard", &incomplete()), GuardState::RedirectToCompletion);
    assert_eq!(evaluate("/admin/students", &incomplete()), GuardState::RedirectToCompletion);
}

#[test]
fn incomplete_profile_may_use_onboarding_pages() {
    for path in ONBOARDING_PATHS {
        assert_eq!(evaluate(path, &incomplete()), GuardState::AllowedIncomplete);
    }
    assert_eq!(evaluate("/auth/callback?code=x", &incomplete()), GuardState::AllowedIncomplete);
}

#[test]
fn missing_and_failed_profiles_need_completion() {
    assert_eq!(evaluate("/dashboard", &signed_in(ProfileStatus::Missing)), GuardState::RedirectToCompletion);
    let failed = ProfileStatus::Failed(ProfileLoadError::Unavailable(NetworkError::Status(500)));
    assert_eq!(evaluate("/dashboard", &signed_in(failed)), GuardState::RedirectToCompletion);
}

#[test]
fn pending_profile_is_not_redirected() {
    assert_eq!(evaluate("/dashboard", &signed_in(ProfileStatus::Pending)), GuardState::Normal);
}

#[test]
fn complete_profile_and_anonymous_are_normal() {
    let complete = signed_in(ProfileStatus::Loaded(profile(true)));
    assert_eq!(evaluate("/dashboard", &complete), GuardState::Normal);
    assert_eq!(evaluate(COMPLETION_PATH, &complete), GuardState::Normal);
    assert_eq!(evaluate("/dashboard", &anonymous()), GuardState::Normal);
}

#[test]
fn only_redirect_state_has_a_target() {
    assert_eq!(GuardState::RedirectToCompletion.redirect_target(), Some(COMPLETION_PATH));
    assert_eq!(GuardState::Normal.redirect_target(), None);
    assert_eq!(GuardState::Loading.redirect_target(), None);
}

// =============================================================
// RouteGuard
// =============================================================

#[test]
fn guard_redirects_once_per_location() {
    let mut guard = RouteGuard::default();
    let state = incomplete();
    assert_eq!(guard.check("/dashboard", &state), (GuardState::RedirectToCompletion, Some(COMPLETION_PATH)));
    assert_eq!(guard.check("/dashboard", &state), (GuardState::RedirectToCompletion, None));
}

#[test]
fn guard_rearms_after_leaving_the_redirect_state() {
    let mut guard = RouteGuard::default();
    let state = incomplete();
    guard.check("/dashboard", &state);
    assert_eq!(guard.check(COMPLETION_PATH, &state).1, None);
    assert_eq!(guard.check("/dashboard", &state).1, Some(COMPLETION_PATH));
}

#[test]
fn guard_redirects_again_for_a_different_location() {
    let mut guard = RouteGuard::default();
    let state = incomplete();
    guard.check("/dashboard", &state);
    assert_eq!(guard.check("/admin/cohorts", &state).1, Some(COMPLETION_PATH));
}

#[test]
fn guard_stops_redirecting_once_profile_completes() {
    let mut guard = RouteGuard::default();
    guard.check("/dashboard", &incomplete());
    let complete = signed_in(ProfileStatus::Loaded(profile(true)));
    assert_eq!(guard.check("/dashboard", &complete), (GuardState::Normal, None));
}
