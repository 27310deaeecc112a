use super::*;
use crate::net::types::Session;
use crate::state::auth::ProfileStatus;

fn state_with(profile: ProfileStatus) -> AuthState {
    AuthState {
        session: Some(Session {
            uid: "u1".to_owned(),
            email: "u1@example.com".to_owned(),
            display_name: None,
            id_token: "tok".to_owned(),
            refresh_token: "ref".to_owned(),
            expires_at_ms: u64::MAX,
        }),
        profile,
        loading: false,
        generation: 0,
    }
}

fn profile(role: Role, completed: bool, name: &str) -> UserProfile {
    UserProfile {
        uid: "u1".to_owned(),
        role,
        completed,
        display_name: name.to_owned(),
        phone: None,
        bio: None,
    }
}

#[test]
fn dispatch_waits_for_loading_and_profile() {
    assert_eq!(dispatch_target(&AuthState::default()), None);
    assert_eq!(dispatch_target(&state_with(ProfileStatus::Pending)), None);
    assert_eq!(dispatch_target(&state_with(ProfileStatus::Missing)), None);
}

#[test]
fn dispatch_follows_role() {
    let state = state_with(ProfileStatus::Loaded(profile(Role::Mentor, true, "M")));
    assert_eq!(dispatch_target(&state), Some("/dashboard/mentor"));
    let state = state_with(ProfileStatus::Loaded(profile(Role::Admin, true, "A")));
    assert_eq!(dispatch_target(&state), Some("/dashboard/admin"));
}

#[test]
fn dispatch_leaves_incomplete_profiles_to_the_guard() {
    let state = state_with(ProfileStatus::Loaded(profile(Role::Student, false, "S")));
    assert_eq!(dispatch_target(&state), None);
}

#[test]
fn greeting_uses_display_name_when_present() {
    assert_eq!(greeting(Some(&profile(Role::Student, true, " Ada "))), "Welcome, Ada");
    assert_eq!(greeting(Some(&profile(Role::Student, true, "  "))), "Welcome");
    assert_eq!(greeting(None), "Welcome");
}
