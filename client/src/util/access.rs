//! Role and sign-in gating for protected subtrees.
//!
//! `evaluate_access` is the whole decision; `ProtectedRoute` only renders
//! the variant it returns. Nothing here navigates.

#[cfg(test)]
#[path = "access_test.rs"]
mod access_test;

use crate::net::types::Role;
use crate::state::auth::{AuthState, ProfileStatus};

/// What a protected subtree demands of the viewer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessRequirement {
    pub require_auth: bool,
    /// Empty means any role. Non-empty implies `require_auth`.
    pub roles: Vec<Role>,
}

impl AccessRequirement {
    pub fn signed_in() -> Self {
        Self { require_auth: true, roles: Vec::new() }
    }

    pub fn roles(roles: &[Role]) -> Self {
        Self { require_auth: true, roles: roles.to_vec() }
    }

    fn needs_session(&self) -> bool {
        self.require_auth || !self.roles.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeniedReason {
    Unauthenticated,
    /// `actual` is `None` when the backend has no readable profile.
    RoleMismatch { required: Vec<Role>, actual: Option<Role> },
}

impl DeniedReason {
    pub fn message(&self) -> String {
        match self {
            Self::Unauthenticated => "You need to sign in to view this page.".to_owned(),
            Self::RoleMismatch { required, actual } => {
                let required = required.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(", ");
                let actual = actual.map_or("none", Role::as_str);
                format!("This page requires role: {required}. Your role: {actual}.")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessState {
    Loading,
    Denied(DeniedReason),
    LoadingProfile,
    Granted,
}

pub fn evaluate_access(state: &AuthState, requirement: &AccessRequirement) -> AccessState {
    if state.loading {
        return AccessState::Loading;
    }
    if !requirement.needs_session() {
        return AccessState::Granted;
    }
    if state.session.is_none() {
        return AccessState::Denied(DeniedReason::Unauthenticated);
    }
    // Signed-in content waits for the profile even without a role set.
    let actual = match &state.profile {
        ProfileStatus::Idle | ProfileStatus::Pending => return AccessState::LoadingProfile,
        ProfileStatus::Loaded(profile) => Some(profile.role),
        ProfileStatus::Missing | ProfileStatus::Failed(_) => None,
    };
    if requirement.roles.is_empty() {
        return AccessState::Granted;
    }
    match actual {
        Some(role) if requirement.roles.contains(&role) => AccessState::Granted,
        actual => AccessState::Denied(DeniedReason::RoleMismatch { required: requirement.roles.clone(), actual }),
    }
}

/// Landing page for a signed-in user of `role`.
pub fn dashboard_path_for(role: Role) -> &'static str {
    match role {
        Role::Admin => "/dashboard/admin",
        Role::Mentor => "/dashboard/mentor",
        Role::Student => "/dashboard/student",
    }
}
