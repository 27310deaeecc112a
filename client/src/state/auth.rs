//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the route guard, protected routes, and identity-aware components
//! to coordinate onboarding redirects and role-dependent rendering.
//!
//! DESIGN
//! ======
//! `AuthContext` is the only subscriber to the identity adapter. It owns an
//! `AuthState` value, mutated by the subscription callback, by profile
//! resolution, and by explicit sign-in/out. The Leptos layer supplies two
//! hooks: one mirrors each new state into a signal, the other starts the
//! one-shot profile fetch. Keeping the reducer free of Leptos types lets the
//! lifecycle be tested natively.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::net::api::ProfileLoadError;
use crate::net::identity::{AuthError, IdentityProvider, Subscription};
use crate::net::types::{Role, Session, UserProfile};

// =============================================================================
// STATE
// =============================================================================

/// Resolution of the signed-in user's profile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ProfileStatus {
    /// No session, nothing to resolve.
    #[default]
    Idle,
    /// Fetch in flight for the current session.
    Pending,
    /// Backend has no profile for this user.
    Missing,
    Failed(ProfileLoadError),
    Loaded(UserProfile),
}

/// Authentication state tracking the current session, profile, and loading status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub profile: ProfileStatus,
    /// True until the identity adapter has delivered its first session.
    pub loading: bool,
    /// Bumped whenever the profile is reset, re-requested, or installed
    /// directly. Fetch results carrying an older value are dropped.
    pub generation: u64,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { session: None, profile: ProfileStatus::Idle, loading: true, generation: 0 }
    }
}

/// Identifies one profile fetch so its result can be matched to the state
/// that requested it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileFetch {
    pub uid: String,
    pub generation: u64,
}

impl AuthState {
    pub fn profile(&self) -> Option<&UserProfile> {
        match &self.profile {
            ProfileStatus::Loaded(p) => Some(p),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.profile().map(|p| p.role)
    }

    /// Session present and profile missing, unreadable, or not yet completed.
    ///
    /// A pending fetch does not count: the guard waits for the answer rather
    /// than bouncing every page load through the completion form.
    pub fn needs_profile_completion(&self) -> bool {
        if self.session.is_none() {
            return false;
        }
        match &self.profile {
            ProfileStatus::Missing | ProfileStatus::Failed(_) => true,
            ProfileStatus::Loaded(p) => !p.completed,
            ProfileStatus::Idle | ProfileStatus::Pending => false,
        }
    }

    /// Apply a session delivered by the identity adapter.
    ///
    /// Returns `true` when the identity changed and a profile fetch is due.
    /// Token refreshes for the same uid keep the resolved profile.
    pub fn apply_session(&mut self, session: Option<Session>) -> bool {
        self.loading = false;
        let same_identity = match (&self.session, &session) {
            (Some(old), Some(new)) => old.uid == new.uid,
            (None, None) => true,
            _ => false,
        };
        self.session = session;
        if self.session.is_none() {
            if self.profile != ProfileStatus::Idle {
                self.generation += 1;
            }
            self.profile = ProfileStatus::Idle;
            return false;
        }
        if same_identity && self.profile != ProfileStatus::Idle {
            return false;
        }
        self.generation += 1;
        self.profile = ProfileStatus::Pending;
        true
    }

    /// Ticket for a fetch of the current session's profile.
    pub fn fetch_ticket(&self) -> Option<ProfileFetch> {
        self.session.as_ref().map(|s| ProfileFetch { uid: s.uid.clone(), generation: self.generation })
    }

    /// Mark the profile as re-requested and return the new ticket.
    pub fn begin_refresh(&mut self) -> Option<ProfileFetch> {
        self.session.as_ref()?;
        self.generation += 1;
        self.profile = ProfileStatus::Pending;
        self.fetch_ticket()
    }

    /// Apply a profile fetch result. Results for another uid or an older
    /// generation are stale and dropped; returns whether it applied.
    pub fn apply_profile(&mut self, fetch: &ProfileFetch, result: Result<Option<UserProfile>, ProfileLoadError>) -> bool {
        if fetch.generation != self.generation {
            return false;
        }
        if self.session.as_ref().map(|s| s.uid.as_str()) != Some(fetch.uid.as_str()) {
            return false;
        }
        self.profile = match result {
            Ok(Some(profile)) => ProfileStatus::Loaded(profile),
            Ok(None) => ProfileStatus::Missing,
            Err(e) => ProfileStatus::Failed(e),
        };
        true
    }

    /// Install a profile the backend accepted, superseding any fetch still
    /// in flight. Ignored when it belongs to another user.
    pub fn install_profile(&mut self, profile: UserProfile) -> bool {
        if self.session.as_ref().map(|s| s.uid.as_str()) != Some(profile.uid.as_str()) {
            return false;
        }
        self.generation += 1;
        self.profile = ProfileStatus::Loaded(profile);
        true
    }
}

// =============================================================================
// CONTEXT
// =============================================================================

/// Called with every new state snapshot.
pub type StateListener = Arc<dyn Fn(&AuthState) + Send + Sync>;

/// Called once per new identity to start the profile fetch. The fetch
/// reports back through [`AuthContext::resolve_profile`] with its ticket.
pub type ProfileRequest = Arc<dyn Fn(AuthContext, Session, ProfileFetch) + Send + Sync>;

struct ContextInner {
    provider: IdentityProvider,
    state: Mutex<AuthState>,
    subscription: Mutex<Option<Subscription>>,
    on_change: StateListener,
    request_profile: ProfileRequest,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Application-scoped auth state with an explicit mount/teardown lifecycle.
#[derive(Clone)]
pub struct AuthContext {
    inner: Arc<ContextInner>,
}

impl AuthContext {
    pub fn new(provider: IdentityProvider, on_change: StateListener, request_profile: ProfileRequest) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                provider,
                state: Mutex::new(AuthState::default()),
                subscription: Mutex::new(None),
                on_change,
                request_profile,
            }),
        }
    }

    /// Subscribe to the identity adapter. Only the first call has an effect.
    pub fn mount(&self) {
        if self.is_mounted() {
            leptos::logging::warn!("auth context already mounted; ignoring");
            return;
        }
        // The first delivery happens inside `subscribe`, so the slot lock
        // must not be held here.
        let weak = Arc::downgrade(&self.inner);
        let subscription = self.inner.provider.subscribe(Arc::new(move |session| {
            if let Some(inner) = weak.upgrade() {
                AuthContext { inner }.deliver_session(session);
            }
        }));
        *lock(&self.inner.subscription) = Some(subscription);
    }

    /// Drop the adapter subscription.
    pub fn teardown(&self) {
        let subscription = lock(&self.inner.subscription).take();
        drop(subscription);
    }

    pub fn is_mounted(&self) -> bool {
        lock(&self.inner.subscription).is_some()
    }

    pub fn snapshot(&self) -> AuthState {
        lock(&self.inner.state).clone()
    }

    pub fn is_configured(&self) -> bool {
        self.inner.provider.is_configured()
    }

    fn deliver_session(&self, session: Option<Session>) {
        let (snapshot, fetch_for) = {
            let mut state = lock(&self.inner.state);
            let fetch_due = state.apply_session(session);
            let fetch_for = if fetch_due { state.session.clone().zip(state.fetch_ticket()) } else { None };
            (state.clone(), fetch_for)
        };
        (self.inner.on_change)(&snapshot);
        if let Some((session, fetch)) = fetch_for {
            (self.inner.request_profile)(self.clone(), session, fetch);
        }
    }

    /// Record the outcome of the profile fetch identified by `fetch`.
    pub fn resolve_profile(&self, fetch: &ProfileFetch, result: Result<Option<UserProfile>, ProfileLoadError>) {
        if let Err(e) = &result {
            leptos::logging::warn!("profile load failed uid={}: {e}", fetch.uid);
        }
        let snapshot = {
            let mut state = lock(&self.inner.state);
            if !state.apply_profile(fetch, result) {
                leptos::logging::log!("dropping stale profile result uid={} gen={}", fetch.uid, fetch.generation);
                return;
            }
            state.clone()
        };
        (self.inner.on_change)(&snapshot);
    }

    /// Install a profile the backend just accepted.
    pub fn profile_saved(&self, profile: UserProfile) {
        let snapshot = {
            let mut state = lock(&self.inner.state);
            if !state.install_profile(profile) {
                return;
            }
            state.clone()
        };
        (self.inner.on_change)(&snapshot);
    }

    /// Re-issue the profile fetch for the current session.
    pub fn refresh_profile(&self) {
        let (snapshot, session, fetch) = {
            let mut state = lock(&self.inner.state);
            let Some(fetch) = state.begin_refresh() else {
                return;
            };
            let Some(session) = state.session.clone() else {
                return;
            };
            (state.clone(), session, fetch)
        };
        (self.inner.on_change)(&snapshot);
        (self.inner.request_profile)(self.clone(), session, fetch);
    }

    // -------------------------------------------------------------------------
    // Identity operations. State changes arrive through the subscription.
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Propagates the adapter's `AuthError`.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.inner
            .provider
            .sign_in(email, password)
            .await
            .inspect_err(|e| log_auth_failure("sign-in", e))
    }

    /// # Errors
    ///
    /// Propagates the adapter's `AuthError`.
    pub async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<Session, AuthError> {
        self.inner
            .provider
            .sign_up(email, password, display_name)
            .await
            .inspect_err(|e| log_auth_failure("sign-up", e))
    }

    /// # Errors
    ///
    /// Propagates the adapter's `AuthError`.
    pub async fn sign_in_with_federated_provider(&self) -> Result<(), AuthError> {
        self.inner
            .provider
            .sign_in_with_federated_provider()
            .await
            .inspect_err(|e| log_auth_failure("federated sign-in", e))
    }

    /// # Errors
    ///
    /// Propagates the adapter's `AuthError`.
    pub async fn complete_federated_sign_in(&self, request_uri: &str) -> Result<Session, AuthError> {
        self.inner
            .provider
            .complete_federated_sign_in(request_uri)
            .await
            .inspect_err(|e| log_auth_failure("federated callback", e))
    }

    /// # Errors
    ///
    /// Propagates the adapter's `AuthError`.
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.inner
            .provider
            .sign_out()
            .inspect_err(|e| log_auth_failure("sign-out", e))
    }

    /// # Errors
    ///
    /// Propagates the adapter's `AuthError`.
    pub async fn get_token(&self) -> Result<Option<String>, AuthError> {
        self.inner.provider.get_token().await
    }
}

fn log_auth_failure(operation: &str, err: &AuthError) {
    leptos::logging::warn!("{operation} failed kind={} detail={err}", err.kind());
}
