//! Identity provider adapter: sign-in flows, token access, auth-state stream.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the only module that talks to the third-party identity service.
//! `AuthContext` is its single subscriber; pages go through the context and
//! never reach the adapter directly.
//!
//! DESIGN
//! ======
//! Network access sits behind `AuthTransport` so the adapter's bookkeeping
//! (configuration short-circuit, session persistence, listener fan-out) can
//! be exercised without a browser. Listeners are invoked after the registry
//! lock is released, so a listener may read the adapter re-entrantly.
//!
//! ERROR HANDLING
//! ==============
//! With no configuration every operation returns `AuthError::NotConfigured`
//! before touching the transport. Nothing retries; callers resubmit.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use async_trait::async_trait;

use crate::config::{ClientConfig, IdentityConfig};
use crate::net::identity_rest::RestTransport;
use crate::net::types::Session;
use crate::util::{browser, clock, storage};

pub const FEDERATED_CALLBACK_PATH: &str = "/auth/callback";

// =============================================================================
// ERROR
// =============================================================================

/// Failures surfaced by identity operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account already exists")]
    AccountExists,

    #[error("credential too weak")]
    WeakCredential,

    #[error("identity provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("identity provider not configured")]
    NotConfigured,
}

impl AuthError {
    /// Map a provider error message (e.g. `"WEAK_PASSWORD : ..."`) to a kind.
    pub fn from_provider_code(message: &str) -> Self {
        let code = message
            .split([' ', ':'])
            .next()
            .unwrap_or_default()
            .trim();
        match code {
            "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "INVALID_EMAIL"
            | "USER_DISABLED" | "USER_NOT_FOUND" | "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN"
            | "INVALID_IDP_RESPONSE" => Self::InvalidCredentials,
            "EMAIL_EXISTS" | "FEDERATED_USER_ID_ALREADY_LINKED" => Self::AccountExists,
            "WEAK_PASSWORD" => Self::WeakCredential,
            _ => Self::ProviderUnavailable(message.to_owned()),
        }
    }

    /// Stable kebab-case identifier for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid-credentials",
            Self::AccountExists => "account-exists",
            Self::WeakCredential => "weak-credential",
            Self::ProviderUnavailable(_) => "provider-unavailable",
            Self::NotConfigured => "not-configured",
        }
    }

    /// Text shown in the notification toast.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "That email and password combination was not recognized.",
            Self::AccountExists => "An account with this email already exists. Try signing in instead.",
            Self::WeakCredential => "Please choose a stronger password (at least 6 characters).",
            Self::ProviderUnavailable(_) => "Sign-in is temporarily unavailable. Please try again shortly.",
            Self::NotConfigured => "Sign-in is not available on this deployment.",
        }
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// Provider authorization redirect returned by the first federated step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FederatedStart {
    pub auth_uri: String,
    /// Provider-side session id that must accompany the callback exchange.
    pub session_id: String,
}

/// Network seam to the identity service. Futures are single-threaded.
#[async_trait(?Send)]
pub trait AuthTransport: Send + Sync {
    async fn sign_in(&self, config: &IdentityConfig, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_up(
        &self,
        config: &IdentityConfig,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, AuthError>;

    async fn create_auth_uri(&self, config: &IdentityConfig, continue_uri: &str) -> Result<FederatedStart, AuthError>;

    async fn sign_in_with_idp(
        &self,
        config: &IdentityConfig,
        request_uri: &str,
        session_id: &str,
    ) -> Result<Session, AuthError>;

    async fn refresh(&self, config: &IdentityConfig, session: &Session) -> Result<Session, AuthError>;
}

// =============================================================================
// SUBSCRIPTIONS
// =============================================================================

/// Callback receiving the current session on subscribe and on every change.
pub type SessionListener = Arc<dyn Fn(Option<Session>) + Send + Sync>;

#[derive(Default)]
struct Registry {
    session: Option<Session>,
    listeners: Vec<(u64, SessionListener)>,
    next_listener_id: u64,
    pending_federated: Option<String>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle returned by [`IdentityProvider::subscribe`]. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

// =============================================================================
// ADAPTER
// =============================================================================

/// Adapter over the identity service. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct IdentityProvider {
    config: Option<IdentityConfig>,
    transport: Arc<dyn AuthTransport>,
    registry: Arc<Mutex<Registry>>,
}

impl IdentityProvider {
    /// Build the production adapter. Misconfiguration is reported once here.
    pub fn from_client_config(config: &ClientConfig) -> Self {
        if config.identity.is_none() {
            leptos::logging::warn!("identity provider not configured; auth operations are disabled");
        }
        Self::new(config.identity.clone(), Arc::new(RestTransport))
    }

    /// Build an adapter over an explicit transport, restoring any persisted session.
    pub fn new(config: Option<IdentityConfig>, transport: Arc<dyn AuthTransport>) -> Self {
        let session = if config.is_some() {
            storage::load_json::<Session>(storage::IDENTITY_SESSION_KEY)
        } else {
            None
        };
        let registry = Registry { session, ..Registry::default() };
        Self { config, transport, registry: Arc::new(Mutex::new(registry)) }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    fn config(&self) -> Result<&IdentityConfig, AuthError> {
        self.config.as_ref().ok_or(AuthError::NotConfigured)
    }

    pub fn current_session(&self) -> Option<Session> {
        lock(&self.registry).session.clone()
    }

    /// Email + password sign-in.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` without I/O when unconfigured, otherwise the
    /// provider's classification of the failure.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let config = self.config()?;
        let session = self.transport.sign_in(config, email, password).await?;
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` without I/O when unconfigured, `AccountExists`
    /// or `WeakCredential` when the provider rejects the request.
    pub async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<Session, AuthError> {
        let config = self.config()?;
        let session = self
            .transport
            .sign_up(config, email, password, display_name)
            .await?;
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    /// Start the federated redirect flow and navigate the browser away.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` without I/O when unconfigured, or
    /// `ProviderUnavailable` when the authorization URI cannot be obtained.
    pub async fn sign_in_with_federated_provider(&self) -> Result<(), AuthError> {
        let config = self.config()?;
        let continue_uri = format!("{}{FEDERATED_CALLBACK_PATH}", browser::origin());
        let start = self.transport.create_auth_uri(config, &continue_uri).await?;
        lock(&self.registry).pending_federated = Some(start.session_id.clone());
        storage::save_string(storage::FEDERATED_PENDING_KEY, &start.session_id);
        browser::redirect_external(&start.auth_uri);
        Ok(())
    }

    /// Finish the federated flow from the callback URL.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` when no federated sign-in is pending or
    /// the provider rejects the callback.
    pub async fn complete_federated_sign_in(&self, request_uri: &str) -> Result<Session, AuthError> {
        let config = self.config()?;
        let pending = lock(&self.registry)
            .pending_federated
            .take()
            .or_else(|| storage::load_string(storage::FEDERATED_PENDING_KEY));
        storage::remove(storage::FEDERATED_PENDING_KEY);
        let Some(session_id) = pending else {
            return Err(AuthError::InvalidCredentials);
        };
        let session = self
            .transport
            .sign_in_with_idp(config, request_uri, &session_id)
            .await?;
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    /// Clear the local session and notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` when unconfigured.
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.config()?;
        self.set_session(None);
        Ok(())
    }

    /// Current bearer token, refreshed if expired. `Ok(None)` when signed out.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` when unconfigured or the refresh failure.
    pub async fn get_token(&self) -> Result<Option<String>, AuthError> {
        self.get_token_at(clock::now_ms()).await
    }

    /// [`Self::get_token`] with an explicit clock.
    ///
    /// # Errors
    ///
    /// See [`Self::get_token`]. A rejected refresh also signs the user out.
    pub async fn get_token_at(&self, now_ms: u64) -> Result<Option<String>, AuthError> {
        let config = self.config()?;
        let Some(session) = self.current_session() else {
            return Ok(None);
        };
        if !session.is_expired(now_ms) {
            return Ok(Some(session.id_token));
        }
        match self.transport.refresh(config, &session).await {
            Ok(refreshed) => {
                let token = refreshed.id_token.clone();
                self.set_session(Some(refreshed));
                Ok(Some(token))
            }
            Err(AuthError::InvalidCredentials) => {
                leptos::logging::warn!("token refresh rejected; signing out uid={}", session.uid);
                self.set_session(None);
                Err(AuthError::InvalidCredentials)
            }
            Err(e) => Err(e),
        }
    }

    /// Register a listener. It is called immediately with the current session
    /// and again after every change until the returned handle is dropped.
    pub fn subscribe(&self, listener: SessionListener) -> Subscription {
        let (id, current) = {
            let mut registry = lock(&self.registry);
            let id = registry.next_listener_id;
            registry.next_listener_id += 1;
            registry.listeners.push((id, Arc::clone(&listener)));
            (id, registry.session.clone())
        };
        listener(current);
        Subscription { id, registry: Arc::downgrade(&self.registry) }
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        lock(&self.registry).listeners.len()
    }

    fn set_session(&self, session: Option<Session>) {
        match &session {
            Some(s) => storage::save_json(storage::IDENTITY_SESSION_KEY, s),
            None => storage::remove(storage::IDENTITY_SESSION_KEY),
        }
        let listeners: Vec<SessionListener> = {
            let mut registry = lock(&self.registry);
            registry.session.clone_from(&session);
            registry
                .listeners
                .iter()
                .map(|(_, l)| Arc::clone(l))
                .collect()
        };
        for listener in listeners {
            listener(session.clone());
        }
    }
}
