use std::sync::atomic::{AtomicUsize, Ordering};

use futures::executor::block_on;

use super::*;

// =============================================================
// Fake transport
// =============================================================

#[derive(Default)]
struct FakeTransport {
    calls: AtomicUsize,
    fail_with: Option<AuthError>,
    refresh_fails_with: Option<AuthError>,
}

impl FakeTransport {
    fn failing(err: AuthError) -> Self {
        Self { fail_with: Some(err), ..Self::default() }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) -> Result<(), AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn session_for(email: &str, expires_at_ms: u64) -> Session {
    Session {
        uid: format!("uid-{email}"),
        email: email.to_owned(),
        display_name: None,
        id_token: format!("token-{email}"),
        refresh_token: "refresh".to_owned(),
        expires_at_ms,
    }
}

#[async_trait(?Send)]
impl AuthTransport for FakeTransport {
    async fn sign_in(&self, _config: &IdentityConfig, email: &str, _password: &str) -> Result<Session, AuthError> {
        self.record()?;
        Ok(session_for(email, 1_000))
    }

    async fn sign_up(
        &self,
        _config: &IdentityConfig,
        email: &str,
        _password: &str,
        display_name: &str,
    ) -> Result<Session, AuthError> {
        self.record()?;
        let mut s = session_for(email, 1_000);
        s.display_name = Some(display_name.to_owned());
        Ok(s)
    }

    async fn create_auth_uri(&self, _config: &IdentityConfig, continue_uri: &str) -> Result<FederatedStart, AuthError> {
        self.record()?;
        Ok(FederatedStart {
            auth_uri: format!("https://idp.example.test/authorize?continue={continue_uri}"),
            session_id: "pending-1".to_owned(),
        })
    }

    async fn sign_in_with_idp(
        &self,
        _config: &IdentityConfig,
        _request_uri: &str,
        session_id: &str,
    ) -> Result<Session, AuthError> {
        self.record()?;
        assert_eq!(session_id, "pending-1");
        Ok(session_for("fed@example.com", 1_000))
    }

    async fn refresh(&self, _config: &IdentityConfig, session: &Session) -> Result<Session, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.refresh_fails_with {
            return Err(err.clone());
        }
        Ok(Session { id_token: "refreshed".to_owned(), expires_at_ms: 99_000, ..session.clone() })
    }
}

fn config() -> IdentityConfig {
    IdentityConfig {
        api_key: "k".to_owned(),
        identity_base_url: "https://id.example.test".to_owned(),
        token_base_url: "https://token.example.test".to_owned(),
        federated_provider: "google.com".to_owned(),
    }
}

fn configured(transport: &Arc<FakeTransport>) -> IdentityProvider {
    IdentityProvider::new(Some(config()), Arc::clone(transport) as Arc<dyn AuthTransport>)
}

fn recorder() -> (SessionListener, Arc<Mutex<Vec<Option<String>>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let listener: SessionListener = Arc::new(move |s: Option<Session>| {
        sink.lock().unwrap().push(s.map(|s| s.email));
    });
    (listener, seen)
}

// =============================================================
// Not configured
// =============================================================

#[test]
fn unconfigured_adapter_fails_every_operation_without_network() {
    let transport = Arc::new(FakeTransport::default());
    let provider = IdentityProvider::new(None, Arc::clone(&transport) as Arc<dyn AuthTransport>);

    assert!(!provider.is_configured());
    assert_eq!(block_on(provider.sign_in("a@b.c", "secret")), Err(AuthError::NotConfigured));
    assert_eq!(block_on(provider.sign_up("a@b.c", "secret", "A")), Err(AuthError::NotConfigured));
    assert_eq!(block_on(provider.sign_in_with_federated_provider()), Err(AuthError::NotConfigured));
    assert_eq!(block_on(provider.complete_federated_sign_in("https://x/cb")), Err(AuthError::NotConfigured));
    assert_eq!(provider.sign_out(), Err(AuthError::NotConfigured));
    assert_eq!(block_on(provider.get_token()), Err(AuthError::NotConfigured));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn unconfigured_adapter_still_delivers_empty_session_to_subscribers() {
    let provider = IdentityProvider::new(None, Arc::new(FakeTransport::default()));
    let (listener, seen) = recorder();
    let _sub = provider.subscribe(listener);
    assert_eq!(*seen.lock().unwrap(), vec![None]);
}

// =============================================================
// Subscriptions
// =============================================================

#[test]
fn subscribe_delivers_current_then_every_change() {
    let transport = Arc::new(FakeTransport::default());
    let provider = configured(&transport);
    let (listener, seen) = recorder();
    let _sub = provider.subscribe(listener);

    block_on(provider.sign_in("ada@example.com", "pw")).unwrap();
    provider.sign_out().unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![None, Some("ada@example.com".to_owned()), None]
    );
}

#[test]
fn late_subscriber_receives_existing_session_immediately() {
    let transport = Arc::new(FakeTransport::default());
    let provider = configured(&transport);
    block_on(provider.sign_in("ada@example.com", "pw")).unwrap();

    let (listener, seen) = recorder();
    let _sub = provider.subscribe(listener);
    assert_eq!(*seen.lock().unwrap(), vec![Some("ada@example.com".to_owned())]);
}

#[test]
fn dropping_subscription_stops_delivery() {
    let transport = Arc::new(FakeTransport::default());
    let provider = configured(&transport);
    let (listener, seen) = recorder();
    let sub = provider.subscribe(listener);
    assert_eq!(provider.listener_count(), 1);

    sub.unsubscribe();
    assert_eq!(provider.listener_count(), 0);

    block_on(provider.sign_in("ada@example.com", "pw")).unwrap();
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn listener_may_read_adapter_reentrantly() {
    let transport = Arc::new(FakeTransport::default());
    let provider = configured(&transport);
    let inner = provider.clone();
    let observed = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&observed);
    let _sub = provider.subscribe(Arc::new(move |_| {
        sink.lock()
            .unwrap()
            .push(inner.current_session().map(|s| s.uid));
    }));

    block_on(provider.sign_in("ada@example.com", "pw")).unwrap();
    assert_eq!(
        *observed.lock().unwrap(),
        vec![None, Some("uid-ada@example.com".to_owned())]
    );
}

// =============================================================
// Operations
// =============================================================

#[test]
fn failed_sign_in_leaves_session_untouched() {
    let transport = Arc::new(FakeTransport::failing(AuthError::InvalidCredentials));
    let provider = configured(&transport);
    let (listener, seen) = recorder();
    let _sub = provider.subscribe(listener);

    assert_eq!(block_on(provider.sign_in("a@b.c", "bad")), Err(AuthError::InvalidCredentials));
    assert_eq!(transport.calls(), 1);
    assert!(provider.current_session().is_none());
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn sign_up_sets_session_with_display_name() {
    let transport = Arc::new(FakeTransport::default());
    let provider = configured(&transport);
    let session = block_on(provider.sign_up("new@example.com", "secret1", "Newbie")).unwrap();
    assert_eq!(session.display_name.as_deref(), Some("Newbie"));
    assert_eq!(provider.current_session(), Some(session));
}

#[test]
fn federated_flow_round_trips_pending_session_id() {
    let transport = Arc::new(FakeTransport::default());
    let provider = configured(&transport);

    block_on(provider.sign_in_with_federated_provider()).unwrap();
    let session = block_on(provider.complete_federated_sign_in("https://app/auth/callback?code=x")).unwrap();
    assert_eq!(session.email, "fed@example.com");
    assert_eq!(transport.calls(), 2);
}

#[test]
fn federated_completion_without_pending_start_is_rejected() {
    let transport = Arc::new(FakeTransport::default());
    let provider = configured(&transport);
    assert_eq!(
        block_on(provider.complete_federated_sign_in("https://app/auth/callback")),
        Err(AuthError::InvalidCredentials)
    );
    assert_eq!(transport.calls(), 0);
}

#[test]
fn get_token_returns_none_when_signed_out() {
    let transport = Arc::new(FakeTransport::default());
    let provider = configured(&transport);
    assert_eq!(block_on(provider.get_token_at(0)), Ok(None));
}

#[test]
fn get_token_returns_fresh_token_without_refresh() {
    let transport = Arc::new(FakeTransport::default());
    let provider = configured(&transport);
    block_on(provider.sign_in("ada@example.com", "pw")).unwrap();
    assert_eq!(
        block_on(provider.get_token_at(500)),
        Ok(Some("token-ada@example.com".to_owned()))
    );
    assert_eq!(transport.calls(), 1);
}

#[test]
fn get_token_refreshes_expired_token() {
    let transport = Arc::new(FakeTransport::default());
    let provider = configured(&transport);
    block_on(provider.sign_in("ada@example.com", "pw")).unwrap();
    assert_eq!(block_on(provider.get_token_at(5_000)), Ok(Some("refreshed".to_owned())));
    assert_eq!(provider.current_session().map(|s| s.expires_at_ms), Some(99_000));
}

#[test]
fn rejected_refresh_signs_out() {
    let transport = Arc::new(FakeTransport {
        refresh_fails_with: Some(AuthError::InvalidCredentials),
        ..FakeTransport::default()
    });
    let provider = configured(&transport);
    block_on(provider.sign_in("ada@example.com", "pw")).unwrap();
    assert_eq!(block_on(provider.get_token_at(5_000)), Err(AuthError::InvalidCredentials));
    assert!(provider.current_session().is_none());
}

#[test]
fn unavailable_refresh_keeps_session() {
    let transport = Arc::new(FakeTransport {
        refresh_fails_with: Some(AuthError::ProviderUnavailable("offline".to_owned())),
        ..FakeTransport::default()
    });
    let provider = configured(&transport);
    block_on(provider.sign_in("ada@example.com", "pw")).unwrap();
    assert!(block_on(provider.get_token_at(5_000)).is_err());
    assert!(provider.current_session().is_some());
}

// =============================================================
// Error classification
// =============================================================

#[test]
fn provider_codes_map_to_error_kinds() {
    assert_eq!(AuthError::from_provider_code("INVALID_LOGIN_CREDENTIALS"), AuthError::InvalidCredentials);
    assert_eq!(AuthError::from_provider_code("EMAIL_NOT_FOUND"), AuthError::InvalidCredentials);
    assert_eq!(AuthError::from_provider_code("EMAIL_EXISTS"), AuthError::AccountExists);
    assert_eq!(
        AuthError::from_provider_code("WEAK_PASSWORD : Password should be at least 6 characters"),
        AuthError::WeakCredential
    );
    assert_eq!(
        AuthError::from_provider_code("QUOTA_EXCEEDED"),
        AuthError::ProviderUnavailable("QUOTA_EXCEEDED".to_owned())
    );
}

#[test]
fn error_kinds_are_kebab_case() {
    assert_eq!(AuthError::NotConfigured.kind(), "not-configured");
    assert_eq!(AuthError::WeakCredential.kind(), "weak-credential");
    assert_eq!(AuthError::ProviderUnavailable(String::new()).kind(), "provider-unavailable");
}
