use super::*;

fn config() -> IdentityConfig {
    IdentityConfig {
        api_key: "k123".to_owned(),
        identity_base_url: "https://id.example.test".to_owned(),
        token_base_url: "https://token.example.test".to_owned(),
        federated_provider: "google.com".to_owned(),
    }
}

#[test]
fn accounts_url_embeds_method_and_key() {
    assert_eq!(
        accounts_url(&config(), "signInWithPassword"),
        "https://id.example.test/v1/accounts:signInWithPassword?key=k123"
    );
}

#[test]
fn token_url_embeds_key() {
    assert_eq!(token_url(&config()), "https://token.example.test/v1/token?key=k123");
}

#[test]
fn account_response_maps_to_session_with_absolute_expiry() {
    let resp: AccountResponse = serde_json::from_value(serde_json::json!({
        "localId": "uid-1",
        "email": "ada@example.com",
        "displayName": "",
        "idToken": "tok",
        "refreshToken": "ref",
        "expiresIn": "3600"
    }))
    .unwrap();
    let session = resp.into_session(10_000);
    assert_eq!(session.uid, "uid-1");
    assert_eq!(session.display_name, None);
    assert_eq!(session.expires_at_ms, 10_000 + 3_600_000);
}

#[test]
fn unparsable_lifetime_is_already_expired() {
    assert_eq!(expiry_ms(500, "soon"), 500);
}

#[test]
fn refresh_response_keeps_identity_fields() {
    let session = Session {
        uid: "u1".to_owned(),
        email: "a@b.c".to_owned(),
        display_name: Some("A".to_owned()),
        id_token: "old".to_owned(),
        refresh_token: "old-ref".to_owned(),
        expires_at_ms: 0,
    };
    let resp: RefreshResponse = serde_json::from_value(serde_json::json!({
        "id_token": "new",
        "refresh_token": "new-ref",
        "expires_in": "60",
        "user_id": "u1"
    }))
    .unwrap();
    let refreshed = resp.apply_to(&session, 1_000);
    assert_eq!(refreshed.uid, "u1");
    assert_eq!(refreshed.id_token, "new");
    assert_eq!(refreshed.refresh_token, "new-ref");
    assert_eq!(refreshed.expires_at_ms, 61_000);
}

#[test]
fn error_body_maps_provider_codes() {
    let body = r#"{"error":{"code":400,"message":"EMAIL_EXISTS"}}"#;
    assert_eq!(error_from_body(400, body), AuthError::AccountExists);

    let weak = r#"{"error":{"code":400,"message":"WEAK_PASSWORD : Password should be at least 6 characters"}}"#;
    assert_eq!(error_from_body(400, weak), AuthError::WeakCredential);
}

#[test]
fn unreadable_error_body_is_provider_unavailable() {
    assert_eq!(
        error_from_body(503, "<html>down</html>"),
        AuthError::ProviderUnavailable("provider responded with status 503".to_owned())
    );
}

#[test]
fn refresh_form_carries_grant_type() {
    assert_eq!(refresh_form("abc"), "grant_type=refresh_token&refresh_token=abc");
}
