//! REST transport for the Identity-Toolkit style identity service.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call reports the provider as unavailable since
//! sign-in only happens in the browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "identity_rest_test.rs"]
mod identity_rest_test;

use async_trait::async_trait;
use serde::Deserialize;
#[cfg(feature = "hydrate")]
use serde::de::DeserializeOwned;

use super::identity::{AuthError, AuthTransport, FederatedStart};
use super::types::Session;
use crate::config::IdentityConfig;
use crate::util::clock;

/// Production transport; stateless.
pub struct RestTransport;

fn accounts_url(config: &IdentityConfig, method: &str) -> String {
    format!("{}/v1/accounts:{method}?key={}", config.identity_base_url, config.api_key)
}

fn token_url(config: &IdentityConfig) -> String {
    format!("{}/v1/token?key={}", config.token_base_url, config.api_key)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
    #[serde(default)]
    refresh_token: String,
    /// Lifetime in seconds, sent as a decimal string.
    expires_in: String,
}

impl AccountResponse {
    fn into_session(self, now_ms: u64) -> Session {
        Session {
            uid: self.local_id,
            email: self.email,
            display_name: self.display_name.filter(|n| !n.is_empty()),
            id_token: self.id_token,
            refresh_token: self.refresh_token,
            expires_at_ms: expiry_ms(now_ms, &self.expires_in),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateAuthUriResponse {
    auth_uri: String,
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

impl RefreshResponse {
    fn apply_to(self, session: &Session, now_ms: u64) -> Session {
        Session {
            id_token: self.id_token,
            refresh_token: self.refresh_token,
            expires_at_ms: expiry_ms(now_ms, &self.expires_in),
            ..session.clone()
        }
    }
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Missing or unparsable lifetimes are treated as already expired.
fn expiry_ms(now_ms: u64, expires_in: &str) -> u64 {
    let secs = expires_in.trim().parse::<u64>().unwrap_or(0);
    now_ms.saturating_add(secs.saturating_mul(1000))
}

/// Classify a non-2xx provider body.
#[cfg(any(test, feature = "hydrate"))]
fn error_from_body(status: u16, body: &str) -> AuthError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => AuthError::from_provider_code(&envelope.error.message),
        Err(_) => AuthError::ProviderUnavailable(format!("provider responded with status {status}")),
    }
}

#[cfg(feature = "hydrate")]
fn unavailable(err: impl std::fmt::Display) -> AuthError {
    AuthError::ProviderUnavailable(err.to_string())
}

#[cfg(feature = "hydrate")]
async fn read_response<T: DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, AuthError> {
    let status = resp.status();
    let text = resp.text().await.map_err(unavailable)?;
    if !resp.ok() {
        return Err(error_from_body(status, &text));
    }
    serde_json::from_str(&text).map_err(|e| AuthError::ProviderUnavailable(format!("malformed provider response: {e}")))
}

async fn post_json<T>(url: &str, body: &serde_json::Value) -> Result<T, AuthError>
where
    T: for<'de> Deserialize<'de>,
{
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(url)
            .json(body)
            .map_err(unavailable)?
            .send()
            .await
            .map_err(unavailable)?;
        read_response(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, body);
        Err(AuthError::ProviderUnavailable("not available on server".to_owned()))
    }
}

async fn post_form<T>(url: &str, form: &str) -> Result<T, AuthError>
where
    T: for<'de> Deserialize<'de>,
{
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(form.to_owned())
            .map_err(unavailable)?
            .send()
            .await
            .map_err(unavailable)?;
        read_response(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, form);
        Err(AuthError::ProviderUnavailable("not available on server".to_owned()))
    }
}

fn refresh_form(refresh_token: &str) -> String {
    #[cfg(feature = "hydrate")]
    let encoded: String = js_sys::encode_uri_component(refresh_token).into();
    #[cfg(not(feature = "hydrate"))]
    let encoded = refresh_token.to_owned();
    format!("grant_type=refresh_token&refresh_token={encoded}")
}

#[async_trait(?Send)]
impl AuthTransport for RestTransport {
    async fn sign_in(&self, config: &IdentityConfig, email: &str, password: &str) -> Result<Session, AuthError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        let resp: AccountResponse = post_json(&accounts_url(config, "signInWithPassword"), &body).await?;
        Ok(resp.into_session(clock::now_ms()))
    }

    async fn sign_up(
        &self,
        config: &IdentityConfig,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, AuthError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "displayName": display_name,
            "returnSecureToken": true,
        });
        let resp: AccountResponse = post_json(&accounts_url(config, "signUp"), &body).await?;
        let mut session = resp.into_session(clock::now_ms());
        if session.display_name.is_none() && !display_name.is_empty() {
            session.display_name = Some(display_name.to_owned());
        }
        Ok(session)
    }

    async fn create_auth_uri(&self, config: &IdentityConfig, continue_uri: &str) -> Result<FederatedStart, AuthError> {
        let body = serde_json::json!({
            "providerId": config.federated_provider,
            "continueUri": continue_uri,
        });
        let resp: CreateAuthUriResponse = post_json(&accounts_url(config, "createAuthUri"), &body).await?;
        Ok(FederatedStart { auth_uri: resp.auth_uri, session_id: resp.session_id })
    }

    async fn sign_in_with_idp(
        &self,
        config: &IdentityConfig,
        request_uri: &str,
        session_id: &str,
    ) -> Result<Session, AuthError> {
        let body = serde_json::json!({
            "requestUri": request_uri,
            "sessionId": session_id,
            "returnSecureToken": true,
            "returnIdpCredential": true,
        });
        let resp: AccountResponse = post_json(&accounts_url(config, "signInWithIdp"), &body).await?;
        Ok(resp.into_session(clock::now_ms()))
    }

    async fn refresh(&self, config: &IdentityConfig, session: &Session) -> Result<Session, AuthError> {
        let resp: RefreshResponse = post_form(&token_url(config), &refresh_form(&session.refresh_token)).await?;
        Ok(resp.apply_to(session, clock::now_ms()))
    }
}
