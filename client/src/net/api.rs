//! REST API helpers for communicating with the backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `NetworkError::Unavailable` since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics so profile and CRUD
//! failures degrade UI behavior without crashing hydration. A 404 on the
//! profile endpoint is a missing profile, not an error.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;
#[cfg(feature = "hydrate")]
use serde::Serialize;
#[cfg(feature = "hydrate")]
use serde::de::DeserializeOwned;

use super::resources::Resource;
use super::types::{ProfileDraft, UserProfile};

// =============================================================================
// ERRORS
// =============================================================================

/// Failures of backend REST calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("not authorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("not available on server")]
    Unavailable,
}

/// Failures resolving the signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileLoadError {
    #[error("profile malformed: {0}")]
    Malformed(String),

    #[error("profile unavailable: {0}")]
    Unavailable(NetworkError),
}

impl From<NetworkError> for ProfileLoadError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::Decode(msg) => Self::Malformed(msg),
            other => Self::Unavailable(other),
        }
    }
}

/// Map a non-2xx status to an error.
pub fn classify_status(status: u16) -> NetworkError {
    match status {
        401 | 403 => NetworkError::Unauthorized,
        404 => NetworkError::NotFound,
        other => NetworkError::Status(other),
    }
}

#[derive(Debug, Deserialize)]
struct SessionTokenResponse {
    token: String,
}

// =============================================================================
// CLIENT
// =============================================================================

/// Backend REST client. `base_url` is empty for same-origin deployments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    fn profile_endpoint(&self, uid: &str) -> String {
        format!("{}/api/profiles/{uid}", self.base_url)
    }

    fn admin_session_endpoint(&self) -> String {
        format!("{}/api/admin/session-token", self.base_url)
    }

    fn collection_endpoint<R: Resource>(&self) -> String {
        format!("{}/api/{}", self.base_url, R::COLLECTION)
    }

    fn record_endpoint<R: Resource>(&self, id: u64) -> String {
        format!("{}/api/{}/{id}", self.base_url, R::COLLECTION)
    }

    /// Fetch the profile for `uid`. `Ok(None)` when the backend has none.
    ///
    /// # Errors
    ///
    /// Returns `Malformed` for undecodable bodies and `Unavailable` for
    /// transport or non-404 status failures.
    pub async fn fetch_profile(&self, uid: &str, id_token: &str) -> Result<Option<UserProfile>, ProfileLoadError> {
        match get_json::<UserProfile>(&self.profile_endpoint(uid), id_token).await {
            Ok(profile) if profile.uid == uid => Ok(Some(profile)),
            Ok(profile) => Err(ProfileLoadError::Malformed(format!(
                "profile uid {} does not match session uid {uid}",
                profile.uid
            ))),
            Err(NetworkError::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Create or replace the profile for `uid`.
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` if the request fails.
    pub async fn save_profile(&self, uid: &str, id_token: &str, draft: &ProfileDraft) -> Result<UserProfile, NetworkError> {
        put_json(&self.profile_endpoint(uid), id_token, draft).await
    }

    /// Exchange admin credentials for an admin session token.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when the credentials are rejected.
    pub async fn admin_session_token(&self, email: &str, password: &str) -> Result<String, NetworkError> {
        let payload = serde_json::json!({ "email": email, "password": password });
        let body: SessionTokenResponse = post_json(&self.admin_session_endpoint(), None, &payload).await?;
        Ok(body.token)
    }

    /// `GET /api/{collection}`.
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` if the request fails.
    pub async fn list<R: Resource>(&self, admin_token: &str) -> Result<Vec<R>, NetworkError> {
        get_json(&self.collection_endpoint::<R>(), admin_token).await
    }

    /// `GET /api/{collection}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids.
    pub async fn get<R: Resource>(&self, admin_token: &str, id: u64) -> Result<R, NetworkError> {
        get_json(&self.record_endpoint::<R>(id), admin_token).await
    }

    /// `POST /api/{collection}`.
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` if the request fails.
    pub async fn create<R: Resource>(&self, admin_token: &str, draft: &R::Draft) -> Result<R, NetworkError> {
        post_json(&self.collection_endpoint::<R>(), Some(admin_token), draft).await
    }

    /// `PUT /api/{collection}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` if the request fails.
    pub async fn update<R: Resource>(&self, admin_token: &str, id: u64, draft: &R::Draft) -> Result<R, NetworkError> {
        put_json(&self.record_endpoint::<R>(id), admin_token, draft).await
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[cfg(feature = "hydrate")]
async fn read_json<T: DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, NetworkError> {
    if !resp.ok() {
        return Err(classify_status(resp.status()));
    }
    resp.json::<T>()
        .await
        .map_err(|e| NetworkError::Decode(e.to_string()))
}

async fn get_json<T>(url: &str, token: &str) -> Result<T, NetworkError>
where
    T: for<'de> Deserialize<'de>,
{
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(url)
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| NetworkError::Request(e.to_string()))?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, bearer(token));
        Err(NetworkError::Unavailable)
    }
}

#[cfg(feature = "hydrate")]
async fn send_body<B, T>(builder: gloo_net::http::RequestBuilder, token: Option<&str>, body: &B) -> Result<T, NetworkError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let builder = match token {
        Some(t) => builder.header("Authorization", &bearer(t)),
        None => builder,
    };
    let resp = builder
        .json(body)
        .map_err(|e| NetworkError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| NetworkError::Request(e.to_string()))?;
    read_json(resp).await
}

async fn post_json<B, T>(url: &str, token: Option<&str>, body: &B) -> Result<T, NetworkError>
where
    B: serde::Serialize + ?Sized,
    T: for<'de> Deserialize<'de>,
{
    #[cfg(feature = "hydrate")]
    {
        send_body(gloo_net::http::Request::post(url), token, body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, token, body);
        Err(NetworkError::Unavailable)
    }
}

async fn put_json<B, T>(url: &str, token: &str, body: &B) -> Result<T, NetworkError>
where
    B: serde::Serialize + ?Sized,
    T: for<'de> Deserialize<'de>,
{
    #[cfg(feature = "hydrate")]
    {
        send_body(gloo_net::http::Request::put(url), Some(token), body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, token, body);
        Err(NetworkError::Unavailable)
    }
}
