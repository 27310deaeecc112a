//! Client configuration baked in at build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser bundle cannot read process environment at runtime, so the
//! identity provider and backend locations are captured with `option_env!`
//! when the WASM crate is compiled. A missing or placeholder API key leaves
//! the identity provider unconfigured; auth operations then short-circuit
//! instead of attempting network I/O.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_TOKEN_BASE_URL: &str = "https://securetoken.googleapis.com";
pub const DEFAULT_FEDERATED_PROVIDER: &str = "google.com";

const PLACEHOLDER_KEYS: &[&str] = &["changeme", "your-api-key", "replace-me", "xxx"];

/// Connection details for the third-party identity provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityConfig {
    pub api_key: String,
    pub identity_base_url: String,
    pub token_base_url: String,
    pub federated_provider: String,
}

/// Everything the client needs to reach its external collaborators.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ClientConfig {
    /// `None` when the identity provider is not configured.
    pub identity: Option<IdentityConfig>,
    /// Backend REST origin; empty means same origin as the page.
    pub api_base_url: String,
}

impl ClientConfig {
    /// Build from variables captured at compile time.
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                "MENTORHUB_IDENTITY_API_KEY" => option_env!("MENTORHUB_IDENTITY_API_KEY"),
                "MENTORHUB_IDENTITY_BASE_URL" => option_env!("MENTORHUB_IDENTITY_BASE_URL"),
                "MENTORHUB_TOKEN_BASE_URL" => option_env!("MENTORHUB_TOKEN_BASE_URL"),
                "MENTORHUB_FEDERATED_PROVIDER" => option_env!("MENTORHUB_FEDERATED_PROVIDER"),
                "MENTORHUB_API_BASE_URL" => option_env!("MENTORHUB_API_BASE_URL"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let identity = non_empty("MENTORHUB_IDENTITY_API_KEY")
            .filter(|key| !is_placeholder_key(key))
            .map(|api_key| IdentityConfig {
                api_key,
                identity_base_url: normalize_base_url(
                    non_empty("MENTORHUB_IDENTITY_BASE_URL").as_deref(),
                    DEFAULT_IDENTITY_BASE_URL,
                ),
                token_base_url: normalize_base_url(
                    non_empty("MENTORHUB_TOKEN_BASE_URL").as_deref(),
                    DEFAULT_TOKEN_BASE_URL,
                ),
                federated_provider: non_empty("MENTORHUB_FEDERATED_PROVIDER")
                    .unwrap_or_else(|| DEFAULT_FEDERATED_PROVIDER.to_owned()),
            });

        let api_base_url = normalize_base_url(non_empty("MENTORHUB_API_BASE_URL").as_deref(), "");

        Self { identity, api_base_url }
    }
}

fn is_placeholder_key(key: &str) -> bool {
    let lowered = key.to_ascii_lowercase();
    PLACEHOLDER_KEYS.contains(&lowered.as_str())
}

fn normalize_base_url(raw: Option<&str>, default: &str) -> String {
    raw.unwrap_or(default).trim_end_matches('/').to_owned()
}
