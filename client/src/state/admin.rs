//! Admin session token persisted in browser storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! Admin CRUD calls authorize with a backend-issued session token rather than
//! the identity provider token. The token lives under a fixed storage key so
//! it survives reloads; a 401 from the backend clears it.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use crate::util::storage;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminSession {
    pub token: Option<String>,
}

impl AdminSession {
    /// Restore from storage.
    pub fn load() -> Self {
        let token = storage::load_string(storage::ADMIN_TOKEN_KEY).filter(|t| !t.trim().is_empty());
        Self { token }
    }

    pub fn is_active(&self) -> bool {
        self.token.is_some()
    }

    /// Store a freshly issued token.
    pub fn store(&mut self, token: String) {
        storage::save_string(storage::ADMIN_TOKEN_KEY, &token);
        self.token = Some(token);
    }

    pub fn clear(&mut self) {
        storage::remove(storage::ADMIN_TOKEN_KEY);
        self.token = None;
    }
}
