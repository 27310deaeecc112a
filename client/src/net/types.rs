//! Shared DTOs for the identity provider and backend REST boundaries.
//!
//! DESIGN
//! ======
//! Records mirror the backend JSON payloads so serde round-trips stay
//! lossless. Admin resources carry numeric identifiers; their drafts are the
//! same record without an id and are used for both create and update.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// SESSION
// =============================================================================

/// An authenticated principal as issued by the identity provider.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Provider-assigned user identifier.
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    /// Opaque bearer token presented to the backend.
    pub id_token: String,
    pub refresh_token: String,
    /// Absolute expiry of `id_token` in milliseconds since the Unix epoch.
    pub expires_at_ms: u64,
}

impl Session {
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms
    }

    /// Name shown in headers and greetings.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.email)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("uid", &self.uid)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("id_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("expires_at_ms", &self.expires_at_ms)
            .finish()
    }
}

// =============================================================================
// PROFILE
// =============================================================================

/// Application role attached to a user profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Mentor,
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Mentor, Role::Student];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Mentor => "mentor",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "mentor" => Ok(Self::Mentor),
            "student" => Ok(Self::Student),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Application-level record keyed by the session uid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub role: Role,
    /// Whether the onboarding form has been completed.
    #[serde(default)]
    pub completed: bool,
    pub display_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Payload for `PUT /api/profiles/{uid}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub role: Role,
    pub display_name: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub completed: bool,
}

// =============================================================================
// ADMIN RESOURCES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: u64,
    #[serde(flatten)]
    pub fields: StudentDraft,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub cohort_id: Option<u64>,
    #[serde(default)]
    pub mentor_id: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentor {
    pub id: u64,
    #[serde(flatten)]
    pub fields: MentorDraft,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub expertise: String,
    pub max_mentees: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cohort {
    pub id: u64,
    #[serde(flatten)]
    pub fields: CohortDraft,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortDraft {
    pub name: String,
    /// ISO date, `YYYY-MM-DD`.
    pub start_date: String,
    /// ISO date, `YYYY-MM-DD`.
    pub end_date: String,
    pub capacity: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: u64,
    #[serde(flatten)]
    pub fields: AssignmentDraft,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDraft {
    pub title: String,
    pub cohort_id: u64,
    #[serde(default)]
    pub mentor_id: Option<u64>,
    /// ISO date, `YYYY-MM-DD`.
    pub due_date: String,
    #[serde(default)]
    pub description: String,
}
