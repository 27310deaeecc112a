//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`.

pub mod admin_login;
pub mod admin_resources;
pub mod auth_callback;
pub mod complete_profile;
pub mod dashboard;
pub mod home;
pub mod info;
pub mod login;
pub mod not_found;
pub mod register;
pub mod signup;
