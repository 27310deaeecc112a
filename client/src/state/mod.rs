//! Application state shared through Leptos context.
//!
//! Each module owns one slice: identity and profile (`auth`), the admin
//! session token (`admin`), and transient notifications (`toast`).

pub mod admin;
pub mod auth;
pub mod toast;
