//! Networking modules for the identity provider and the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` adapts the third-party auth service (with `identity_rest` as
//! its wire transport), `api` handles backend REST calls, `resources`
//! describes the admin-managed records, and `types` defines the shared
//! schema.

pub mod api;
pub mod identity;
pub mod identity_rest;
pub mod resources;
pub mod types;
