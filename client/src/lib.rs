//! # mentorhub-client
//!
//! Leptos + WASM frontend for the MentorHub mentorship program: public
//! pages, student and mentor registration, identity-provider sign-in, role
//! dashboards, and admin record management.
//!
//! The crate compiles twice: with `hydrate` for the browser bundle and with
//! `ssr` for the server renderer. Browser-only calls (storage, HTTP, window
//! navigation) are gated on `hydrate` and stubbed otherwise.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
