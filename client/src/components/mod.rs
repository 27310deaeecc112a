//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render site chrome, gates, and admin record views while
//! reading/writing shared state from Leptos context providers.

pub mod admin_gate;
pub mod protected_route;
pub mod resource_form;
pub mod resource_table;
pub mod site_footer;
pub mod site_header;
pub mod toast_host;
