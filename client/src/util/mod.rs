//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and pure routing
//! decisions from page and component logic to improve reuse and testability.

pub mod access;
pub mod browser;
pub mod clock;
pub mod forms;
pub mod route_guard;
pub mod storage;
