//! Utility modules for DOM and browser storage access.
//!
//! Provides:
//! - [`dom`] - Window, body style, reload, console helpers
//! - [`storage`] - JSON values in localStorage

pub mod dom;
pub mod storage;
