//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`Session`], [`SessionState`], [`AuthEvent`] - Auth session and its notifications
//! - [`ModalMode`], [`ModalState`], [`Notice`] - Credential modal state
//! - [`NavView`] - Auth-dependent navigation markup

mod modal;
mod nav;
mod session;

pub use modal::{FieldValidity, FormField, ModalCopy, ModalMode, ModalState, Notice, SubmitPhase};
pub use nav::{NavView, avatar_initial};
#[cfg(test)]
pub(crate) use session::sample_session;
pub use session::{AuthEvent, Session, SessionState, User};
