//! Core auth overlay logic.
//!
//! This module provides:
//! - [`AuthProvider`] - the auth service seam, with [`SupabaseAuth`] as the hosted implementation
//! - [`AuthEvents`] - observable auth state change channel
//! - [`SessionSync`] - session-to-nav synchronizer and the shared [`SessionStore`]
//! - [`CredentialModal`] - sign-in/sign-up modal controller
//! - [`CtaGate`] - sign-in gating for call-to-action buttons

pub mod auth;
pub mod cta;
pub mod error;
pub mod events;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod modal;
pub mod page;
pub mod scheduler;
pub mod session_sync;
pub mod supabase;

pub use auth::{AuthProvider, Credentials};
pub use cta::{CtaAction, CtaGate, CtaKind};
pub use events::AuthEvents;
pub use modal::{CredentialModal, SubmitOutcome};
pub use page::BrowserPage;
pub use scheduler::BrowserScheduler;
pub use session_sync::{SessionStore, SessionSync};
pub use supabase::SupabaseAuth;
