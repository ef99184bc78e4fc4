//! Custom error types for the application.
//!
//! - [`ValidationError`] - Client-side credential checks, caught before any network call
//! - [`AuthError`] - Failures reported by or while talking to the auth service
//! - [`StorageError`] - localStorage operations for the persisted session

use thiserror::Error;

use crate::config::messages;

/// Credential checks performed before contacting the auth service.
///
/// `Display` yields the message shown in the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", messages::MISSING_FIELDS)]
    MissingFields,
    #[error("{}", messages::PASSWORD_TOO_SHORT)]
    PasswordTooShort,
}

/// Auth service errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The service refused the request (bad credentials, taken email, ...).
    #[error("{0}")]
    Rejected(String),
    /// Server-side failure (5xx).
    #[error("auth service error: HTTP {0}")]
    Http(u16),
    /// Request never completed (offline, CORS, DNS).
    #[error("network error: {0}")]
    Network(String),
    /// Response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// The session could not be saved.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Message shown to the user.
    ///
    /// Service rejections are surfaced verbatim; everything else collapses
    /// to the generic message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Rejected(message) => message.clone(),
            _ => messages::UNEXPECTED.to_string(),
        }
    }
}

/// localStorage errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("localStorage not available")]
    Unavailable,
    #[error("failed to serialize session")]
    SerializationFailed,
    #[error("failed to write to localStorage")]
    WriteFailed,
}
