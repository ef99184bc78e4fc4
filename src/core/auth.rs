//! Auth service seam.
//!
//! Widgets receive an `Rc<dyn AuthProvider>` at construction instead of
//! reaching for a global client. Futures are not `Send`: everything runs on
//! the page's UI thread.

use std::future::Future;
use std::pin::Pin;

use crate::config::MIN_PASSWORD_LEN;
use crate::core::error::{AuthError, ValidationError};
use crate::core::events::AuthEvents;
use crate::models::Session;

/// Boxed future returned by [`AuthProvider`] operations.
pub type AuthFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, AuthError>> + 'a>>;

/// Email/password pair that passed client-side checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Check raw form values.
    ///
    /// Both fields must be non-empty and the password must have at least
    /// [`MIN_PASSWORD_LEN`] UTF-16 code units, the unit the browser form
    /// and the auth service count in.
    pub fn parse(email: &str, password: &str) -> Result<Self, ValidationError> {
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if password.encode_utf16().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

/// Externally hosted authentication service.
pub trait AuthProvider {
    /// Current session, if any.
    fn current_session(&self) -> AuthFuture<'_, Option<Session>>;

    fn sign_in<'a>(&'a self, credentials: &'a Credentials) -> AuthFuture<'a, ()>;

    fn sign_up<'a>(&'a self, credentials: &'a Credentials) -> AuthFuture<'a, ()>;

    fn sign_out(&self) -> AuthFuture<'_, ()>;

    /// Channel the provider emits state changes on.
    fn events(&self) -> &AuthEvents;
}
