//! Scripted [`AuthProvider`] for tests.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::core::auth::{AuthFuture, AuthProvider, Credentials};
use crate::core::error::AuthError;
use crate::core::events::AuthEvents;
use crate::models::{AuthEvent, Session, User};

/// Operation recorded by [`MockAuth`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockCall {
    CurrentSession,
    SignIn(String),
    SignUp(String),
    SignOut,
}

/// In-memory auth provider with configurable failures.
///
/// Successful sign-in and sign-out emit the matching events, like the
/// hosted service does.
#[derive(Default)]
pub struct MockAuth {
    events: AuthEvents,
    session: RefCell<Option<Session>>,
    calls: RefCell<Vec<MockCall>>,
    current_session_error: RefCell<Option<AuthError>>,
    sign_in_error: RefCell<Option<AuthError>>,
    sign_up_error: RefCell<Option<AuthError>>,
    sign_out_error: RefCell<Option<AuthError>>,
    yield_once: Cell<bool>,
    slow_lookup: Cell<bool>,
}

impl MockAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        let auth = Self::default();
        *auth.session.borrow_mut() = Some(session);
        auth
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }

    /// Number of sign-in/sign-up requests received.
    pub fn credential_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, MockCall::SignIn(_) | MockCall::SignUp(_)))
            .count()
    }

    pub fn fail_current_session(&self, err: AuthError) {
        *self.current_session_error.borrow_mut() = Some(err);
    }

    pub fn fail_sign_in(&self, err: AuthError) {
        *self.sign_in_error.borrow_mut() = Some(err);
    }

    pub fn fail_sign_up(&self, err: AuthError) {
        *self.sign_up_error.borrow_mut() = Some(err);
    }

    pub fn fail_sign_out(&self, err: AuthError) {
        *self.sign_out_error.borrow_mut() = Some(err);
    }

    /// Make credential calls suspend once before completing.
    pub fn set_yield_once(&self, enabled: bool) {
        self.yield_once.set(enabled);
    }

    /// Make session lookups suspend once before completing.
    pub fn set_slow_lookup(&self, enabled: bool) {
        self.slow_lookup.set(enabled);
    }

    fn record(&self, call: MockCall) {
        self.calls.borrow_mut().push(call);
    }

    fn session_for(email: &str) -> Session {
        Session {
            access_token: format!("access-{email}"),
            refresh_token: format!("refresh-{email}"),
            expires_at: None,
            user: User {
                id: format!("id-{email}"),
                email: Some(email.to_string()),
            },
        }
    }
}

impl AuthProvider for MockAuth {
    fn current_session(&self) -> AuthFuture<'_, Option<Session>> {
        Box::pin(async move {
            self.record(MockCall::CurrentSession);
            if self.slow_lookup.get() {
                YieldOnce::default().await;
            }
            if let Some(err) = self.current_session_error.borrow().clone() {
                return Err(err);
            }
            Ok(self.session.borrow().clone())
        })
    }

    fn sign_in<'a>(&'a self, credentials: &'a Credentials) -> AuthFuture<'a, ()> {
        Box::pin(async move {
            self.record(MockCall::SignIn(credentials.email.clone()));
            if self.yield_once.get() {
                YieldOnce::default().await;
            }
            if let Some(err) = self.sign_in_error.borrow().clone() {
                return Err(err);
            }
            let session = Self::session_for(&credentials.email);
            *self.session.borrow_mut() = Some(session.clone());
            self.events.emit(&AuthEvent::SignedIn(session));
            Ok(())
        })
    }

    fn sign_up<'a>(&'a self, credentials: &'a Credentials) -> AuthFuture<'a, ()> {
        Box::pin(async move {
            self.record(MockCall::SignUp(credentials.email.clone()));
            if self.yield_once.get() {
                YieldOnce::default().await;
            }
            match self.sign_up_error.borrow().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        })
    }

    fn sign_out(&self) -> AuthFuture<'_, ()> {
        Box::pin(async move {
            self.record(MockCall::SignOut);
            if let Some(err) = self.sign_out_error.borrow().clone() {
                return Err(err);
            }
            *self.session.borrow_mut() = None;
            self.events.emit(&AuthEvent::SignedOut);
            Ok(())
        })
    }

    fn events(&self) -> &AuthEvents {
        &self.events
    }
}

/// Future that is pending on its first poll and ready on the second.
#[derive(Default)]
struct YieldOnce {
    polled: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.polled {
            Poll::Ready(())
        } else {
            self.polled = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}
