//! Supabase (GoTrue) auth provider.
//!
//! Talks to the project's `/auth/v1` REST endpoints with the public anon
//! key and keeps the session in localStorage so it survives reloads.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::{
    SESSION_REFRESH_MARGIN_SECS, SESSION_STORAGE_KEY, SUPABASE_ANON_KEY, SUPABASE_URL,
};
use crate::core::auth::{AuthFuture, AuthProvider, Credentials};
use crate::core::error::{AuthError, StorageError};
use crate::core::events::AuthEvents;
use crate::models::{AuthEvent, Session, User};
use crate::utils::dom;
use crate::utils::storage::{self, BrowserStorage, KeyValueStore, Stored};

// =============================================================================
// Transport
// =============================================================================

/// JSON POST to an auth endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub url: String,
    pub api_key: String,
    pub bearer: Option<String>,
    pub body: Value,
}

/// Status and raw body of an auth endpoint response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<ApiResponse, AuthError>> + 'a>>;

/// Carries requests to the auth service.
pub trait Transport {
    fn post(&self, request: ApiRequest) -> TransportFuture<'_>;
}

/// Browser `fetch` through gloo-net.
pub struct FetchTransport;

impl Transport for FetchTransport {
    fn post(&self, request: ApiRequest) -> TransportFuture<'_> {
        Box::pin(async move {
            let mut builder = Request::post(&request.url).header("apikey", &request.api_key);
            if let Some(token) = &request.bearer {
                builder = builder.header("Authorization", &format!("Bearer {token}"));
            }

            let response = builder
                .json(&request.body)
                .map_err(|e| AuthError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| AuthError::Decode(e.to_string()))?;
            Ok(ApiResponse { status, body })
        })
    }
}

// =============================================================================
// Provider
// =============================================================================

/// Auth provider backed by a hosted Supabase project.
pub struct SupabaseAuth {
    base_url: String,
    anon_key: String,
    storage_key: String,
    transport: Rc<dyn Transport>,
    store: Rc<dyn KeyValueStore>,
    /// Unix seconds.
    clock: fn() -> i64,
    /// In-memory copy of the persisted session.
    current: RefCell<Option<Session>>,
    events: AuthEvents,
}

impl SupabaseAuth {
    /// Provider that talks over `fetch` and persists to localStorage.
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self::with_backend(
            base_url,
            anon_key,
            Rc::new(FetchTransport),
            Rc::new(BrowserStorage),
            dom::now_secs,
        )
    }

    pub fn with_backend(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        transport: Rc<dyn Transport>,
        store: Rc<dyn KeyValueStore>,
        clock: fn() -> i64,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            storage_key: SESSION_STORAGE_KEY.to_string(),
            transport,
            store,
            clock,
            current: RefCell::new(None),
            events: AuthEvents::new(),
        }
    }

    /// Provider for the project configured at build time.
    pub fn from_config() -> Self {
        Self::new(SUPABASE_URL, SUPABASE_ANON_KEY)
    }

    async fn send(
        &self,
        path: &str,
        body: Value,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, AuthError> {
        self.transport
            .post(ApiRequest {
                url: endpoint(&self.base_url, path),
                api_key: self.anon_key.clone(),
                bearer: bearer.map(String::from),
                body,
            })
            .await
    }

    async fn request_session(&self, path: &str, body: Value) -> Result<Session, AuthError> {
        let response = self.send(path, body, None).await?;
        check_status(response.status, &response.body)?;
        parse_session(&response.body, (self.clock)())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        self.request_session(
            "token?grant_type=refresh_token",
            json!({ "refresh_token": refresh_token }),
        )
        .await
    }

    fn stored_session(&self) -> Option<Session> {
        if let Some(session) = self.current.borrow().clone() {
            return Some(session);
        }
        match storage::get::<Session>(self.store.as_ref(), &self.storage_key) {
            Stored::Present(session) => Some(session),
            Stored::Missing => None,
            Stored::Corrupt => {
                dom::warn("discarding unreadable stored session");
                self.store.remove_item(&self.storage_key);
                None
            }
        }
    }

    /// Write the session through to storage, then cache it.
    fn persist(&self, session: &Session) -> Result<(), StorageError> {
        storage::set(self.store.as_ref(), &self.storage_key, session)?;
        *self.current.borrow_mut() = Some(session.clone());
        Ok(())
    }

    fn forget(&self) {
        self.store.remove_item(&self.storage_key);
        *self.current.borrow_mut() = None;
    }

    /// Store a freshly issued session and announce the sign-in.
    fn adopt(&self, session: Session) -> Result<(), AuthError> {
        self.persist(&session)?;
        self.events.emit(&AuthEvent::SignedIn(session));
        Ok(())
    }
}

impl AuthProvider for SupabaseAuth {
    fn current_session(&self) -> AuthFuture<'_, Option<Session>> {
        Box::pin(async move {
            let Some(session) = self.stored_session() else {
                return Ok(None);
            };

            if !session.expires_within((self.clock)(), SESSION_REFRESH_MARGIN_SECS) {
                *self.current.borrow_mut() = Some(session.clone());
                return Ok(Some(session));
            }

            match self.refresh(&session.refresh_token).await {
                Ok(fresh) => {
                    if let Err(err) = self.persist(&fresh) {
                        // The old refresh token is spent; keep the new one for this page.
                        dom::warn(&format!("refreshed session not persisted: {err}"));
                        *self.current.borrow_mut() = Some(fresh.clone());
                    }
                    self.events
                        .emit(&AuthEvent::from_raw("TOKEN_REFRESHED", Some(fresh.clone())));
                    Ok(Some(fresh))
                }
                Err(AuthError::Rejected(message)) => {
                    dom::warn(&format!("session refresh rejected: {message}"));
                    self.forget();
                    Ok(None)
                }
                Err(err) => Err(err),
            }
        })
    }

    fn sign_in<'a>(&'a self, credentials: &'a Credentials) -> AuthFuture<'a, ()> {
        Box::pin(async move {
            let body = json!({ "email": credentials.email, "password": credentials.password });
            let session = self.request_session("token?grant_type=password", body).await?;
            self.adopt(session)
        })
    }

    fn sign_up<'a>(&'a self, credentials: &'a Credentials) -> AuthFuture<'a, ()> {
        Box::pin(async move {
            let body = json!({ "email": credentials.email, "password": credentials.password });
            let response = self.send("signup", body, None).await?;
            check_status(response.status, &response.body)?;

            // Projects without email confirmation return a live session.
            match parse_sign_up(&response.body, (self.clock)())? {
                Some(session) => self.adopt(session),
                None => Ok(()),
            }
        })
    }

    fn sign_out(&self) -> AuthFuture<'_, ()> {
        Box::pin(async move {
            if let Some(session) = self.stored_session() {
                let response = self
                    .send("logout", json!({}), Some(&session.access_token))
                    .await?;
                if !is_already_signed_out(response.status) {
                    check_status(response.status, &response.body)?;
                }
            }
            self.forget();
            self.events.emit(&AuthEvent::SignedOut);
            Ok(())
        })
    }

    fn events(&self) -> &AuthEvents {
        &self.events
    }
}

// =============================================================================
// Response handling
// =============================================================================

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/auth/v1/{}", base_url.trim_end_matches('/'), path)
}

/// Error body shapes used by the service across versions.
#[derive(Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
    error: Option<Value>,
}

/// Human-readable message from an error response body.
fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let error = parsed.error.and_then(|e| e.as_str().map(String::from));
    [parsed.msg, parsed.error_description, parsed.message, error]
        .into_iter()
        .flatten()
        .find(|m| !m.is_empty())
}

/// Map a response status to success, a rejection, or a server error.
fn check_status(status: u16, body: &str) -> Result<(), AuthError> {
    match status {
        200..=299 => Ok(()),
        400..=499 => Err(AuthError::Rejected(
            error_message(body).unwrap_or_else(|| format!("Request failed with status {status}")),
        )),
        _ => Err(AuthError::Http(status)),
    }
}

/// Logout responses meaning the token is already gone.
fn is_already_signed_out(status: u16) -> bool {
    matches!(status, 401 | 403 | 404)
}

/// Token endpoint payload.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    expires_in: Option<i64>,
    user: User,
}

impl TokenResponse {
    fn into_session(self, now_secs: i64) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now_secs.saturating_add(secs)));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

fn parse_session(body: &str, now_secs: i64) -> Result<Session, AuthError> {
    serde_json::from_str::<TokenResponse>(body)
        .map(|token| token.into_session(now_secs))
        .map_err(|e| AuthError::Decode(e.to_string()))
}

/// Sign-up returns either a session or just the pending user.
fn parse_sign_up(body: &str, now_secs: i64) -> Result<Option<Session>, AuthError> {
    let value: Value = serde_json::from_str(body).map_err(|e| AuthError::Decode(e.to_string()))?;
    if value.get("access_token").is_some() {
        parse_session(body, now_secs).map(Some)
    } else {
        Ok(None)
    }
}
