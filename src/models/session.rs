use serde::{Deserialize, Serialize};

/// Authenticated user as reported by the auth service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A signed-in session issued by the auth service.
///
/// The service is the source of truth; copies held by the UI are only
/// used for rendering and may be stale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry as unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

impl Session {
    /// Email of the session owner, empty when the service omitted it.
    pub fn email(&self) -> &str {
        self.user.email.as_deref().unwrap_or_default()
    }

    /// Whether the access token expires within `margin_secs` of `now_secs`.
    ///
    /// Sessions without an expiry never count as expired.
    pub fn expires_within(&self, now_secs: i64, margin_secs: i64) -> bool {
        self.expires_at
            .is_some_and(|exp| exp.saturating_sub(margin_secs) <= now_secs)
    }
}

/// Cached "is someone signed in, and as whom".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    SignedOut,
    SignedIn(Session),
}

impl SessionState {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, SessionState::SignedIn(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::SignedIn(session) => Some(session),
            SessionState::SignedOut => None,
        }
    }
}

impl From<Option<Session>> for SessionState {
    fn from(session: Option<Session>) -> Self {
        session.map_or(SessionState::SignedOut, SessionState::SignedIn)
    }
}

/// Auth state change notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Session),
    SignedOut,
    /// Any other notification (token refresh, user update, ...).
    /// Carries the raw event name.
    Other(String),
}

impl AuthEvent {
    /// Map a wire event name and optional session to a typed event.
    ///
    /// `SIGNED_IN` without a session is not actionable and maps to
    /// [`AuthEvent::Other`].
    pub fn from_raw(name: &str, session: Option<Session>) -> Self {
        match (name, session) {
            ("SIGNED_IN", Some(session)) => AuthEvent::SignedIn(session),
            ("SIGNED_OUT", _) => AuthEvent::SignedOut,
            (other, _) => AuthEvent::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_session(email: &str) -> Session {
    Session {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        expires_at: Some(1_700_003_600),
        user: User {
            id: "4f1c".to_string(),
            email: Some(email.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = SessionState::default();
        assert!(!state.is_signed_in());
        assert_eq!(state.session(), None);
    }

    #[test]
    fn test_state_from_option() {
        let session = sample_session("ada@example.com");
        let state = SessionState::from(Some(session.clone()));
        assert!(state.is_signed_in());
        assert_eq!(state.session().map(Session::email), Some("ada@example.com"));
        assert_eq!(SessionState::from(None), SessionState::SignedOut);
    }

    #[test]
    fn test_expires_within() {
        let session = sample_session("ada@example.com");
        assert!(!session.expires_within(1_700_000_000, 60));
        assert!(session.expires_within(1_700_003_550, 60));
        assert!(session.expires_within(1_700_010_000, 0));

        let no_expiry = Session {
            expires_at: None,
            ..session
        };
        assert!(!no_expiry.expires_within(i64::MAX, 60));
    }

    #[test]
    fn test_expires_within_extreme_values() {
        let mut session = sample_session("ada@example.com");
        session.expires_at = Some(i64::MIN);
        assert!(session.expires_within(0, 60));
        assert!(session.expires_within(i64::MIN, 60));
    }

    #[test]
    fn test_event_from_raw() {
        let session = sample_session("ada@example.com");
        assert_eq!(
            AuthEvent::from_raw("SIGNED_IN", Some(session.clone())),
            AuthEvent::SignedIn(session.clone())
        );
        assert_eq!(
            AuthEvent::from_raw("SIGNED_IN", None),
            AuthEvent::Other("SIGNED_IN".to_string())
        );
        assert_eq!(AuthEvent::from_raw("SIGNED_OUT", None), AuthEvent::SignedOut);
        assert_eq!(
            AuthEvent::from_raw("TOKEN_REFRESHED", Some(session)),
            AuthEvent::Other("TOKEN_REFRESHED".to_string())
        );
    }

    #[test]
    fn test_session_deserializes_service_payload() {
        let json = r#"{
            "access_token": "a",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 1700003600,
            "refresh_token": "r",
            "user": { "id": "u1", "email": "ada@example.com", "role": "authenticated" }
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.email(), "ada@example.com");
        assert_eq!(session.expires_at, Some(1_700_003_600));
    }
}
