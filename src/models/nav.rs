use super::session::SessionState;

/// Auth-dependent part of the navigation bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavView {
    /// Log-in and sign-up buttons.
    Guest,
    /// Avatar trigger with the account dropdown.
    Member {
        initial: String,
        email: String,
        dropdown_open: bool,
    },
}

impl NavView {
    pub fn from_session(state: &SessionState, dropdown_open: bool) -> Self {
        match state.session() {
            Some(session) => NavView::Member {
                initial: avatar_initial(session.email()),
                email: session.email().to_string(),
                dropdown_open,
            },
            None => NavView::Guest,
        }
    }

    pub fn dropdown_open(&self) -> bool {
        matches!(
            self,
            NavView::Member {
                dropdown_open: true,
                ..
            }
        )
    }
}

/// Uppercased first character of the email, `?` when empty.
pub fn avatar_initial(email: &str) -> String {
    email
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}
