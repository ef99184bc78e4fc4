//! Call-to-action gating.
//!
//! Some landing-page buttons only make sense for a signed-in visitor.
//! Guests clicking them get the credential modal in sign-up mode instead.

use std::rc::Rc;

use crate::config::GATED_CTA_LABELS;
use crate::core::modal::CredentialModal;
use crate::core::session_sync::SessionStore;
use crate::models::ModalMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CtaKind {
    /// Plan selection button on a pricing card. Always gated.
    Pricing,
    /// Any other primary/outline button. Gated by label.
    Action,
}

/// What a CTA click should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CtaAction {
    /// Run the button's own action.
    Proceed,
    /// Show the sign-up modal instead.
    OpenSignUp,
}

pub fn requires_account(kind: CtaKind, label: &str) -> bool {
    match kind {
        CtaKind::Pricing => true,
        CtaKind::Action => GATED_CTA_LABELS.iter().any(|gated| label.contains(gated)),
    }
}

pub fn route_cta(kind: CtaKind, label: &str, signed_in: bool) -> CtaAction {
    if requires_account(kind, label) && !signed_in {
        CtaAction::OpenSignUp
    } else {
        CtaAction::Proceed
    }
}

/// Click tracking hook. Intentionally inert until an analytics sink exists.
pub fn track_click(_kind: CtaKind, _label: &str) {}

/// Routes CTA clicks using the shared session and the credential modal.
#[derive(Clone)]
pub struct CtaGate {
    session: SessionStore,
    modal: Rc<CredentialModal>,
}

impl CtaGate {
    pub fn new(session: SessionStore, modal: Rc<CredentialModal>) -> Self {
        Self { session, modal }
    }

    /// Handle a click, opening the modal when the visitor must sign up first.
    pub fn click(&self, kind: CtaKind, label: &str) -> CtaAction {
        track_click(kind, label);
        let action = route_cta(kind, label, self.session.is_signed_in());
        if action == CtaAction::OpenSignUp {
            self.modal.open(ModalMode::SignUp);
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::AuthProvider;
    use crate::core::mock::MockAuth;
    use crate::core::page::{PageHost, RecordingPage};
    use crate::core::scheduler::{ManualScheduler, Scheduler};
    use crate::core::session_sync::SessionSync;
    use crate::models::sample_session;

    #[test]
    fn test_route_for_guest() {
        assert_eq!(route_cta(CtaKind::Pricing, "Choose Pro", false), CtaAction::OpenSignUp);
        assert_eq!(route_cta(CtaKind::Action, "Get Started", false), CtaAction::OpenSignUp);
        assert_eq!(
            route_cta(CtaKind::Action, "Start Free Trial Today", false),
            CtaAction::OpenSignUp
        );
        assert_eq!(route_cta(CtaKind::Action, "Learn More", false), CtaAction::Proceed);
    }

    #[test]
    fn test_route_for_member() {
        for (kind, label) in [
            (CtaKind::Pricing, "Choose Pro"),
            (CtaKind::Action, "Try Now"),
            (CtaKind::Action, "Learn More"),
        ] {
            assert_eq!(route_cta(kind, label, true), CtaAction::Proceed);
        }
    }

    fn modal() -> Rc<CredentialModal> {
        CredentialModal::new(
            Rc::new(MockAuth::new()) as Rc<dyn AuthProvider>,
            Rc::new(RecordingPage::new()) as Rc<dyn PageHost>,
            Rc::new(ManualScheduler::new()) as Rc<dyn Scheduler>,
        )
    }

    #[test]
    fn test_gate_opens_sign_up_for_guest() {
        let modal = modal();
        let gate = CtaGate::new(SessionStore::new(), Rc::clone(&modal));

        assert_eq!(gate.click(CtaKind::Action, "Try Now"), CtaAction::OpenSignUp);
        let state = modal.state();
        assert!(state.is_open);
        assert_eq!(state.mode, ModalMode::SignUp);
    }

    #[test]
    fn test_gate_leaves_modal_closed_for_ungated() {
        let modal = modal();
        let gate = CtaGate::new(SessionStore::new(), Rc::clone(&modal));

        assert_eq!(gate.click(CtaKind::Action, "See how it works"), CtaAction::Proceed);
        assert!(!modal.state().is_open);
    }

    #[tokio::test]
    async fn test_gate_follows_synced_session() {
        let auth = Rc::new(MockAuth::with_session(sample_session("ada@example.com")));
        let store = SessionStore::new();
        let sync = SessionSync::new(Rc::clone(&auth) as Rc<dyn AuthProvider>, store.clone(), |_| {});
        let modal = modal();
        let gate = CtaGate::new(store, Rc::clone(&modal));

        sync.initialize().await;
        assert_eq!(gate.click(CtaKind::Pricing, "Choose Pro"), CtaAction::Proceed);
        assert!(!modal.state().is_open);

        sync.sign_out().await;
        assert_eq!(gate.click(CtaKind::Pricing, "Choose Pro"), CtaAction::OpenSignUp);
    }
}
