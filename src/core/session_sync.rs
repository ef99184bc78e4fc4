//! Keeps the navigation bar in step with the auth session.
//!
//! [`SessionSync`] caches the most recent session reported by the auth
//! provider and renders the nav's auth-dependent region from it. It is
//! the only writer of the shared [`SessionStore`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::auth::AuthProvider;
use crate::core::events::Subscription;
use crate::models::{AuthEvent, NavView, SessionState};
use crate::utils::dom;

/// Shared, read-only view of the cached session.
///
/// Handed to widgets that only need "is a user signed in".
#[derive(Clone, Default)]
pub struct SessionStore {
    state: Rc<RefCell<SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_signed_in(&self) -> bool {
        self.state.borrow().is_signed_in()
    }

    pub fn get(&self) -> SessionState {
        self.state.borrow().clone()
    }

    fn set(&self, state: SessionState) {
        *self.state.borrow_mut() = state;
    }
}

/// Session-to-nav synchronizer.
pub struct SessionSync {
    auth: Rc<dyn AuthProvider>,
    store: SessionStore,
    dropdown_open: Cell<bool>,
    /// Bumped on every applied sign-in/sign-out event.
    generation: Cell<u64>,
    renderer: Box<dyn Fn(&NavView)>,
    subscription: RefCell<Option<Subscription>>,
}

impl SessionSync {
    /// `renderer` receives every freshly rendered [`NavView`].
    pub fn new(
        auth: Rc<dyn AuthProvider>,
        store: SessionStore,
        renderer: impl Fn(&NavView) + 'static,
    ) -> Rc<Self> {
        Rc::new(Self {
            auth,
            store,
            dropdown_open: Cell::new(false),
            generation: Cell::new(0),
            renderer: Box::new(renderer),
            subscription: RefCell::new(None),
        })
    }

    /// Follow state changes, then load the current session and render.
    ///
    /// A failed lookup renders the signed-out view. A sign-in or sign-out
    /// delivered while the lookup is pending wins over its result.
    pub async fn initialize(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let subscription = self.auth.events().subscribe(move |event| {
            if let Some(sync) = weak.upgrade() {
                sync.handle_event(event);
            }
        });
        *self.subscription.borrow_mut() = Some(subscription);

        let generation = self.generation.get();
        let state = match self.auth.current_session().await {
            Ok(session) => SessionState::from(session),
            Err(err) => {
                dom::warn(&format!("session lookup failed: {err}"));
                SessionState::SignedOut
            }
        };
        if self.generation.get() != generation {
            return;
        }

        self.store.set(state);
        self.dropdown_open.set(false);
        self.render();
    }

    /// Apply an auth state change. Events other than sign-in/sign-out are ignored.
    pub fn handle_event(&self, event: &AuthEvent) {
        match event {
            AuthEvent::SignedIn(session) => {
                self.store.set(SessionState::SignedIn(session.clone()));
            }
            AuthEvent::SignedOut => self.store.set(SessionState::SignedOut),
            AuthEvent::Other(_) => return,
        }
        self.generation.set(self.generation.get() + 1);
        // The replaced subtree starts with a closed dropdown.
        self.dropdown_open.set(false);
        self.render();
    }

    /// Current nav view, pushed to the renderer.
    pub fn render(&self) -> NavView {
        let view = self.view();
        (self.renderer)(&view);
        view
    }

    /// Current nav view without rendering.
    pub fn view(&self) -> NavView {
        NavView::from_session(&self.store.get(), self.dropdown_open.get())
    }

    pub fn toggle_dropdown(&self) {
        if !self.store.is_signed_in() {
            return;
        }
        self.dropdown_open.set(!self.dropdown_open.get());
        self.render();
    }

    /// Click landed outside the account menu.
    pub fn click_outside(&self) {
        if self.dropdown_open.replace(false) {
            self.render();
        }
    }

    /// Click landed inside the dropdown. Keeps it open.
    pub fn click_inside(&self) {}

    /// Ask the provider to end the session.
    ///
    /// The cached session is left alone; the provider's `SignedOut`
    /// notification drives the re-render, so a failed sign-out keeps the
    /// member view.
    pub async fn sign_out(&self) {
        if let Err(err) = self.auth.sign_out().await {
            dom::warn(&format!("sign-out failed: {err}"));
        }
        self.click_outside();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AuthError;
    use crate::core::mock::{MockAuth, MockCall};
    use crate::models::sample_session;

    struct Harness {
        auth: Rc<MockAuth>,
        store: SessionStore,
        sync: Rc<SessionSync>,
        renders: Rc<RefCell<Vec<NavView>>>,
    }

    fn harness(auth: MockAuth) -> Harness {
        let auth = Rc::new(auth);
        let renders = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&renders);
        let store = SessionStore::new();
        let sync = SessionSync::new(
            Rc::clone(&auth) as Rc<dyn AuthProvider>,
            store.clone(),
            move |view: &NavView| sink.borrow_mut().push(view.clone()),
        );
        Harness {
            auth,
            store,
            sync,
            renders,
        }
    }

    fn last(renders: &Rc<RefCell<Vec<NavView>>>) -> NavView {
        renders.borrow().last().cloned().unwrap()
    }

    fn is_member(view: &NavView) -> bool {
        matches!(view, NavView::Member { .. })
    }

    #[tokio::test]
    async fn test_initialize_without_session() {
        let h = harness(MockAuth::new());
        h.sync.initialize().await;

        assert_eq!(*h.renders.borrow(), vec![NavView::Guest]);
        assert!(!h.store.is_signed_in());
        assert_eq!(h.auth.calls(), vec![MockCall::CurrentSession]);
    }

    #[tokio::test]
    async fn test_initialize_with_session() {
        let h = harness(MockAuth::with_session(sample_session("ada@example.com")));
        h.sync.initialize().await;

        assert!(is_member(&last(&h.renders)));
        assert!(h.store.is_signed_in());
    }

    #[tokio::test]
    async fn test_initialize_lookup_failure_renders_guest() {
        let auth = MockAuth::new();
        auth.fail_current_session(AuthError::Network("offline".to_string()));
        let h = harness(auth);
        h.sync.initialize().await;

        assert_eq!(last(&h.renders), NavView::Guest);
        assert_eq!(h.auth.events().listener_count(), 1);
    }

    #[tokio::test]
    async fn test_signed_out_event_renders_guest() {
        let h = harness(MockAuth::with_session(sample_session("ada@example.com")));
        h.sync.initialize().await;
        assert!(is_member(&last(&h.renders)));

        h.auth.events().emit(&AuthEvent::SignedOut);

        assert_eq!(last(&h.renders), NavView::Guest);
        assert!(!h.store.is_signed_in());
    }

    #[tokio::test]
    async fn test_signed_in_event_adopts_session() {
        let h = harness(MockAuth::new());
        h.sync.initialize().await;

        h.auth
            .events()
            .emit(&AuthEvent::SignedIn(sample_session("grace@example.com")));

        assert_eq!(
            last(&h.renders),
            NavView::Member {
                initial: "G".to_string(),
                email: "grace@example.com".to_string(),
                dropdown_open: false,
            }
        );
    }

    #[tokio::test]
    async fn test_other_events_ignored() {
        let h = harness(MockAuth::new());
        h.sync.initialize().await;
        let before = h.renders.borrow().len();

        h.auth
            .events()
            .emit(&AuthEvent::Other("TOKEN_REFRESHED".to_string()));
        h.auth
            .events()
            .emit(&AuthEvent::from_raw("SIGNED_IN", None));

        assert_eq!(h.renders.borrow().len(), before);
        assert!(!h.store.is_signed_in());
    }

    #[tokio::test]
    async fn test_dropdown_outside_and_inside_clicks() {
        let h = harness(MockAuth::with_session(sample_session("ada@example.com")));
        h.sync.initialize().await;

        h.sync.toggle_dropdown();
        assert!(h.sync.view().dropdown_open());

        h.sync.click_inside();
        assert!(h.sync.view().dropdown_open());

        h.sync.click_outside();
        assert!(!h.sync.view().dropdown_open());
        assert!(!last(&h.renders).dropdown_open());

        h.sync.toggle_dropdown();
        h.sync.toggle_dropdown();
        assert!(!h.sync.view().dropdown_open());
    }

    #[tokio::test]
    async fn test_dropdown_needs_member() {
        let h = harness(MockAuth::new());
        h.sync.initialize().await;
        h.sync.toggle_dropdown();
        assert_eq!(h.sync.view(), NavView::Guest);
    }

    #[tokio::test]
    async fn test_sign_out_waits_for_notification() {
        let h = harness(MockAuth::with_session(sample_session("ada@example.com")));
        h.sync.initialize().await;
        h.sync.toggle_dropdown();

        h.sync.sign_out().await;

        assert_eq!(h.auth.calls().last(), Some(&MockCall::SignOut));
        assert_eq!(last(&h.renders), NavView::Guest);
    }

    #[tokio::test]
    async fn test_failed_sign_out_keeps_member_view() {
        let auth = MockAuth::with_session(sample_session("ada@example.com"));
        auth.fail_sign_out(AuthError::Network("offline".to_string()));
        let h = harness(auth);
        h.sync.initialize().await;
        h.sync.toggle_dropdown();

        h.sync.sign_out().await;

        let view = last(&h.renders);
        assert!(is_member(&view));
        assert!(!view.dropdown_open());
        assert!(h.store.is_signed_in());
    }

    #[tokio::test]
    async fn test_dropped_sync_unsubscribes() {
        let h = harness(MockAuth::new());
        h.sync.initialize().await;
        assert_eq!(h.auth.events().listener_count(), 1);

        drop(h.sync);
        assert_eq!(h.auth.events().listener_count(), 0);
    }

    #[tokio::test]
    async fn test_event_during_slow_lookup_wins() {
        let auth = MockAuth::new();
        auth.set_slow_lookup(true);
        let h = harness(auth);

        tokio::join!(h.sync.initialize(), async {
            h.auth
                .events()
                .emit(&AuthEvent::SignedIn(sample_session("grace@example.com")));
        });

        assert!(h.store.is_signed_in());
        assert_eq!(
            last(&h.renders),
            NavView::Member {
                initial: "G".to_string(),
                email: "grace@example.com".to_string(),
                dropdown_open: false,
            }
        );
    }

    #[tokio::test]
    async fn test_subscribed_before_lookup_resolves() {
        let auth = MockAuth::new();
        auth.set_slow_lookup(true);
        let h = harness(auth);

        tokio::join!(h.sync.initialize(), async {
            assert_eq!(h.auth.events().listener_count(), 1);
        });
        assert_eq!(*h.renders.borrow(), vec![NavView::Guest]);
    }
}
