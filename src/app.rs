//! Root application module.
//!
//! Contains the main App component, AuthContext definition, and the
//! wiring between the core auth widgets and Leptos signals.

use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::LandingPage;
use crate::core::{
    AuthProvider, BrowserPage, BrowserScheduler, CredentialModal, CtaAction, CtaGate, CtaKind,
    SessionStore, SessionSync, SupabaseAuth,
};
use crate::models::{ModalMode, ModalState, NavView};

// ============================================================================
// AuthContext
// ============================================================================

/// Auth widgets and their render state.
///
/// The core controllers are `Rc`-based and live in local stored values;
/// the signals mirror what they last rendered.
///
/// # Note
///
/// This struct is `Copy` because every field is an arena handle.
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Auth-dependent nav markup, written only by the synchronizer.
    pub nav: RwSignal<NavView>,
    /// Credential modal snapshot.
    pub modal: RwSignal<ModalState>,
    sync: StoredValue<Rc<SessionSync>, LocalStorage>,
    credential_modal: StoredValue<Rc<CredentialModal>, LocalStorage>,
    cta: StoredValue<CtaGate, LocalStorage>,
}

impl AuthContext {
    /// Build the widgets around one auth provider and one session store.
    pub fn new(auth: Rc<dyn AuthProvider>) -> Self {
        let nav = RwSignal::new(NavView::Guest);
        let modal_state = RwSignal::new(ModalState::default());
        let store = SessionStore::new();

        let sync = SessionSync::new(Rc::clone(&auth), store.clone(), move |view: &NavView| {
            nav.set(view.clone());
        });

        let credential_modal =
            CredentialModal::new(auth, Rc::new(BrowserPage), Rc::new(BrowserScheduler));
        credential_modal.set_listener(move |state: &ModalState| modal_state.set(state.clone()));

        let cta = CtaGate::new(store, Rc::clone(&credential_modal));

        Self {
            nav,
            modal: modal_state,
            sync: StoredValue::new_local(sync),
            credential_modal: StoredValue::new_local(credential_modal),
            cta: StoredValue::new_local(cta),
        }
    }

    /// Load the session and start following auth changes.
    pub fn start(&self) {
        let sync = self.sync.get_value();
        spawn_local(async move { sync.initialize().await });
    }

    pub fn sync(&self) -> Rc<SessionSync> {
        self.sync.get_value()
    }

    pub fn credential_modal(&self) -> Rc<CredentialModal> {
        self.credential_modal.get_value()
    }

    pub fn open_modal(&self, mode: ModalMode) {
        self.credential_modal.with_value(|m| m.open(mode));
    }

    /// Route a CTA click through the sign-in gate.
    pub fn cta_click(&self, kind: CtaKind, label: &str) -> CtaAction {
        self.cta.with_value(|gate| gate.click(kind, label))
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the AuthContext
/// - Starts the session synchronizer
/// - Renders the landing page inside an ErrorBoundary
#[component]
pub fn App() -> impl IntoView {
    let ctx = AuthContext::new(Rc::new(SupabaseAuth::from_config()));
    provide_context(ctx);
    ctx.start();

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #f8f9fc;
                    color: #2d3748;
                    font-family: 'Inter', sans-serif;
                ">
                    <div style="max-width: 600px; text-align: center;">
                        <h1 style="color: #dc3545; margin-bottom: 1rem;">
                            "Something went wrong"
                        </h1>
                        <p style="color: #718096; margin-bottom: 2rem;">
                            "An unexpected error occurred. Please try reloading the page."
                        </p>
                        <ul style="text-align: left; color: #dc3545; font-size: 0.9rem;">
                            {move || errors.get()
                                .into_iter()
                                .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                .collect::<Vec<_>>()
                            }
                        </ul>
                        <button
                            on:click=move |_| crate::utils::dom::reload_page()
                            style="
                                background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
                                color: white;
                                border: none;
                                padding: 0.75rem 2rem;
                                border-radius: 8px;
                                cursor: pointer;
                                font-size: 1rem;
                            "
                        >
                            "Reload Page"
                        </button>
                    </div>
                </div>
            }
        >
            <LandingPage />
        </ErrorBoundary>
    }
}
