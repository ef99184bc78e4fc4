//! Credential modal controller.
//!
//! One form serves both sign-in and sign-up. The controller owns the
//! [`ModalState`] and pushes a snapshot to its listener after every change;
//! the view never feeds state back except through the methods below.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::{messages, modal_delays};
use crate::core::auth::{AuthProvider, Credentials};
use crate::core::error::AuthError;
use crate::core::page::PageHost;
use crate::core::scheduler::Scheduler;
use crate::models::{FieldValidity, ModalMode, ModalState, Notice, SubmitPhase};

/// Result of a [`CredentialModal::submit`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight.
    Ignored,
    /// Client-side checks failed; the provider was not called.
    Invalid,
    /// The provider call failed.
    Failed(AuthError),
    SignedIn,
    SignedUp,
}

pub struct CredentialModal {
    auth: Rc<dyn AuthProvider>,
    page: Rc<dyn PageHost>,
    scheduler: Rc<dyn Scheduler>,
    state: RefCell<ModalState>,
    /// Bumped whenever the notice changes; stale auto-hides compare against it.
    notice_seq: Cell<u64>,
    listener: RefCell<Option<Box<dyn Fn(&ModalState)>>>,
}

impl CredentialModal {
    pub fn new(
        auth: Rc<dyn AuthProvider>,
        page: Rc<dyn PageHost>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Rc<Self> {
        Rc::new(Self {
            auth,
            page,
            scheduler,
            state: RefCell::new(ModalState::default()),
            notice_seq: Cell::new(0),
            listener: RefCell::new(None),
        })
    }

    /// Receive a snapshot after every state change.
    pub fn set_listener(&self, listener: impl Fn(&ModalState) + 'static) {
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    pub fn state(&self) -> ModalState {
        self.state.borrow().clone()
    }

    fn update(&self, f: impl FnOnce(&mut ModalState)) {
        f(&mut self.state.borrow_mut());
        let snapshot = self.state();
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener(&snapshot);
        }
    }

    // ------------------------------------------------------------------
    // Visibility and mode
    // ------------------------------------------------------------------

    pub fn open(&self, mode: ModalMode) {
        self.bump_notice();
        self.update(|s| {
            s.mode = mode;
            s.is_open = true;
            s.notice = None;
        });
        self.page.lock_scroll();
    }

    /// Close and reset the form. Mode is kept.
    pub fn close(&self) {
        self.bump_notice();
        self.update(|s| {
            s.is_open = false;
            s.notice = None;
            s.email.clear();
            s.password.clear();
        });
        self.page.unlock_scroll();
    }

    /// Escape key handler.
    pub fn handle_escape(&self) {
        if self.state.borrow().is_open {
            self.close();
        }
    }

    /// Switch between sign-in and sign-up, keeping typed values.
    pub fn toggle_mode(&self) {
        self.bump_notice();
        self.update(|s| {
            s.mode = s.mode.toggled();
            s.notice = None;
        });
    }

    // ------------------------------------------------------------------
    // Fields
    // ------------------------------------------------------------------

    pub fn set_email(&self, value: String) {
        self.update(|s| {
            s.email.value = value;
            s.email.validity = s.email.validity.on_input();
        });
    }

    pub fn set_password(&self, value: String) {
        self.update(|s| {
            s.password.value = value;
            s.password.validity = s.password.validity.on_input();
        });
    }

    pub fn blur_email(&self) {
        self.update(|s| s.email.validity = FieldValidity::on_blur(&s.email.value));
    }

    pub fn blur_password(&self) {
        self.update(|s| s.password.validity = FieldValidity::on_blur(&s.password.value));
    }

    // ------------------------------------------------------------------
    // Notices
    // ------------------------------------------------------------------

    fn bump_notice(&self) -> u64 {
        let seq = self.notice_seq.get() + 1;
        self.notice_seq.set(seq);
        seq
    }

    /// Show a notice that hides itself unless replaced first.
    fn show_notice(self: &Rc<Self>, notice: Notice) {
        let seq = self.bump_notice();
        self.update(|s| s.notice = Some(notice));

        let weak = Rc::downgrade(self);
        self.scheduler.schedule(
            modal_delays::NOTICE_HIDE,
            Box::new(move || {
                if let Some(modal) = weak.upgrade()
                    && modal.notice_seq.get() == seq
                {
                    modal.update(|s| s.notice = None);
                }
            }),
        );
    }

    fn clear_notice(&self) {
        self.bump_notice();
        self.update(|s| s.notice = None);
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Submit the values currently held by the form.
    pub async fn submit_form(self: &Rc<Self>) -> SubmitOutcome {
        let (email, password) = {
            let state = self.state.borrow();
            (state.email.value.clone(), state.password.value.clone())
        };
        self.submit(&email, &password).await
    }

    /// Validate and send credentials for the current mode.
    ///
    /// The mode at call time decides both the request and the follow-up.
    pub async fn submit(self: &Rc<Self>, email: &str, password: &str) -> SubmitOutcome {
        if self.state.borrow().is_submitting() {
            return SubmitOutcome::Ignored;
        }

        let credentials = match Credentials::parse(email, password) {
            Ok(credentials) => credentials,
            Err(err) => {
                self.show_notice(Notice::Error(err.to_string()));
                return SubmitOutcome::Invalid;
            }
        };

        let mode = self.state.borrow().mode;
        self.bump_notice();
        self.update(|s| {
            s.phase = SubmitPhase::Submitting;
            s.notice = None;
        });

        let result = match mode {
            ModalMode::SignIn => self.auth.sign_in(&credentials).await,
            ModalMode::SignUp => self.auth.sign_up(&credentials).await,
        };

        self.update(|s| s.phase = SubmitPhase::Idle);

        if let Err(err) = result {
            self.show_notice(Notice::Error(err.user_message()));
            return SubmitOutcome::Failed(err);
        }

        let weak = Rc::downgrade(self);
        match mode {
            ModalMode::SignUp => {
                self.show_notice(Notice::Success(messages::SIGNED_UP.to_string()));
                self.scheduler.schedule(
                    modal_delays::SIGN_UP_SWITCH,
                    Box::new(move || {
                        if let Some(modal) = weak.upgrade() {
                            modal.update(|s| s.mode = ModalMode::SignIn);
                            modal.clear_notice();
                        }
                    }),
                );
                SubmitOutcome::SignedUp
            }
            ModalMode::SignIn => {
                self.show_notice(Notice::Success(messages::SIGNED_IN.to_string()));
                self.scheduler.schedule(
                    modal_delays::SIGN_IN_RELOAD,
                    Box::new(move || {
                        if let Some(modal) = weak.upgrade() {
                            modal.close();
                            modal.page.reload();
                        }
                    }),
                );
                SubmitOutcome::SignedIn
            }
        }
    }
}
