//! Page-level side effects used by the credential modal.

use crate::utils::dom;

/// Page services the modal needs beyond its own markup.
pub trait PageHost {
    fn lock_scroll(&self);
    fn unlock_scroll(&self);
    fn reload(&self);
}

/// [`PageHost`] acting on the real document.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserPage;

impl PageHost for BrowserPage {
    fn lock_scroll(&self) {
        dom::set_body_overflow("hidden");
    }

    fn unlock_scroll(&self) {
        dom::set_body_overflow("auto");
    }

    fn reload(&self) {
        dom::reload_page();
    }
}

#[cfg(any(test, feature = "mock"))]
pub use recording::{PageCall, RecordingPage};

#[cfg(any(test, feature = "mock"))]
mod recording {
    use std::cell::RefCell;

    use super::PageHost;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum PageCall {
        LockScroll,
        UnlockScroll,
        Reload,
    }

    /// [`PageHost`] that records calls instead of touching the page.
    #[derive(Default)]
    pub struct RecordingPage {
        calls: RefCell<Vec<PageCall>>,
    }

    impl RecordingPage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<PageCall> {
            self.calls.borrow().clone()
        }

        pub fn reloads(&self) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|c| **c == PageCall::Reload)
                .count()
        }

        /// Whether scrolling is locked after the recorded calls.
        pub fn scroll_locked(&self) -> bool {
            self.calls
                .borrow()
                .iter()
                .rev()
                .find(|c| **c != PageCall::Reload)
                .is_some_and(|c| *c == PageCall::LockScroll)
        }
    }

    impl PageHost for RecordingPage {
        fn lock_scroll(&self) {
            self.calls.borrow_mut().push(PageCall::LockScroll);
        }

        fn unlock_scroll(&self) {
            self.calls.borrow_mut().push(PageCall::UnlockScroll);
        }

        fn reload(&self) {
            self.calls.borrow_mut().push(PageCall::Reload);
        }
    }
}
