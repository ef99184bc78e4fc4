//! Auth state change channel.
//!
//! Listeners register with [`AuthEvents::subscribe`] and stay registered
//! until their [`Subscription`] is dropped. Emission works
//! on a snapshot of the listener list, so callbacks may subscribe or
//! unsubscribe while an event is being delivered.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::models::AuthEvent;

type Listener = Rc<dyn Fn(&AuthEvent)>;

#[derive(Default)]
struct Listeners {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Listener)>>,
}

/// Observable stream of [`AuthEvent`]s.
#[derive(Clone, Default)]
pub struct AuthEvents {
    inner: Rc<Listeners>,
}

impl AuthEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every subsequent event.
    #[must_use = "dropping the subscription unsubscribes the listener"]
    pub fn subscribe(&self, listener: impl Fn(&AuthEvent) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .entries
            .borrow_mut()
            .push((id, Rc::new(listener)));

        Subscription {
            id,
            channel: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver an event to all current listeners, in subscription order.
    pub fn emit(&self, event: &AuthEvent) {
        let snapshot: Vec<Listener> = self
            .inner
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(event);
        }
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.inner.entries.borrow().len()
    }
}

/// Handle for a registered listener. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    channel: Weak<Listeners>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(channel) = self.channel.upgrade() {
            channel
                .entries
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_session;

    fn recorder() -> (Rc<RefCell<Vec<AuthEvent>>>, impl Fn(&AuthEvent) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |event: &AuthEvent| sink.borrow_mut().push(event.clone()))
    }

    #[test]
    fn test_emit_reaches_subscribers() {
        let events = AuthEvents::new();
        let (seen, listener) = recorder();
        let _sub = events.subscribe(listener);

        events.emit(&AuthEvent::SignedOut);
        events.emit(&AuthEvent::SignedIn(sample_session("ada@example.com")));

        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow()[0], AuthEvent::SignedOut);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let events = AuthEvents::new();
        let (seen, listener) = recorder();
        let sub = events.subscribe(listener);
        assert_eq!(events.listener_count(), 1);

        drop(sub);
        events.emit(&AuthEvent::SignedOut);

        assert_eq!(events.listener_count(), 0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_unsubscribe_one_of_many() {
        let events = AuthEvents::new();
        let (first_seen, first) = recorder();
        let (second_seen, second) = recorder();
        let first_sub = events.subscribe(first);
        let _second_sub = events.subscribe(second);

        drop(first_sub);
        events.emit(&AuthEvent::SignedOut);

        assert!(first_seen.borrow().is_empty());
        assert_eq!(second_seen.borrow().len(), 1);
    }

    #[test]
    fn test_subscribe_during_emit() {
        let events = AuthEvents::new();
        let late: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let channel = events.clone();
        let slot = Rc::clone(&late);
        let _sub = events.subscribe(move |_| {
            if slot.borrow().is_none() {
                *slot.borrow_mut() = Some(channel.subscribe(|_| {}));
            }
        });

        events.emit(&AuthEvent::SignedOut);
        assert_eq!(events.listener_count(), 2);
    }

    #[test]
    fn test_subscription_outlives_channel() {
        let events = AuthEvents::new();
        let sub = events.subscribe(|_| {});
        drop(events);
        drop(sub);
    }
}
