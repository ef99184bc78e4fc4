//! Delayed task scheduling.
//!
//! The modal's follow-ups (auto-hide, mode switch, reload) go through a
//! [`Scheduler`] so tests can drive them with a manual clock.

use gloo_timers::callback::Timeout;

/// Runs a task once after a delay.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Browser scheduler backed by `setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        // Timers are never cancelled; follow-ups check their own staleness.
        Timeout::new(delay_ms, task).forget();
    }
}

#[cfg(any(test, feature = "mock"))]
pub use manual::ManualScheduler;

#[cfg(any(test, feature = "mock"))]
mod manual {
    use std::cell::{Cell, RefCell};

    use super::Scheduler;

    struct Pending {
        due: u64,
        seq: u64,
        task: Box<dyn FnOnce()>,
    }

    /// Scheduler driven by an explicit clock.
    ///
    /// Tasks run only from [`ManualScheduler::advance`], in due order, with
    /// ties broken by scheduling order.
    #[derive(Default)]
    pub struct ManualScheduler {
        now: Cell<u64>,
        seq: Cell<u64>,
        pending: RefCell<Vec<Pending>>,
    }

    impl ManualScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn now(&self) -> u64 {
            self.now.get()
        }

        pub fn pending(&self) -> usize {
            self.pending.borrow().len()
        }

        /// Move the clock forward, running every task that falls due.
        ///
        /// Tasks scheduled by running tasks are honored within the same call.
        pub fn advance(&self, ms: u64) {
            let target = self.now.get() + ms;
            loop {
                let next = {
                    let mut pending = self.pending.borrow_mut();
                    let index = pending
                        .iter()
                        .enumerate()
                        .filter(|(_, p)| p.due <= target)
                        .min_by_key(|(_, p)| (p.due, p.seq))
                        .map(|(i, _)| i);
                    index.map(|i| pending.remove(i))
                };
                let Some(next) = next else { break };
                self.now.set(next.due);
                (next.task)();
            }
            self.now.set(target);
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            let seq = self.seq.get();
            self.seq.set(seq + 1);
            self.pending.borrow_mut().push(Pending {
                due: self.now.get() + u64::from(delay_ms),
                seq,
                task,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_runs_in_due_order() {
        let clock = Rc::new(ManualScheduler::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, tag) in [(300, "c"), (100, "a"), (200, "b"), (100, "a2")] {
            let log = Rc::clone(&log);
            clock.schedule(delay, Box::new(move || log.borrow_mut().push(tag)));
        }

        clock.advance(150);
        assert_eq!(*log.borrow(), vec!["a", "a2"]);
        clock.advance(150);
        assert_eq!(*log.borrow(), vec!["a", "a2", "b", "c"]);
        assert_eq!(clock.pending(), 0);
        assert_eq!(clock.now(), 300);
    }

    #[test]
    fn test_nested_schedule() {
        let clock = Rc::new(ManualScheduler::new());
        let fired = Rc::new(RefCell::new(Vec::new()));

        let inner_clock = Rc::clone(&clock);
        let inner_fired = Rc::clone(&fired);
        clock.schedule(
            10,
            Box::new(move || {
                let at = inner_clock.now();
                inner_fired.borrow_mut().push(at);
                let fired = Rc::clone(&inner_fired);
                let clock = Rc::clone(&inner_clock);
                inner_clock.schedule(5, Box::new(move || fired.borrow_mut().push(clock.now())));
            }),
        );

        clock.advance(14);
        assert_eq!(*fired.borrow(), vec![10]);
        clock.advance(1);
        assert_eq!(*fired.borrow(), vec![10, 15]);
    }
}
