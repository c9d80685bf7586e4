//! Trailing-edge debounce over [`Timers`].

use std::cell::Cell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::timer::{TimerId, Timers};

struct Inner {
    timers: Timers,
    callback: Box<dyn Fn()>,
    pending: Cell<Option<TimerId>>,
}

/// A callback that runs once after a quiet period.
///
/// Every [`schedule`](Self::schedule) cancels the pending run and arms a
/// new one, so a burst of requests collapses into a single call `delay`
/// after the last request. Clones share the same pending state.
#[derive(Clone)]
pub struct DelayedCall {
    inner: Rc<Inner>,
}

impl DelayedCall {
    pub fn new(timers: &Timers, callback: impl Fn() + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                timers: timers.clone(),
                callback: Box::new(callback),
                pending: Cell::new(None),
            }),
        }
    }

    /// (Re)start the countdown.
    pub fn schedule(&self, delay: Duration) {
        self.cancel();
        let weak: Weak<Inner> = Rc::downgrade(&self.inner);
        let id = self.inner.timers.set_timeout(delay, move || {
            if let Some(inner) = weak.upgrade() {
                inner.pending.set(None);
                (inner.callback)();
            }
        });
        self.inner.pending.set(Some(id));
    }

    /// Cancel any pending run and call the callback now.
    pub fn call(&self) {
        self.cancel();
        (self.inner.callback)();
    }

    pub fn cancel(&self) {
        if let Some(id) = self.inner.pending.take() {
            self.inner.timers.clear_timeout(id);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.inner.pending.get().is_some()
    }

    /// A handle that does not keep the callback alive.
    pub fn downgrade(&self) -> WeakDelayedCall {
        WeakDelayedCall {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// Non-owning [`DelayedCall`] handle, for subscribers that may outlive
/// their owner.
#[derive(Clone)]
pub struct WeakDelayedCall {
    inner: Weak<Inner>,
}

impl WeakDelayedCall {
    pub fn upgrade(&self) -> Option<DelayedCall> {
        self.inner.upgrade().map(|inner| DelayedCall { inner })
    }
}

impl std::fmt::Debug for WeakDelayedCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakDelayedCall")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl std::fmt::Debug for DelayedCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelayedCall")
            .field("pending", &self.inner.pending.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::timer::ManualClock;

    const DELAY: Duration = Duration::from_millis(100);

    fn counting() -> (Rc<ManualClock>, Timers, Rc<Cell<u32>>, DelayedCall) {
        let clock = Rc::new(ManualClock::new());
        let timers = Timers::new(clock.clone());
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let delayed = DelayedCall::new(&timers, move || c.set(c.get() + 1));
        (clock, timers, calls, delayed)
    }

    #[test]
    fn test_burst_collapses_into_one_call() {
        let (clock, timers, calls, delayed) = counting();
        for _ in 0..50 {
            delayed.schedule(DELAY);
            clock.advance(Duration::from_millis(1));
            timers.run_due();
        }
        assert_eq!(calls.get(), 0);
        assert_eq!(timers.pending(), 1);

        clock.advance(DELAY);
        timers.run_due();
        assert_eq!(calls.get(), 1);
        assert!(!delayed.is_pending());
    }

    #[test]
    fn test_fires_delay_after_last_request() {
        let (clock, timers, calls, delayed) = counting();
        delayed.schedule(DELAY);
        clock.advance(Duration::from_millis(80));
        delayed.schedule(DELAY);
        clock.advance(Duration::from_millis(80));
        timers.run_due();
        assert_eq!(calls.get(), 0, "restarted countdown must not fire early");
        clock.advance(Duration::from_millis(20));
        timers.run_due();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_cancel_drops_pending_run() {
        let (clock, timers, calls, delayed) = counting();
        delayed.schedule(DELAY);
        assert!(delayed.is_pending());
        delayed.cancel();
        assert!(!delayed.is_pending());
        assert_eq!(timers.pending(), 0);
        clock.advance(DELAY * 2);
        timers.run_due();
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_call_runs_immediately_and_cancels() {
        let (clock, timers, calls, delayed) = counting();
        delayed.schedule(DELAY);
        delayed.call();
        assert_eq!(calls.get(), 1);
        clock.advance(DELAY);
        timers.run_due();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_dropped_call_does_not_fire() {
        let (clock, timers, calls, delayed) = counting();
        delayed.schedule(DELAY);
        drop(delayed);
        clock.advance(DELAY);
        assert_eq!(timers.run_due(), 1);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_weak_handle_does_not_keep_call_alive() {
        let (clock, timers, calls, delayed) = counting();
        let weak = delayed.downgrade();
        weak.upgrade().unwrap().schedule(DELAY);
        assert!(delayed.is_pending());

        drop(delayed);
        assert!(weak.upgrade().is_none());
        clock.advance(DELAY);
        timers.run_due();
        assert_eq!(calls.get(), 0);
    }
}
