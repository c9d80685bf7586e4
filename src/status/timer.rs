//! Single-threaded timer queue driven by the host event loop.
//!
//! Callbacks never run on their own: the owner of the [`Timers`] calls
//! [`Timers::run_due`] from its loop, and due callbacks run right there on
//! that thread. Times are plain milliseconds from a [`Clock`].

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current time in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock measured from construction.
#[derive(Debug)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Hand-driven clock for tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub const fn new() -> Self {
        Self { now: Cell::new(0) }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(duration_ms(by)));
    }

    pub fn set_ms(&self, now_ms: u64) {
        self.now.set(now_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Handle to a scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

type Callback = Box<dyn FnOnce()>;

struct Queue {
    next_id: u64,
    // Keyed by (deadline, id) so iteration order is firing order.
    entries: BTreeMap<(u64, TimerId), Callback>,
    deadlines: BTreeMap<TimerId, u64>,
}

/// Shared timer queue. Clones refer to the same queue.
#[derive(Clone)]
pub struct Timers {
    clock: Rc<dyn Clock>,
    queue: Rc<RefCell<Queue>>,
}

impl Timers {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            queue: Rc::new(RefCell::new(Queue {
                next_id: 0,
                entries: BTreeMap::new(),
                deadlines: BTreeMap::new(),
            })),
        }
    }

    /// Timers backed by a [`MonotonicClock`].
    pub fn monotonic() -> Self {
        Self::new(Rc::new(MonotonicClock::new()))
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Run `callback` once `delay` has elapsed.
    pub fn set_timeout(&self, delay: Duration, callback: impl FnOnce() + 'static) -> TimerId {
        let due = self.now_ms().saturating_add(duration_ms(delay));
        let mut queue = self.queue.borrow_mut();
        let id = TimerId(queue.next_id);
        queue.next_id += 1;
        queue.entries.insert((due, id), Box::new(callback));
        queue.deadlines.insert(id, due);
        tracing::trace!(timer = id.0, due, "timer armed");
        id
    }

    /// Cancel a pending timer. Returns `false` if it already ran or was
    /// cancelled.
    pub fn clear_timeout(&self, id: TimerId) -> bool {
        let mut queue = self.queue.borrow_mut();
        let Some(due) = queue.deadlines.remove(&id) else {
            return false;
        };
        queue.entries.remove(&(due, id));
        true
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().deadlines.len()
    }

    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.queue
            .borrow()
            .entries
            .keys()
            .next()
            .map(|(due, _)| *due)
    }

    /// Time left until the earliest timer is due (zero if overdue).
    pub fn time_until_next(&self) -> Option<Duration> {
        let due = self.next_deadline_ms()?;
        Some(Duration::from_millis(due.saturating_sub(self.now_ms())))
    }

    /// Run every callback due at the current time. Callbacks armed while
    /// this runs wait for the next call. Returns the number run.
    pub fn run_due(&self) -> usize {
        let now = self.now_ms();
        let due: Vec<Callback> = {
            let mut queue = self.queue.borrow_mut();
            let later = queue.entries.split_off(&(now.saturating_add(1), TimerId(0)));
            let ready = std::mem::replace(&mut queue.entries, later);
            for (_, id) in ready.keys() {
                queue.deadlines.remove(id);
            }
            ready.into_values().collect()
        };
        let count = due.len();
        for callback in due {
            callback();
        }
        count
    }
}

impl std::fmt::Debug for Timers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timers")
            .field("now_ms", &self.now_ms())
            .field("pending", &self.pending())
            .finish()
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual() -> (Rc<ManualClock>, Timers) {
        let clock = Rc::new(ManualClock::new());
        let timers = Timers::new(clock.clone());
        (clock, timers)
    }

    #[test]
    fn test_timer_fires_only_after_delay() {
        let (clock, timers) = manual();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        timers.set_timeout(Duration::from_millis(100), move || h.set(h.get() + 1));

        clock.advance(Duration::from_millis(99));
        assert_eq!(timers.run_due(), 0);
        clock.advance(Duration::from_millis(1));
        assert_eq!(timers.run_due(), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_clear_timeout_prevents_firing() {
        let (clock, timers) = manual();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let id = timers.set_timeout(Duration::from_millis(10), move || h.set(h.get() + 1));
        assert!(timers.clear_timeout(id));
        assert!(!timers.clear_timeout(id));
        clock.advance(Duration::from_millis(50));
        assert_eq!(timers.run_due(), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_run_due_fires_in_deadline_order() {
        let (clock, timers) = manual();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (delay, tag) in [(30, "c"), (10, "a"), (20, "b"), (10, "a2")] {
            let order = order.clone();
            timers.set_timeout(Duration::from_millis(delay), move || {
                order.borrow_mut().push(tag);
            });
        }
        clock.advance(Duration::from_millis(30));
        assert_eq!(timers.run_due(), 4);
        assert_eq!(*order.borrow(), vec!["a", "a2", "b", "c"]);
    }

    #[test]
    fn test_callback_scheduled_during_run_waits_for_next_pass() {
        let (clock, timers) = manual();
        let hits = Rc::new(Cell::new(0));
        let inner_timers = timers.clone();
        let h = hits.clone();
        timers.set_timeout(Duration::ZERO, move || {
            let h = h.clone();
            inner_timers.set_timeout(Duration::ZERO, move || h.set(h.get() + 1));
        });
        assert_eq!(timers.run_due(), 1);
        assert_eq!(hits.get(), 0);
        assert_eq!(timers.run_due(), 1);
        assert_eq!(hits.get(), 1);
        clock.advance(Duration::from_millis(1));
        assert_eq!(timers.run_due(), 0);
    }

    #[test]
    fn test_time_until_next() {
        let (clock, timers) = manual();
        assert_eq!(timers.time_until_next(), None);
        timers.set_timeout(Duration::from_millis(100), || {});
        clock.advance(Duration::from_millis(40));
        assert_eq!(timers.time_until_next(), Some(Duration::from_millis(60)));
        clock.advance(Duration::from_millis(100));
        assert_eq!(timers.time_until_next(), Some(Duration::ZERO));
        assert_eq!(timers.next_deadline_ms(), Some(100));
    }

    #[test]
    fn test_clock_jump_runs_all_passed_deadlines() {
        let (clock, timers) = manual();
        let fired = Rc::new(RefCell::new(Vec::new()));
        for delay in [50, 150, 250, 400] {
            let fired = fired.clone();
            timers.set_timeout(Duration::from_millis(delay), move || {
                fired.borrow_mut().push(delay);
            });
        }
        clock.set_ms(300);
        assert_eq!(timers.now_ms(), 300);
        assert_eq!(timers.run_due(), 3);
        assert_eq!(*fired.borrow(), vec![50, 150, 250]);
        assert_eq!(timers.next_deadline_ms(), Some(400));
        assert_eq!(timers.time_until_next(), Some(Duration::from_millis(100)));
    }
}
