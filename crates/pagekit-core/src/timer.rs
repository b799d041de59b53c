#![forbid(unsafe_code)]

//! Deterministic timer service.
//!
//! The single suspension mechanism in Pagekit: deferred continuations keyed by
//! a millisecond deadline on an internal monotonic cursor. Stands in for the
//! browser's `setTimeout`/`clearTimeout` pair, with the same supersession
//! idiom — cancel the old timer, schedule a new one.
//!
//! # Ordering
//!
//! [`Timers::advance`] fires due timers in deadline order; timers sharing a
//! deadline fire in schedule order. Cancelling an unknown or already-fired
//! timer is a no-op.
//!
//! # Example
//!
//! ```
//! use pagekit_core::timer::Timers;
//! use web_time::Duration;
//!
//! let mut timers: Timers<&str> = Timers::new();
//! timers.schedule(Duration::from_millis(100), "dismiss");
//! let keep = timers.schedule(Duration::from_millis(50), "flush");
//! timers.cancel(keep);
//!
//! assert!(timers.advance(Duration::from_millis(60)).is_empty());
//! assert_eq!(timers.advance(Duration::from_millis(60)), vec!["dismiss"]);
//! ```

use web_time::Duration;

/// Handle to a scheduled timer, usable for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<T> {
    id: TimerId,
    deadline_ms: u64,
    token: T,
}

/// Deterministic timer service over an internal millisecond cursor.
///
/// `T` is the continuation token handed back when a timer fires; the caller
/// interprets it. Not thread-safe — the event loop is single-owner.
#[derive(Debug)]
pub struct Timers<T> {
    entries: Vec<Entry<T>>,
    now_ms: u64,
    next_id: u64,
}

impl<T> Timers<T> {
    /// Create an empty timer service at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            now_ms: 0,
            next_id: 0,
        }
    }

    /// Current position of the time cursor, in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `token` to fire after `delay`.
    pub fn schedule(&mut self, delay: Duration, token: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            deadline_ms: self.now_ms.saturating_add(delay.as_millis() as u64),
            token,
        });
        id
    }

    /// Cancel a pending timer. Returns `true` if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Advance the cursor by `delta` and collect every token that came due,
    /// in deadline order (ties in schedule order).
    pub fn advance(&mut self, delta: Duration) -> Vec<T> {
        self.now_ms = self.now_ms.saturating_add(delta.as_millis() as u64);
        let now = self.now_ms;

        let mut due: Vec<Entry<T>> = Vec::new();
        let mut pending: Vec<Entry<T>> = Vec::new();
        for entry in self.entries.drain(..) {
            if entry.deadline_ms <= now {
                due.push(entry);
            } else {
                pending.push(entry);
            }
        }
        self.entries = pending;

        // Schedule order is id order, so a stable sort on deadline suffices.
        due.sort_by_key(|e| e.deadline_ms);
        due.into_iter().map(|e| e.token).collect()
    }

    /// Number of timers still pending.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}
