#![forbid(unsafe_code)]

//! Rate limiting for high-frequency event floods.
//!
//! Scroll and resize can arrive faster than state transitions are worth
//! applying. Without a gate, each event triggers a full handler pass. This
//! module bounds handler invocation frequency with two small gates:
//!
//! - [`Throttle`]: leading-edge pass-through, at most once per window, with
//!   latest-wins trailing capture so the final sample is never lost.
//! - [`Debounce`]: trailing-edge only — fires once after the flood goes quiet.
//!
//! Both are driven by an externally supplied millisecond timestamp (the timer
//! cursor), never by a wall clock, so tests are deterministic.
//!
//! # Usage
//!
//! ```
//! use pagekit_core::rate::Throttle;
//!
//! let mut gate: Throttle<u32> = Throttle::new(100);
//!
//! // First sample in a window passes straight through.
//! assert_eq!(gate.offer(0, 10), Some(10));
//! // Samples inside the window are captured, latest wins.
//! assert_eq!(gate.offer(30, 20), None);
//! assert_eq!(gate.offer(60, 30), None);
//! // Once the window elapses, the trailing sample is released.
//! assert_eq!(gate.flush(99), None);
//! assert_eq!(gate.flush(100), Some(30));
//! ```

/// Leading-edge throttle with trailing capture.
///
/// `offer` returns the value when the gate is open (handle it now) or `None`
/// when it was captured as the pending trailing sample. `flush` releases the
/// trailing sample once the window has elapsed; call it from the tick path.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    window_ms: u64,
    next_open_ms: u64,
    trailing: Option<T>,
}

impl<T> Throttle<T> {
    /// Create a throttle with the given window in milliseconds.
    #[must_use]
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            next_open_ms: 0,
            trailing: None,
        }
    }

    /// Offer a sample at time `now_ms`.
    ///
    /// Returns `Some(value)` if the caller should handle it immediately, or
    /// `None` if it was captured as the trailing sample (replacing any prior
    /// capture — latest wins).
    pub fn offer(&mut self, now_ms: u64, value: T) -> Option<T> {
        if now_ms >= self.next_open_ms {
            self.next_open_ms = now_ms.saturating_add(self.window_ms);
            self.trailing = None;
            Some(value)
        } else {
            self.trailing = Some(value);
            None
        }
    }

    /// Release the pending trailing sample if the window has elapsed.
    pub fn flush(&mut self, now_ms: u64) -> Option<T> {
        if self.trailing.is_some() && now_ms >= self.next_open_ms {
            self.next_open_ms = now_ms.saturating_add(self.window_ms);
            self.trailing.take()
        } else {
            None
        }
    }

    /// Whether a trailing sample is waiting.
    #[must_use]
    pub fn has_trailing(&self) -> bool {
        self.trailing.is_some()
    }
}

/// Trailing-edge debounce: fires once after `window_ms` of quiet.
#[derive(Debug, Clone, Copy)]
pub struct Debounce {
    window_ms: u64,
    deadline_ms: Option<u64>,
}

impl Debounce {
    /// Create a debounce with the given quiet window in milliseconds.
    #[must_use]
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            deadline_ms: None,
        }
    }

    /// Record activity at `now_ms`, arming (or extending) the quiet window.
    pub fn poke(&mut self, now_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(self.window_ms));
    }

    /// Returns `true` exactly once after the window has elapsed with no
    /// further pokes.
    pub fn ready(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Whether the debounce is armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }
}
