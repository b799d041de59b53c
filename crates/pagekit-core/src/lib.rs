#![forbid(unsafe_code)]

//! Core primitives for Pagekit: canonical events, a deterministic timer
//! service, throttle/debounce gates, and the preference store.
//!
//! # Role in Pagekit
//! Everything here is mechanism, not policy. The runtime crate decides what a
//! click means; this crate only defines what a click *is*, how deferred work
//! is scheduled, and how high-frequency event floods are bounded.
//!
//! # Time model
//! There is no wall clock anywhere in this crate. The embedder drives time by
//! feeding elapsed durations into [`timer::Timers::advance`], and every
//! deadline is a millisecond offset on that internal cursor. Tests advance
//! time explicitly and never sleep.

pub mod event;
pub mod prefs;
pub mod rate;
pub mod timer;

pub use event::Event;
pub use prefs::{MemoryPrefs, PreferenceStore, PREF_LOCALE, PREF_RTL};
pub use rate::{Debounce, Throttle};
pub use timer::{TimerId, Timers};
