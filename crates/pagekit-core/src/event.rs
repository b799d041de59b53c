#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! The embedder translates raw browser events into these before handing them
//! to the controller. All variants derive `Clone`, `PartialEq`, and `Eq` for
//! use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - `PointerDown` carries the hit-tested target element, not coordinates:
//!   every routing decision downstream is a containment check, so the target
//!   node is the whole story. `None` models a click on bare page background.
//! - `Tick` is the only way time passes. The embedder emits it from its frame
//!   loop (or a coarse interval timer); everything timed — simulated
//!   submission latency, toast dismissal, throttle windows — hangs off it.

use pagekit_dom::NodeId;
use web_time::Duration;

/// Canonical page event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Pointer pressed on an element (`None` = page background).
    PointerDown {
        /// Hit-tested target element.
        target: Option<NodeId>,
    },

    /// The value of a form control was edited.
    Input {
        /// The edited control.
        field: NodeId,
    },

    /// A form submission was requested.
    Submit {
        /// The form element.
        form: NodeId,
    },

    /// Vertical scroll position changed.
    Scroll {
        /// Scroll offset from the top, in pixels.
        y: u32,
    },

    /// Elapsed time since the previous tick.
    Tick(Duration),
}
