#![forbid(unsafe_code)]

//! The Pagekit runtime: one controller owning all interactive page state.
//!
//! Raw events go in through [`Controller::dispatch`]; class, attribute, and
//! text mutations come out on the [`Document`](pagekit_dom::Document). The
//! controller owns a single [`UiState`] for the lifetime of the page — no
//! free-floating module state — and is the only writer of that state.
//!
//! Subsystems:
//! - [`controller`] — event routing, dropdown/menu exclusivity, locale and
//!   scroll handling, the tick loop.
//! - [`form`] — declarative field rules, validation reports, annotations.
//! - [`notify`] — the single-active toast lifecycle.
//!
//! # Concurrency model
//! Single-threaded and cooperative, like the event loop it mirrors: each
//! dispatched event runs to completion, and the only suspension mechanism is
//! the deterministic timer service advanced by `Event::Tick`.

pub mod controller;
pub mod form;
pub mod notify;
pub mod state;

pub use controller::{Controller, DropdownBinding, PageBindings, SetupError};
pub use form::{FieldRule, FormBinding, RuleKind, ValidationReport, validate};
pub use notify::Severity;
pub use state::UiState;
