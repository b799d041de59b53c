#![forbid(unsafe_code)]

//! Pagekit public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from internal crates and offers a lightweight
//! prelude for day-to-day usage.
//!
//! # Example
//!
//! ```
//! use pagekit::prelude::*;
//! use web_time::Duration;
//!
//! let mut doc = Document::new();
//! let navbar = doc.create_element("nav");
//! let root = doc.root();
//! doc.append_child(root, navbar);
//!
//! let bindings = PageBindings::new().navbar(navbar);
//! let mut controller =
//!     Controller::new(&mut doc, bindings, None, MemoryPrefs::new()).unwrap();
//!
//! controller.dispatch(&mut doc, Event::Scroll { y: 120 });
//! assert!(controller.state().navbar_scrolled);
//! controller.dispatch(&mut doc, Event::Tick(Duration::from_millis(16)));
//! ```

pub use error::{Error, Result};

// --- DOM re-exports --------------------------------------------------------

pub use pagekit_dom::{Document, NodeId};

// --- Core re-exports -------------------------------------------------------

pub use pagekit_core::event::Event;
pub use pagekit_core::prefs::{MemoryPrefs, PREF_LOCALE, PREF_RTL, PreferenceStore};
pub use pagekit_core::rate::{Debounce, Throttle};
pub use pagekit_core::timer::{TimerId, Timers};

// --- i18n re-exports -------------------------------------------------------

pub use pagekit_i18n::{Catalog, CatalogBuilder, CatalogError, Direction, Locale};

// --- Runtime re-exports ----------------------------------------------------

pub use pagekit_runtime::{
    Controller, DropdownBinding, FieldRule, FormBinding, PageBindings, RuleKind, SetupError,
    Severity, UiState, ValidationReport, validate,
};

mod error;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Catalog, Controller, Document, Error, Event, FieldRule, FormBinding, Locale, MemoryPrefs,
        NodeId, PageBindings, PreferenceStore, Result, Severity, UiState,
    };
}
