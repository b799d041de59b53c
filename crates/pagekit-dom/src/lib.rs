#![forbid(unsafe_code)]

//! Retained element tree for Pagekit.
//!
//! A headless stand-in for the browser DOM: enough structure for an
//! interaction layer to observe and mutate (tags, class lists, attributes,
//! control values, text content, containment), and nothing a renderer would
//! need (no geometry, no styling, no layout).
//!
//! # Role in Pagekit
//! The runtime never touches a real DOM. The embedder mirrors the page into a
//! [`Document`] once at load, forwards events, and replays the resulting
//! mutations back onto the real tree. Everything above this crate is therefore
//! deterministic and testable in-process.
//!
//! # How it fits in the system
//! `pagekit-dom` has no dependency on events, timers, or the controller. It is
//! plain owned data with query helpers, so invariants like "at most one
//! dropdown carries `active`" can be checked by direct inspection in tests.

pub mod tree;

pub use tree::{Document, NodeId};
