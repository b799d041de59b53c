#![forbid(unsafe_code)]

//! Localization for Pagekit: a static two-locale lookup table.
//!
//! Deliberately not an internationalization engine — no plural rules, no
//! interpolation, no fallback chains. Pages ship exactly two locales (a
//! left-to-right primary and a right-to-left secondary) and a fixed key set,
//! and the catalog validates that both sides define the same keys at build
//! time so a toggle can never expose a hole.
//!
//! # How it fits in the system
//! The controller holds an `Option<Catalog>`. Pages without one simply have
//! no locale toggle; there is no second code path. This crate depends on
//! nothing else in the workspace, keeping localization reusable and testable.

pub mod catalog;
pub mod locale;

pub use catalog::{Catalog, CatalogBuilder, CatalogError};
pub use locale::{Direction, Locale};
