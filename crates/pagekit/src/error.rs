#![forbid(unsafe_code)]

//! Unified error model.
//!
//! # Design Principles
//!
//! 1. **Result everywhere** — no panics in library paths.
//! 2. **Domain-specific errors** — each subsystem has its own typed error so
//!    callers can match on what matters and let the rest propagate.
//! 3. **Validation is not an error** — failed field rules are expected
//!    control outcomes surfaced as [`ValidationReport`](crate::ValidationReport)
//!    values, never as `Err`.
//!
//! The only fallible operations are setup-time: building a catalog and wiring
//! the controller to the page. Everything after construction is infallible by
//! design — missing optional elements were filtered out up front.

use std::fmt;

use pagekit_i18n::CatalogError;
use pagekit_runtime::SetupError;

/// Top-level error type for pagekit embedders.
#[derive(Debug)]
pub enum Error {
    /// Translation catalog construction failure.
    Catalog(CatalogError),
    /// Controller wiring failure.
    Setup(SetupError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(err) => write!(f, "catalog: {err}"),
            Self::Setup(err) => write!(f, "setup: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(err) => Some(err),
            Self::Setup(err) => Some(err),
        }
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<SetupError> for Error {
    fn from(err: SetupError) -> Self {
        Self::Setup(err)
    }
}

/// Standard result type for pagekit setup APIs.
pub type Result<T> = std::result::Result<T, Error>;
