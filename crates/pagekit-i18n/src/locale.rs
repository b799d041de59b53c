#![forbid(unsafe_code)]

//! Locale and text direction.

/// The two page locales.
///
/// `Primary` is the authoring locale; `Secondary` is the translated one.
/// Concrete language tags live in the [`Catalog`](crate::Catalog) — the
/// controller logic only ever needs the binary distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// The default, left-to-right locale.
    #[default]
    Primary,
    /// The translated, right-to-left locale.
    Secondary,
}

impl Locale {
    /// The other locale.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }

    /// Text direction for this locale.
    ///
    /// Invariant: right-to-left if and only if the locale is `Secondary`.
    #[must_use]
    pub fn direction(self) -> Direction {
        match self {
            Self::Primary => Direction::Ltr,
            Self::Secondary => Direction::Rtl,
        }
    }
}

/// Document text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

impl Direction {
    /// The value written to the document's `dir` attribute.
    #[must_use]
    pub fn as_attr(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}
