#![forbid(unsafe_code)]

//! The translation catalog: `locale × key → display string`.
//!
//! Built once at page setup, immutable afterwards. The builder validates the
//! table shape — identical key sets on both sides, distinct language tags —
//! so every lookup failure at runtime means "element opted into translation
//! with an unknown key", which the controller treats as "leave the text
//! alone", never as an error.

use std::collections::BTreeMap;
use std::fmt;

use crate::locale::Locale;

/// Catalog construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A key was defined twice for the same locale.
    DuplicateKey {
        /// Language tag of the offending locale.
        tag: String,
        /// The duplicated key.
        key: String,
    },
    /// A key was defined for one locale but not the other.
    MissingKey {
        /// Language tag of the locale missing the key.
        tag: String,
        /// The missing key.
        key: String,
    },
    /// Primary and secondary language tags are identical.
    IdenticalTags(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey { tag, key } => {
                write!(f, "duplicate key {key:?} for locale {tag:?}")
            }
            Self::MissingKey { tag, key } => {
                write!(f, "locale {tag:?} is missing key {key:?}")
            }
            Self::IdenticalTags(tag) => {
                write!(f, "primary and secondary locales share the tag {tag:?}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Immutable two-locale string table.
#[derive(Debug, Clone)]
pub struct Catalog {
    tags: [String; 2],
    labels: [String; 2],
    entries: BTreeMap<String, [String; 2]>,
}

impl Catalog {
    /// Start building a catalog.
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Look up the display string for `key` in `locale`.
    #[must_use]
    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(|pair| pair[slot(locale)].as_str())
    }

    /// The language tag for a locale (e.g. `"en"`, `"ar"`).
    #[must_use]
    pub fn tag(&self, locale: Locale) -> &str {
        &self.tags[slot(locale)]
    }

    /// Human-readable locale name shown on the toggle control.
    #[must_use]
    pub fn label(&self, locale: Locale) -> &str {
        &self.labels[slot(locale)]
    }

    /// Map a persisted language tag back to a locale.
    #[must_use]
    pub fn locale_for_tag(&self, tag: &str) -> Option<Locale> {
        if tag == self.tags[0] {
            Some(Locale::Primary)
        } else if tag == self.tags[1] {
            Some(Locale::Secondary)
        } else {
            None
        }
    }

    /// All translation keys, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of translation keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn slot(locale: Locale) -> usize {
    match locale {
        Locale::Primary => 0,
        Locale::Secondary => 1,
    }
}

/// Builder for [`Catalog`].
///
/// Defaults to `en`/`ar` tags with `English`/`العربية` labels; override with
/// [`tags`](Self::tags) and [`labels`](Self::labels).
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    tags: [String; 2],
    labels: [String; 2],
    sides: [BTreeMap<String, String>; 2],
    error: Option<CatalogError>,
}

impl CatalogBuilder {
    fn new() -> Self {
        Self {
            tags: ["en".to_string(), "ar".to_string()],
            labels: ["English".to_string(), "العربية".to_string()],
            sides: [BTreeMap::new(), BTreeMap::new()],
            error: None,
        }
    }

    /// Set the language tags for the primary and secondary locales.
    #[must_use]
    pub fn tags(mut self, primary: &str, secondary: &str) -> Self {
        self.tags = [primary.to_string(), secondary.to_string()];
        self
    }

    /// Set the toggle labels for the primary and secondary locales.
    #[must_use]
    pub fn labels(mut self, primary: &str, secondary: &str) -> Self {
        self.labels = [primary.to_string(), secondary.to_string()];
        self
    }

    /// Define a key in both locales at once.
    #[must_use]
    pub fn entry(self, key: &str, primary: &str, secondary: &str) -> Self {
        self.insert(Locale::Primary, key, primary)
            .insert(Locale::Secondary, key, secondary)
    }

    /// Define a key in a single locale.
    #[must_use]
    pub fn insert(mut self, locale: Locale, key: &str, text: &str) -> Self {
        let side = &mut self.sides[slot(locale)];
        if side.contains_key(key) {
            self.error.get_or_insert(CatalogError::DuplicateKey {
                tag: self.tags[slot(locale)].clone(),
                key: key.to_string(),
            });
        } else {
            side.insert(key.to_string(), text.to_string());
        }
        self
    }

    /// Validate and build the catalog.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.tags[0] == self.tags[1] {
            return Err(CatalogError::IdenticalTags(self.tags[0].clone()));
        }
        let [primary, secondary] = self.sides;
        for key in primary.keys() {
            if !secondary.contains_key(key) {
                return Err(CatalogError::MissingKey {
                    tag: self.tags[1].clone(),
                    key: key.clone(),
                });
            }
        }
        for key in secondary.keys() {
            if !primary.contains_key(key) {
                return Err(CatalogError::MissingKey {
                    tag: self.tags[0].clone(),
                    key: key.clone(),
                });
            }
        }
        let mut entries = BTreeMap::new();
        let mut secondary = secondary;
        for (key, text) in primary {
            let other = secondary.remove(&key).unwrap_or_default();
            entries.insert(key, [text, other]);
        }
        Ok(Catalog {
            tags: self.tags,
            labels: self.labels,
            entries,
        })
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
