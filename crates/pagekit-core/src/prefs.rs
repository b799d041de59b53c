#![forbid(unsafe_code)]

//! Preference store: the page's persistent key-value surface.
//!
//! Wraps whatever durable string storage the platform offers (browser
//! localStorage in the real embedding). The core needs exactly two
//! operations; durability and eviction policy belong to the platform.
//!
//! The persisted layout is two string pairs under fixed keys:
//! [`PREF_LOCALE`] (locale tag) and [`PREF_RTL`] (boolean-as-string).

use ahash::AHashMap;

/// Key for the preferred locale tag.
pub const PREF_LOCALE: &str = "preferred-locale";

/// Key for the right-to-left flag, stored as `"true"` / `"false"`.
pub const PREF_RTL: &str = "rtl";

/// Persistent string key-value storage.
pub trait PreferenceStore {
    /// Read a stored value.
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value, replacing any prior one.
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store: the default backing for tests and non-persistent pages.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefs {
    entries: AHashMap<String, String>,
}

impl MemoryPrefs {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}
