#![forbid(unsafe_code)]

//! The single owned UI state object.

use pagekit_i18n::Locale;

/// Page-wide interactive state.
///
/// One instance, owned by the controller, created at page load and dropped at
/// unload. Mutated only by the controller in response to dispatched events;
/// readable by the embedder between dispatches.
///
/// Invariants maintained by the controller:
/// - `is_rtl` iff `locale == Locale::Secondary`
/// - at most one dropdown is active (`active_dropdown` mirrors the DOM)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiState {
    /// Currently active locale.
    pub locale: Locale,
    /// Whether the document renders right-to-left.
    pub is_rtl: bool,
    /// Index of the open dropdown binding, if any.
    pub active_dropdown: Option<usize>,
    /// Whether the mobile menu is open.
    pub mobile_menu_open: bool,
    /// Whether the navbar has passed its scroll threshold.
    pub navbar_scrolled: bool,
    /// Whether the scroll-to-top control is visible.
    pub scroll_top_visible: bool,
    /// Last applied scroll offset, in pixels.
    pub scroll_y: u32,
}

impl UiState {
    /// State at page load: primary locale, nothing open, scrolled to top.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
