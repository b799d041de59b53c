#![forbid(unsafe_code)]

//! The interaction controller: raw events in, state transitions and DOM
//! mutations out.
//!
//! One controller owns the whole interactive surface of a page. Bindings are
//! declared up front with [`PageBindings`] and verified at construction;
//! every optional element left unbound simply means "feature not present on
//! this page" and its handling is skipped — never an error.
//!
//! # Event routing
//!
//! [`Controller::dispatch`] is the single entry point:
//! - `PointerDown` runs dropdown toggling and the two outside-click
//!   predicates (dropdowns, mobile menu) as containment checks against the
//!   tree, plus locale-toggle and nav-link routing.
//! - `Scroll` is throttled; the trailing sample is flushed on the next tick
//!   so the final scroll position always lands.
//! - `Tick` advances the timer service and drives everything deferred:
//!   simulated submission latency, the toast dismiss chain, trailing scroll.
//!
//! A nav-link click collapses both the mobile menu and any open dropdown —
//! one deliberate behavior, not two.

use pagekit_core::event::Event;
use pagekit_core::prefs::{PREF_LOCALE, PREF_RTL, PreferenceStore};
use pagekit_core::rate::Throttle;
use pagekit_core::timer::Timers;
use pagekit_dom::{Document, NodeId};
use pagekit_i18n::{Catalog, Direction, Locale};
use tracing::{debug, trace, warn};
use web_time::Duration;

use crate::form::{self, FormBinding};
use crate::notify::{Notifier, Severity};
use crate::state::UiState;

/// Navbar gains `scrolled` beyond this offset (exclusive).
pub const NAVBAR_SCROLL_THRESHOLD: u32 = 50;

/// Scroll-to-top control becomes visible beyond this offset (exclusive).
pub const SCROLL_TOP_THRESHOLD: u32 = 300;

/// Minimum spacing between applied scroll samples.
pub const SCROLL_THROTTLE_MS: u64 = 100;

/// Simulated submission latency.
pub const SUBMIT_DELAY: Duration = Duration::from_millis(2000);

/// Toast text shown when a simulated submission resolves.
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Success! Your form has been submitted.";

const ACTIVE_CLASS: &str = "active";
const SCROLLED_CLASS: &str = "scrolled";
const VISIBLE_CLASS: &str = "visible";
const LOADING_CLASS: &str = "loading";
const NAV_LINK_CLASS: &str = "nav-link";
const REVEAL_CLASS: &str = "fade-in-up";
const REVEAL_OPT_IN_CLASS: &str = "animate-on-scroll";
const DATA_I18N: &str = "data-i18n";
const DATA_REVEAL_AT: &str = "data-reveal-at";

/// Continuation tokens for the timer service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerToken {
    /// Simulated submission latency elapsed for the indexed form.
    SubmitDone { form: usize },
    /// Toast TTL elapsed.
    ToastDismiss { generation: u64 },
    /// Toast fade elapsed.
    ToastRemove { generation: u64 },
}

/// Controller construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// A binding references an element that does not exist in the document.
    MissingNode {
        /// Which binding referenced it.
        role: &'static str,
    },
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingNode { role } => {
                write!(f, "binding {role:?} references a missing element")
            }
        }
    }
}

impl std::error::Error for SetupError {}

/// One dropdown: the container that carries `active`, and the trigger that
/// toggles it. Clicks inside the container never count as "outside".
#[derive(Debug, Clone, Copy)]
pub struct DropdownBinding {
    /// Container element carrying the `active` class.
    pub container: NodeId,
    /// Trigger element; clicks on or inside it toggle the dropdown.
    pub trigger: NodeId,
}

/// Which page elements the controller drives.
///
/// Everything is optional; a page without a navbar, menu, or forms just gets
/// the features it declares.
#[derive(Debug, Clone, Default)]
pub struct PageBindings {
    pub(crate) navbar: Option<NodeId>,
    pub(crate) scroll_top: Option<NodeId>,
    pub(crate) mobile_toggle: Option<NodeId>,
    pub(crate) nav_menu: Option<NodeId>,
    pub(crate) lang_toggle: Option<NodeId>,
    pub(crate) lang_label: Option<NodeId>,
    pub(crate) dropdowns: Vec<DropdownBinding>,
    pub(crate) forms: Vec<FormBinding>,
    pub(crate) reveals: Vec<NodeId>,
    pub(crate) viewport_height: u32,
}

impl PageBindings {
    /// Start with nothing bound and a 800 px viewport.
    #[must_use]
    pub fn new() -> Self {
        Self {
            viewport_height: 800,
            ..Self::default()
        }
    }

    /// Bind the navbar (scroll-threshold class target).
    #[must_use]
    pub fn navbar(mut self, node: NodeId) -> Self {
        self.navbar = Some(node);
        self
    }

    /// Bind the scroll-to-top control.
    #[must_use]
    pub fn scroll_top(mut self, node: NodeId) -> Self {
        self.scroll_top = Some(node);
        self
    }

    /// Bind the mobile menu trigger and the menu region it opens.
    #[must_use]
    pub fn mobile_menu(mut self, toggle: NodeId, menu: NodeId) -> Self {
        self.mobile_toggle = Some(toggle);
        self.nav_menu = Some(menu);
        self
    }

    /// Bind the locale toggle control and its label.
    #[must_use]
    pub fn locale_toggle(mut self, toggle: NodeId, label: NodeId) -> Self {
        self.lang_toggle = Some(toggle);
        self.lang_label = Some(label);
        self
    }

    /// Add a dropdown.
    #[must_use]
    pub fn dropdown(mut self, container: NodeId, trigger: NodeId) -> Self {
        self.dropdowns.push(DropdownBinding { container, trigger });
        self
    }

    /// Add a validated form.
    #[must_use]
    pub fn form(mut self, binding: FormBinding) -> Self {
        self.forms.push(binding);
        self
    }

    /// Add a scroll-reveal element explicitly (elements carrying the
    /// `animate-on-scroll` class are discovered automatically).
    #[must_use]
    pub fn reveal(mut self, node: NodeId) -> Self {
        self.reveals.push(node);
        self
    }

    /// Viewport height used for scroll-reveal reach checks.
    #[must_use]
    pub fn viewport_height(mut self, pixels: u32) -> Self {
        self.viewport_height = pixels;
        self
    }

    fn verify(&self, doc: &Document) -> Result<(), SetupError> {
        let check = |node: Option<NodeId>, role: &'static str| {
            if node.is_some_and(|n| !doc.exists(n)) {
                Err(SetupError::MissingNode { role })
            } else {
                Ok(())
            }
        };
        check(self.navbar, "navbar")?;
        check(self.scroll_top, "scroll-top")?;
        check(self.mobile_toggle, "mobile-toggle")?;
        check(self.nav_menu, "nav-menu")?;
        check(self.lang_toggle, "locale-toggle")?;
        check(self.lang_label, "locale-label")?;
        for dropdown in &self.dropdowns {
            check(Some(dropdown.container), "dropdown-container")?;
            check(Some(dropdown.trigger), "dropdown-trigger")?;
        }
        for binding in &self.forms {
            check(Some(binding.form), "form")?;
            check(binding.submit, "form-submit")?;
            for rule in &binding.rules {
                check(Some(rule.field), "form-field")?;
            }
        }
        for &node in &self.reveals {
            check(Some(node), "reveal")?;
        }
        Ok(())
    }
}

/// Per-form submission state.
#[derive(Debug, Default)]
struct FormState {
    submitting: bool,
    saved_label: String,
}

/// The interaction controller. See the module docs.
#[derive(Debug)]
pub struct Controller<P: PreferenceStore> {
    state: UiState,
    bindings: PageBindings,
    catalog: Option<Catalog>,
    prefs: P,
    timers: Timers<TimerToken>,
    scroll_gate: Throttle<u32>,
    notifier: Notifier,
    forms: Vec<FormState>,
    pending_reveals: Vec<NodeId>,
}

impl<P: PreferenceStore> Controller<P> {
    /// Wire a controller to the page.
    ///
    /// Verifies every bound element exists, collects scroll-reveal opt-ins,
    /// and absorbs a persisted locale (the restore-on-load transition) when a
    /// catalog is supplied. Without a catalog, locale toggling is disabled —
    /// there is no second code path.
    pub fn new(
        doc: &mut Document,
        bindings: PageBindings,
        catalog: Option<Catalog>,
        prefs: P,
    ) -> Result<Self, SetupError> {
        bindings.verify(doc)?;

        let mut pending_reveals = bindings.reveals.clone();
        for node in doc.nodes_with_class(REVEAL_OPT_IN_CLASS) {
            if !pending_reveals.contains(&node) {
                pending_reveals.push(node);
            }
        }

        let forms = bindings.forms.iter().map(|_| FormState::default()).collect();
        let mut controller = Self {
            state: UiState::new(),
            notifier: Notifier::new(doc.root()),
            bindings,
            catalog,
            prefs,
            timers: Timers::new(),
            scroll_gate: Throttle::new(SCROLL_THROTTLE_MS),
            forms,
            pending_reveals,
        };
        controller.restore_locale(doc);
        Ok(controller)
    }

    /// Current UI state (read-only).
    #[must_use]
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// The preference store (read-only).
    #[must_use]
    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    /// The live toast element, if one is showing or fading.
    #[must_use]
    pub fn active_toast(&self) -> Option<NodeId> {
        self.notifier.active()
    }

    /// Route one event. The single entry point for the embedder.
    pub fn dispatch(&mut self, doc: &mut Document, event: Event) {
        match event {
            Event::PointerDown { target } => self.on_pointer_down(doc, target),
            Event::Input { field } => self.on_input(doc, field),
            Event::Submit { form } => self.on_submit(doc, form),
            Event::Scroll { y } => self.on_scroll(doc, y),
            Event::Tick(delta) => self.on_tick(doc, delta),
        }
    }

    /// Show a toast. Public so embedder code can surface its own messages
    /// through the same single-active lifecycle.
    pub fn notify(&mut self, doc: &mut Document, message: &str, severity: Severity) {
        self.notifier.show(doc, &mut self.timers, message, severity);
    }

    // --- Pointer routing ---

    fn on_pointer_down(&mut self, doc: &mut Document, target: Option<NodeId>) {
        if let Some(t) = target {
            if let Some(idx) = self
                .bindings
                .dropdowns
                .iter()
                .position(|d| doc.contains(d.trigger, t))
            {
                self.toggle_dropdown(doc, idx);
            }
        }

        // Outside-click: not inside any dropdown container closes them all.
        let inside_dropdown = target.is_some_and(|t| {
            self.bindings
                .dropdowns
                .iter()
                .any(|d| doc.contains(d.container, t))
        });
        if !inside_dropdown {
            self.close_all_dropdowns(doc);
        }

        if let (Some(t), Some(toggle)) = (target, self.bindings.lang_toggle) {
            if doc.contains(toggle, t) {
                self.toggle_locale(doc);
            }
        }

        self.route_menu_click(doc, target);
    }

    fn route_menu_click(&mut self, doc: &mut Document, target: Option<NodeId>) {
        let (Some(toggle), Some(menu)) = (self.bindings.mobile_toggle, self.bindings.nav_menu)
        else {
            return;
        };
        match target {
            Some(t) if doc.contains(toggle, t) => {
                self.set_mobile_menu(doc, !self.state.mobile_menu_open);
            }
            Some(t) if doc.closest_with_class(t, NAV_LINK_CLASS).is_some() => {
                // Navigation collapses all transient chrome.
                self.set_mobile_menu(doc, false);
                self.close_all_dropdowns(doc);
            }
            Some(t) if doc.contains(menu, t) => {}
            _ => self.set_mobile_menu(doc, false),
        }
    }

    fn toggle_dropdown(&mut self, doc: &mut Document, idx: usize) {
        let was_active = self.state.active_dropdown == Some(idx);
        self.close_all_dropdowns(doc);
        if !was_active {
            doc.add_class(self.bindings.dropdowns[idx].container, ACTIVE_CLASS);
            self.state.active_dropdown = Some(idx);
            debug!(dropdown = idx, "dropdown opened");
        }
    }

    fn close_all_dropdowns(&mut self, doc: &mut Document) {
        for dropdown in &self.bindings.dropdowns {
            doc.remove_class(dropdown.container, ACTIVE_CLASS);
        }
        if self.state.active_dropdown.take().is_some() {
            debug!("dropdowns closed");
        }
    }

    fn set_mobile_menu(&mut self, doc: &mut Document, open: bool) {
        if self.state.mobile_menu_open == open {
            return;
        }
        self.state.mobile_menu_open = open;
        for node in [self.bindings.mobile_toggle, self.bindings.nav_menu]
            .into_iter()
            .flatten()
        {
            if open {
                doc.add_class(node, ACTIVE_CLASS);
            } else {
                doc.remove_class(node, ACTIVE_CLASS);
            }
        }
        debug!(open, "mobile menu toggled");
    }

    // --- Locale ---

    /// Flip the locale and direction, re-render translations, persist.
    ///
    /// No-op on pages without a catalog. The translation render is
    /// idempotent: re-applying an unchanged locale rewrites identical text.
    pub fn toggle_locale(&mut self, doc: &mut Document) {
        if self.catalog.is_none() {
            trace!("locale toggle ignored: no catalog bound");
            return;
        }
        let next = self.state.locale.toggled();
        self.apply_locale(doc, next);
        self.persist_locale();
        debug!(rtl = self.state.is_rtl, "locale toggled");
    }

    fn restore_locale(&mut self, doc: &mut Document) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        let Some(stored) = self.prefs.get(PREF_LOCALE) else {
            return;
        };
        let Some(locale) = catalog.locale_for_tag(&stored) else {
            warn!(tag = %stored, "ignoring unknown persisted locale");
            return;
        };
        // Absorb external state: same transition as a toggle, without flipping
        // and without re-persisting what the store already holds.
        if locale != self.state.locale {
            self.apply_locale(doc, locale);
            debug!(tag = %stored, "restored persisted locale");
        }
    }

    fn apply_locale(&mut self, doc: &mut Document, locale: Locale) {
        let Some(catalog) = self.catalog.as_ref() else {
            return;
        };
        let tag = catalog.tag(locale).to_string();
        let label = catalog.label(locale).to_string();
        let updates: Vec<(NodeId, String)> = doc
            .nodes_with_attr(DATA_I18N)
            .into_iter()
            .filter_map(|node| {
                doc.attr(node, DATA_I18N)
                    .and_then(|key| catalog.lookup(locale, key))
                    .map(|text| (node, text.to_string()))
            })
            .collect();

        self.state.locale = locale;
        self.state.is_rtl = locale.direction() == Direction::Rtl;

        let root = doc.root();
        doc.set_attr(root, "dir", locale.direction().as_attr());
        doc.set_attr(root, "lang", &tag);
        if let Some(toggle) = self.bindings.lang_toggle {
            if self.state.is_rtl {
                doc.add_class(toggle, ACTIVE_CLASS);
            } else {
                doc.remove_class(toggle, ACTIVE_CLASS);
            }
        }
        if let Some(node) = self.bindings.lang_label {
            doc.set_text(node, &label);
        }
        for (node, text) in updates {
            doc.set_text(node, &text);
        }
    }

    fn persist_locale(&mut self) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        let tag = catalog.tag(self.state.locale).to_string();
        self.prefs.set(PREF_LOCALE, &tag);
        self.prefs
            .set(PREF_RTL, if self.state.is_rtl { "true" } else { "false" });
    }

    // --- Scroll ---

    fn on_scroll(&mut self, doc: &mut Document, y: u32) {
        let now = self.timers.now_ms();
        if let Some(y) = self.scroll_gate.offer(now, y) {
            self.apply_scroll(doc, y);
        }
    }

    fn apply_scroll(&mut self, doc: &mut Document, y: u32) {
        self.state.scroll_y = y;

        if let Some(navbar) = self.bindings.navbar {
            let scrolled = y > NAVBAR_SCROLL_THRESHOLD;
            set_class(doc, navbar, SCROLLED_CLASS, scrolled);
            self.state.navbar_scrolled = scrolled;
        }
        if let Some(control) = self.bindings.scroll_top {
            let visible = y > SCROLL_TOP_THRESHOLD;
            set_class(doc, control, VISIBLE_CLASS, visible);
            self.state.scroll_top_visible = visible;
        }

        // One-shot reveals: once an element's offset is within reach it is
        // revealed and no longer observed.
        let reach = y.saturating_add(self.bindings.viewport_height);
        self.pending_reveals.retain(|&node| {
            if !doc.exists(node) {
                return false;
            }
            let at = doc
                .attr(node, DATA_REVEAL_AT)
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(0);
            if reach > at {
                doc.add_class(node, REVEAL_CLASS);
                false
            } else {
                true
            }
        });
        trace!(y, "scroll applied");
    }

    // --- Forms ---

    fn on_input(&mut self, doc: &mut Document, field: NodeId) {
        // Optimistic clear: editing removes the annotation immediately; the
        // field is not re-validated until the next submit attempt.
        let bound = self
            .bindings
            .forms
            .iter()
            .any(|f| f.rules.iter().any(|r| r.field == field));
        if bound {
            form::clear_annotation(doc, field);
        }
    }

    fn on_submit(&mut self, doc: &mut Document, form_node: NodeId) {
        let Some(idx) = self
            .bindings
            .forms
            .iter()
            .position(|f| f.form == form_node)
        else {
            warn!(node = form_node.index(), "submit from unbound form ignored");
            return;
        };
        if self.forms[idx].submitting {
            trace!(form = idx, "submit ignored: already in flight");
            return;
        }

        let report = form::validate(doc, &self.bindings.forms[idx].rules);
        for rule in &self.bindings.forms[idx].rules {
            form::clear_annotation(doc, rule.field);
        }
        if report.is_valid() {
            self.begin_submit(doc, idx);
        } else {
            for (field, message) in report.errors() {
                form::annotate(doc, *field, message);
            }
            debug!(form = idx, errors = report.error_count(), "validation failed");
        }
    }

    fn begin_submit(&mut self, doc: &mut Document, idx: usize) {
        self.forms[idx].submitting = true;
        if let Some(submit) = self.bindings.forms[idx].submit {
            self.forms[idx].saved_label = doc.text(submit).to_string();
            doc.set_attr(submit, "disabled", "true");
            doc.add_class(submit, LOADING_CLASS);
            doc.set_text(submit, "");
        }
        self.timers
            .schedule(SUBMIT_DELAY, TimerToken::SubmitDone { form: idx });
        debug!(form = idx, "submission started");
    }

    fn finish_submit(&mut self, doc: &mut Document, idx: usize) {
        if !self.forms[idx].submitting {
            return;
        }
        self.forms[idx].submitting = false;
        if let Some(submit) = self.bindings.forms[idx].submit {
            doc.remove_attr(submit, "disabled");
            doc.remove_class(submit, LOADING_CLASS);
            let label = std::mem::take(&mut self.forms[idx].saved_label);
            doc.set_text(submit, &label);
        }
        for rule in &self.bindings.forms[idx].rules {
            doc.set_value(rule.field, "");
            form::clear_annotation(doc, rule.field);
        }
        self.notifier.show(
            doc,
            &mut self.timers,
            SUBMIT_SUCCESS_MESSAGE,
            Severity::Success,
        );
        debug!(form = idx, "submission completed");
    }

    // --- Time ---

    fn on_tick(&mut self, doc: &mut Document, delta: Duration) {
        let tokens = self.timers.advance(delta);
        for token in tokens {
            match token {
                TimerToken::SubmitDone { form } => self.finish_submit(doc, form),
                TimerToken::ToastDismiss { generation } => {
                    self.notifier
                        .handle_dismiss(doc, &mut self.timers, generation);
                }
                TimerToken::ToastRemove { generation } => {
                    self.notifier.handle_remove(doc, generation);
                }
            }
        }
        if let Some(y) = self.scroll_gate.flush(self.timers.now_ms()) {
            self.apply_scroll(doc, y);
        }
    }
}

fn set_class(doc: &mut Document, node: NodeId, class: &str, on: bool) {
    if on {
        doc.add_class(node, class);
    } else {
        doc.remove_class(node, class);
    }
}
