//! End-to-end controller behavior over a representative page:
//! navbar, two dropdowns, mobile menu, locale toggle, a validated form,
//! scroll reveals, and the notification surface.

use pagekit_core::event::Event;
use pagekit_core::prefs::{MemoryPrefs, PREF_LOCALE, PREF_RTL, PreferenceStore};
use pagekit_dom::{Document, NodeId};
use pagekit_i18n::{Catalog, Locale};
use pagekit_runtime::{Controller, FieldRule, FormBinding, PageBindings, Severity};
use web_time::Duration;

struct Page {
    doc: Document,
    navbar: NodeId,
    scroll_top: NodeId,
    mobile_toggle: NodeId,
    nav_menu: NodeId,
    menu_link: NodeId,
    menu_plain: NodeId,
    dropdowns: [(NodeId, NodeId); 2],
    dropdown_item: NodeId,
    lang_toggle: NodeId,
    lang_label: NodeId,
    hero: NodeId,
    form: NodeId,
    name_field: NodeId,
    email_field: NodeId,
    phone_field: NodeId,
    submit: NodeId,
    background: NodeId,
    reveal: NodeId,
}

fn page() -> Page {
    let mut doc = Document::new();
    let root = doc.root();

    let navbar = doc.create_element("nav");
    doc.append_child(root, navbar);

    let scroll_top = doc.create_element("button");
    doc.append_child(root, scroll_top);

    let mobile_toggle = doc.create_element("button");
    doc.append_child(navbar, mobile_toggle);

    let nav_menu = doc.create_element("ul");
    doc.append_child(navbar, nav_menu);
    let menu_link = doc.create_element("a");
    doc.add_class(menu_link, "nav-link");
    doc.append_child(nav_menu, menu_link);
    let menu_plain = doc.create_element("span");
    doc.append_child(nav_menu, menu_plain);

    let mut dropdowns = [(root, root); 2];
    let mut dropdown_item = root;
    for (i, slot) in dropdowns.iter_mut().enumerate() {
        let container = doc.create_element("li");
        doc.add_class(container, "nav-dropdown");
        doc.append_child(nav_menu, container);
        let trigger = doc.create_element("button");
        doc.append_child(container, trigger);
        let item = doc.create_element("a");
        doc.append_child(container, item);
        if i == 0 {
            dropdown_item = item;
        }
        *slot = (container, trigger);
    }

    let lang_toggle = doc.create_element("button");
    doc.append_child(navbar, lang_toggle);
    let lang_label = doc.create_element("span");
    doc.append_child(lang_toggle, lang_label);

    let hero = doc.create_element("h1");
    doc.set_attr(hero, "data-i18n", "heroTitle");
    doc.set_text(hero, "Rejuvenate Your Life");
    doc.append_child(root, hero);

    let form = doc.create_element("form");
    doc.append_child(root, form);
    let mut field = |doc: &mut Document, form: NodeId| {
        let wrapper = doc.create_element("div");
        doc.append_child(form, wrapper);
        let input = doc.create_element("input");
        doc.append_child(wrapper, input);
        input
    };
    let name_field = field(&mut doc, form);
    let email_field = field(&mut doc, form);
    let phone_field = field(&mut doc, form);
    let submit = doc.create_element("button");
    doc.set_text(submit, "Send");
    doc.append_child(form, submit);

    let background = doc.create_element("section");
    doc.append_child(root, background);

    let reveal = doc.create_element("div");
    doc.add_class(reveal, "animate-on-scroll");
    doc.set_attr(reveal, "data-reveal-at", "1000");
    doc.append_child(root, reveal);

    Page {
        doc,
        navbar,
        scroll_top,
        mobile_toggle,
        nav_menu,
        menu_link,
        menu_plain,
        dropdowns,
        dropdown_item,
        lang_toggle,
        lang_label,
        hero,
        form,
        name_field,
        email_field,
        phone_field,
        submit,
        background,
        reveal,
    }
}

fn bindings(p: &Page) -> PageBindings {
    PageBindings::new()
        .navbar(p.navbar)
        .scroll_top(p.scroll_top)
        .mobile_menu(p.mobile_toggle, p.nav_menu)
        .locale_toggle(p.lang_toggle, p.lang_label)
        .dropdown(p.dropdowns[0].0, p.dropdowns[0].1)
        .dropdown(p.dropdowns[1].0, p.dropdowns[1].1)
        .form(
            FormBinding::new(p.form)
                .submit(p.submit)
                .rule(FieldRule::required(p.name_field, "This field is required"))
                .rule(FieldRule::email(p.email_field, "Please enter a valid email"))
                .rule(FieldRule::phone(p.phone_field, "Please enter a valid phone number")),
        )
        .viewport_height(800)
}

fn catalog() -> Catalog {
    Catalog::builder()
        .entry("heroTitle", "Rejuvenate Your Life", "جدد حياتك")
        .entry("home", "Home", "الرئيسية")
        .build()
        .unwrap()
}

fn controller(p: &mut Page) -> Controller<MemoryPrefs> {
    let b = bindings(p);
    Controller::new(&mut p.doc, b, Some(catalog()), MemoryPrefs::new()).unwrap()
}

fn click(c: &mut Controller<MemoryPrefs>, doc: &mut Document, target: NodeId) {
    c.dispatch(doc, Event::PointerDown { target: Some(target) });
}

fn tick(c: &mut Controller<MemoryPrefs>, doc: &mut Document, ms: u64) {
    c.dispatch(doc, Event::Tick(Duration::from_millis(ms)));
}

fn scroll(c: &mut Controller<MemoryPrefs>, doc: &mut Document, y: u32) {
    // Space samples past the throttle window so each one applies.
    tick(c, doc, 150);
    c.dispatch(doc, Event::Scroll { y });
}

// --- Dropdowns -------------------------------------------------------------

#[test]
fn dropdowns_are_mutually_exclusive() {
    let mut p = page();
    let mut c = controller(&mut p);

    click(&mut c, &mut p.doc, p.dropdowns[0].1);
    assert!(p.doc.has_class(p.dropdowns[0].0, "active"));
    assert_eq!(c.state().active_dropdown, Some(0));

    click(&mut c, &mut p.doc, p.dropdowns[1].1);
    assert!(!p.doc.has_class(p.dropdowns[0].0, "active"));
    assert!(p.doc.has_class(p.dropdowns[1].0, "active"));
    assert_eq!(c.state().active_dropdown, Some(1));
}

#[test]
fn toggling_active_dropdown_closes_it() {
    let mut p = page();
    let mut c = controller(&mut p);
    click(&mut c, &mut p.doc, p.dropdowns[0].1);
    click(&mut c, &mut p.doc, p.dropdowns[0].1);
    assert!(!p.doc.has_class(p.dropdowns[0].0, "active"));
    assert_eq!(c.state().active_dropdown, None);
}

#[test]
fn outside_click_closes_dropdowns() {
    let mut p = page();
    let mut c = controller(&mut p);
    click(&mut c, &mut p.doc, p.dropdowns[0].1);
    click(&mut c, &mut p.doc, p.background);
    assert_eq!(c.state().active_dropdown, None);
    assert!(!p.doc.has_class(p.dropdowns[0].0, "active"));
}

#[test]
fn click_inside_container_keeps_dropdown_open() {
    let mut p = page();
    let mut c = controller(&mut p);
    click(&mut c, &mut p.doc, p.dropdowns[0].1);
    click(&mut c, &mut p.doc, p.dropdown_item);
    assert_eq!(c.state().active_dropdown, Some(0));
}

#[test]
fn background_click_with_no_target_closes_everything() {
    let mut p = page();
    let mut c = controller(&mut p);
    click(&mut c, &mut p.doc, p.dropdowns[0].1);
    click(&mut c, &mut p.doc, p.mobile_toggle);
    c.dispatch(&mut p.doc, Event::PointerDown { target: None });
    assert_eq!(c.state().active_dropdown, None);
    assert!(!c.state().mobile_menu_open);
}

// --- Mobile menu -----------------------------------------------------------

#[test]
fn mobile_menu_toggles_and_mirrors_classes() {
    let mut p = page();
    let mut c = controller(&mut p);

    click(&mut c, &mut p.doc, p.mobile_toggle);
    assert!(c.state().mobile_menu_open);
    assert!(p.doc.has_class(p.mobile_toggle, "active"));
    assert!(p.doc.has_class(p.nav_menu, "active"));

    click(&mut c, &mut p.doc, p.mobile_toggle);
    assert!(!c.state().mobile_menu_open);
    assert!(!p.doc.has_class(p.nav_menu, "active"));
}

#[test]
fn nav_link_click_collapses_menu_and_dropdowns() {
    let mut p = page();
    let mut c = controller(&mut p);
    click(&mut c, &mut p.doc, p.mobile_toggle);
    click(&mut c, &mut p.doc, p.dropdowns[0].1);
    assert!(c.state().mobile_menu_open);

    click(&mut c, &mut p.doc, p.menu_link);
    assert!(!c.state().mobile_menu_open);
    assert_eq!(c.state().active_dropdown, None);
}

#[test]
fn click_inside_menu_keeps_it_open() {
    let mut p = page();
    let mut c = controller(&mut p);
    click(&mut c, &mut p.doc, p.mobile_toggle);
    click(&mut c, &mut p.doc, p.menu_plain);
    assert!(c.state().mobile_menu_open);
}

#[test]
fn outside_click_closes_menu() {
    let mut p = page();
    let mut c = controller(&mut p);
    click(&mut c, &mut p.doc, p.mobile_toggle);
    click(&mut c, &mut p.doc, p.background);
    assert!(!c.state().mobile_menu_open);
}

// --- Locale ----------------------------------------------------------------

#[test]
fn locale_toggle_is_involutive_and_renders_catalog() {
    let mut p = page();
    let mut c = controller(&mut p);
    let root = p.doc.root();
    let before = c.state().clone();

    click(&mut c, &mut p.doc, p.lang_toggle);
    assert_eq!(c.state().locale, Locale::Secondary);
    assert!(c.state().is_rtl);
    assert_eq!(p.doc.attr(root, "dir"), Some("rtl"));
    assert_eq!(p.doc.attr(root, "lang"), Some("ar"));
    assert_eq!(p.doc.text(p.hero), "جدد حياتك");
    assert_eq!(p.doc.text(p.lang_label), "العربية");
    assert!(p.doc.has_class(p.lang_toggle, "active"));

    click(&mut c, &mut p.doc, p.lang_toggle);
    assert_eq!(c.state(), &before);
    assert_eq!(p.doc.attr(root, "dir"), Some("ltr"));
    assert_eq!(p.doc.text(p.hero), "Rejuvenate Your Life");
    assert_eq!(p.doc.text(p.lang_label), "English");
}

#[test]
fn locale_toggle_persists_preferences() {
    let mut p = page();
    let mut c = controller(&mut p);
    click(&mut c, &mut p.doc, p.lang_toggle);
    assert_eq!(c.prefs().get(PREF_LOCALE).as_deref(), Some("ar"));
    assert_eq!(c.prefs().get(PREF_RTL).as_deref(), Some("true"));
}

#[test]
fn persisted_locale_is_restored_on_load() {
    let mut p = page();
    let mut prefs = MemoryPrefs::new();
    prefs.set(PREF_LOCALE, "ar");
    prefs.set(PREF_RTL, "true");
    let b = bindings(&p);
    let c = Controller::new(&mut p.doc, b, Some(catalog()), prefs).unwrap();

    assert_eq!(c.state().locale, Locale::Secondary);
    assert!(c.state().is_rtl);
    assert_eq!(p.doc.attr(p.doc.root(), "dir"), Some("rtl"));
    assert_eq!(p.doc.text(p.hero), "جدد حياتك");
}

#[test]
fn unknown_persisted_locale_is_ignored() {
    let mut p = page();
    let mut prefs = MemoryPrefs::new();
    prefs.set(PREF_LOCALE, "fr");
    let b = bindings(&p);
    let c = Controller::new(&mut p.doc, b, Some(catalog()), prefs).unwrap();
    assert_eq!(c.state().locale, Locale::Primary);
}

#[test]
fn locale_toggle_without_catalog_is_a_noop() {
    let mut p = page();
    let b = bindings(&p);
    let mut c = Controller::new(&mut p.doc, b, None, MemoryPrefs::new()).unwrap();
    click(&mut c, &mut p.doc, p.lang_toggle);
    assert_eq!(c.state().locale, Locale::Primary);
    assert_eq!(p.doc.attr(p.doc.root(), "dir"), None);
    assert_eq!(c.prefs().get(PREF_LOCALE), None);
}

// --- Scroll ----------------------------------------------------------------

#[test]
fn scroll_thresholds_are_exclusive() {
    let mut p = page();
    let mut c = controller(&mut p);

    scroll(&mut c, &mut p.doc, 300);
    assert!(!c.state().scroll_top_visible);
    assert!(c.state().navbar_scrolled);

    scroll(&mut c, &mut p.doc, 301);
    assert!(c.state().scroll_top_visible);
    assert!(p.doc.has_class(p.scroll_top, "visible"));

    scroll(&mut c, &mut p.doc, 299);
    assert!(!c.state().scroll_top_visible);
    assert!(!p.doc.has_class(p.scroll_top, "visible"));

    scroll(&mut c, &mut p.doc, 50);
    assert!(!c.state().navbar_scrolled);
    assert!(!p.doc.has_class(p.navbar, "scrolled"));
}

#[test]
fn scroll_flood_is_throttled_with_trailing_sample() {
    let mut p = page();
    let mut c = controller(&mut p);

    // A burst within one throttle window: only the first applies eagerly.
    c.dispatch(&mut p.doc, Event::Scroll { y: 400 });
    assert!(c.state().scroll_top_visible);
    c.dispatch(&mut p.doc, Event::Scroll { y: 350 });
    c.dispatch(&mut p.doc, Event::Scroll { y: 10 });
    assert_eq!(c.state().scroll_y, 400);

    // The trailing sample lands on the next tick past the window.
    tick(&mut c, &mut p.doc, 150);
    assert_eq!(c.state().scroll_y, 10);
    assert!(!c.state().scroll_top_visible);
    assert!(!c.state().navbar_scrolled);
}

#[test]
fn reveal_elements_fire_once_within_reach() {
    let mut p = page();
    let mut c = controller(&mut p);

    // reach = y + viewport (800); the element reveals past offset 1000.
    scroll(&mut c, &mut p.doc, 150);
    assert!(!p.doc.has_class(p.reveal, "fade-in-up"));

    scroll(&mut c, &mut p.doc, 201);
    assert!(p.doc.has_class(p.reveal, "fade-in-up"));

    // One-shot: scrolling back up does not unreveal.
    scroll(&mut c, &mut p.doc, 0);
    assert!(p.doc.has_class(p.reveal, "fade-in-up"));
}

// --- Forms -----------------------------------------------------------------

#[test]
fn invalid_submit_annotates_each_failing_field_once() {
    let mut p = page();
    let mut c = controller(&mut p);
    p.doc.set_value(p.email_field, "a@b");
    p.doc.set_value(p.phone_field, "call-me!");

    c.dispatch(&mut p.doc, Event::Submit { form: p.form });
    c.dispatch(&mut p.doc, Event::Submit { form: p.form });

    assert!(p.doc.has_class(p.name_field, "error"));
    assert!(p.doc.has_class(p.email_field, "error"));
    assert!(p.doc.has_class(p.phone_field, "error"));
    assert_eq!(p.doc.nodes_with_class("error-message").len(), 3);
    // Submission never started.
    assert_eq!(p.doc.attr(p.submit, "disabled"), None);
    assert_eq!(c.active_toast(), None);
}

#[test]
fn editing_a_field_clears_its_annotation_optimistically() {
    let mut p = page();
    let mut c = controller(&mut p);
    c.dispatch(&mut p.doc, Event::Submit { form: p.form });
    assert!(p.doc.has_class(p.name_field, "error"));

    c.dispatch(&mut p.doc, Event::Input { field: p.name_field });
    assert!(!p.doc.has_class(p.name_field, "error"));
    assert_eq!(p.doc.nodes_with_class("error-message").len(), 0);
}

#[test]
fn refilled_field_validates_clean_on_next_submit() {
    let mut p = page();
    let mut c = controller(&mut p);
    c.dispatch(&mut p.doc, Event::Submit { form: p.form });
    assert_eq!(p.doc.nodes_with_class("error-message").len(), 1);

    p.doc.set_value(p.name_field, "Jordan");
    c.dispatch(&mut p.doc, Event::Submit { form: p.form });
    assert_eq!(p.doc.nodes_with_class("error-message").len(), 0);
    assert!(p.doc.attr(p.submit, "disabled").is_some());
}

#[test]
fn valid_submit_runs_the_full_simulated_flow() {
    let mut p = page();
    let mut c = controller(&mut p);
    p.doc.set_value(p.name_field, "Jordan");
    p.doc.set_value(p.email_field, "jordan@example.com");
    p.doc.set_value(p.phone_field, "+1 (555) 123-4567");

    c.dispatch(&mut p.doc, Event::Submit { form: p.form });
    assert!(p.doc.attr(p.submit, "disabled").is_some());
    assert!(p.doc.has_class(p.submit, "loading"));
    assert_eq!(p.doc.text(p.submit), "");

    // A re-submit while in flight is ignored.
    c.dispatch(&mut p.doc, Event::Submit { form: p.form });

    tick(&mut c, &mut p.doc, 1999);
    assert!(p.doc.attr(p.submit, "disabled").is_some());

    tick(&mut c, &mut p.doc, 1);
    assert_eq!(p.doc.attr(p.submit, "disabled"), None);
    assert!(!p.doc.has_class(p.submit, "loading"));
    assert_eq!(p.doc.text(p.submit), "Send");
    assert_eq!(p.doc.value(p.name_field), "");
    assert_eq!(p.doc.value(p.email_field), "");

    let toast = c.active_toast().unwrap();
    assert!(p.doc.has_class(toast, "success"));
    assert_eq!(p.doc.text(toast), "Success! Your form has been submitted.");
}

#[test]
fn submit_from_unbound_form_is_ignored() {
    let mut p = page();
    let mut c = controller(&mut p);
    let stray = p.doc.create_element("form");
    let root = p.doc.root();
    p.doc.append_child(root, stray);
    c.dispatch(&mut p.doc, Event::Submit { form: stray });
    assert_eq!(c.active_toast(), None);
}

// --- Notifications ---------------------------------------------------------

#[test]
fn newer_notification_supersedes_older() {
    let mut p = page();
    let mut c = controller(&mut p);

    c.notify(&mut p.doc, "X", Severity::Info);
    let first = c.active_toast().unwrap();
    tick(&mut c, &mut p.doc, 1000);
    c.notify(&mut p.doc, "Y", Severity::Error);

    let second = c.active_toast().unwrap();
    assert!(!p.doc.exists(first));
    assert_eq!(p.doc.text(second), "Y");
    assert_eq!(p.doc.nodes_with_class("notification").len(), 1);

    // Past the first toast's would-be TTL: the survivor is untouched.
    tick(&mut c, &mut p.doc, 2000);
    assert!(p.doc.exists(second));
    assert!(!p.doc.has_class(second, "fade-out"));

    // The second dismisses on its own schedule: fade, then removal.
    tick(&mut c, &mut p.doc, 1000);
    assert!(p.doc.has_class(second, "fade-out"));
    tick(&mut c, &mut p.doc, 300);
    assert!(!p.doc.exists(second));
    assert_eq!(c.active_toast(), None);
}

// --- Setup -----------------------------------------------------------------

#[test]
fn bare_page_dispatches_safely() {
    let mut doc = Document::new();
    let mut c =
        Controller::new(&mut doc, PageBindings::new(), None, MemoryPrefs::new()).unwrap();
    c.dispatch(&mut doc, Event::PointerDown { target: None });
    c.dispatch(&mut doc, Event::Scroll { y: 500 });
    c.dispatch(&mut doc, Event::Tick(Duration::from_millis(500)));
    assert!(!c.state().navbar_scrolled);
}

#[test]
fn binding_a_removed_node_fails_setup() {
    let mut p = page();
    p.doc.remove(p.navbar);
    let b = bindings(&p);
    let err = Controller::new(&mut p.doc, b, None, MemoryPrefs::new()).unwrap_err();
    assert_eq!(err.to_string(), "binding \"navbar\" references a missing element");
}
