use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
use crate::notify::Notice;
use crate::scrollspy::DEFAULT_SECTION_ID;
#[cfg(target_arch = "wasm32")]
use crate::scrollspy::{active_section, ScrollThrottle, SectionSpan};

pub const NAVBAR_ID: &str = "site-navbar";

/// Pixels the smooth scroll stops short of a section so the fixed navbar
/// does not cover its heading.
#[cfg(target_arch = "wasm32")]
const NAV_SCROLL_OFFSET: f64 = 80.0;

/// Past this scroll position the navbar gets its `scrolled` styling.
#[cfg(target_arch = "wasm32")]
const SCROLLED_CLASS_THRESHOLD: f64 = 20.0;

#[cfg(target_arch = "wasm32")]
const ENFORCE_INTERVAL_MS: u32 = 2_000;
#[cfg(target_arch = "wasm32")]
const ENFORCE_RETRY_DELAY_MS: u32 = 100;
#[cfg(target_arch = "wasm32")]
const ENFORCE_RETRY_ATTEMPTS: u32 = 20;
#[cfg(target_arch = "wasm32")]
const ENFORCE_STARTUP_DELAY_MS: u32 = 500;

pub const NAV_LINKS: &[(&str, &str)] = &[
    ("home", "Home"),
    ("about", "About"),
    ("projects", "Projects"),
    ("education", "Education"),
    ("contact", "Contact"),
];

/// Style properties that must always hold for the navbar element. Other
/// page code toggling any of these off gets converged back by the
/// enforcement interval and the mutation observer.
pub const NAVBAR_STYLE_POLICY: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "0px"),
    ("left", "0px"),
    ("right", "0px"),
    ("width", "100%"),
    ("z-index", "99999"),
    ("display", "block"),
    ("visibility", "visible"),
    ("opacity", "1"),
    ("margin", "0px"),
];

/// Applies [`NAVBAR_STYLE_POLICY`] through the given accessors, writing a
/// property only when its current value differs. Returns the number of
/// writes performed, so a second application right after a first one
/// reports zero.
pub fn apply_navbar_policy<C, S>(mut current: C, mut set: S) -> usize
where
    C: FnMut(&str) -> String,
    S: FnMut(&str, &str),
{
    let mut writes = 0;
    for (property, value) in NAVBAR_STYLE_POLICY.iter().copied() {
        if current(property) != value {
            set(property, value);
            writes += 1;
        }
    }
    writes
}

/// Mobile menu state. Opening locks page scroll; closing restores it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, MenuState::Open)
    }

    /// The `overflow` value the body needs under this state, `None` meaning
    /// the property is removed entirely.
    pub fn scroll_lock(self) -> Option<&'static str> {
        match self {
            MenuState::Open => Some("hidden"),
            MenuState::Closed => None,
        }
    }
}

/// Menu and active-link state behind the nav controls. Link clicks, Escape,
/// and outside clicks all go through here so the dismissal paths cannot
/// drift apart.
#[derive(Clone, Debug, PartialEq)]
pub struct NavState {
    pub menu: MenuState,
    pub active: String,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            menu: MenuState::Closed,
            active: DEFAULT_SECTION_ID.to_string(),
        }
    }
}

impl NavState {
    /// Link click: the menu closes and the clicked link becomes active
    /// immediately, before any smooth scroll settles.
    pub fn select(&mut self, id: &str) {
        self.menu = MenuState::Closed;
        self.active = id.to_string();
    }

    /// Escape or outside-click dismissal. Returns whether the menu was open
    /// and is now closed.
    pub fn dismiss_menu(&mut self) -> bool {
        if self.menu.is_open() {
            self.menu = MenuState::Closed;
            true
        } else {
            false
        }
    }

    pub fn toggle_menu(&mut self) {
        self.menu = self.menu.toggled();
    }
}

#[cfg(target_arch = "wasm32")]
struct NavbarListeners {
    scroll: Rc<wasm_bindgen::closure::Closure<dyn FnMut()>>,
    _frame: Rc<wasm_bindgen::closure::Closure<dyn FnMut()>>,
    keydown: Rc<wasm_bindgen::closure::Closure<dyn FnMut(web_sys::KeyboardEvent)>>,
    outside_click: Rc<wasm_bindgen::closure::Closure<dyn FnMut(web_sys::Event)>>,
}

#[cfg(target_arch = "wasm32")]
struct EnforcementHandle {
    interval_id: i32,
    _tick: Rc<wasm_bindgen::closure::Closure<dyn FnMut()>>,
    observer: web_sys::MutationObserver,
    _on_mutate: Rc<wasm_bindgen::closure::Closure<dyn FnMut()>>,
}

#[component]
pub fn Navbar() -> Element {
    let nav = use_signal(NavState::default);
    let scrolled = use_signal(|| false);
    #[cfg(target_arch = "wasm32")]
    let notices = use_context::<Signal<Option<Notice>>>();
    #[cfg(target_arch = "wasm32")]
    let mut listeners = use_signal(|| None::<NavbarListeners>);
    #[cfg(target_arch = "wasm32")]
    let mut enforcement = use_signal(|| None::<EnforcementHandle>);

    #[cfg(target_arch = "wasm32")]
    {
        use_effect(move || {
            if listeners.read().is_some() {
                return;
            }
            tracing::debug!("navbar: wire listeners");
            let Some(window) = web_sys::window() else {
                return;
            };
            let Some(document) = window.document() else {
                return;
            };
            use wasm_bindgen::closure::Closure;

            let throttle = Rc::new(RefCell::new(ScrollThrottle::new()));

            let frame_throttle = throttle.clone();
            let frame_nav = nav;
            let frame_scrolled = scrolled;
            let frame = Rc::new(Closure::wrap(Box::new(move || {
                update_active_link(frame_nav);
                update_scrolled_class(frame_scrolled);
                frame_throttle.borrow_mut().frame_done();
            }) as Box<dyn FnMut()>));

            let scroll_throttle = throttle.clone();
            let scroll_frame = frame.clone();
            let on_scroll = Rc::new(Closure::wrap(Box::new(move || {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let scroll_top = window.scroll_y().unwrap_or(0.0);
                if !scroll_throttle.borrow_mut().should_schedule(scroll_top) {
                    return;
                }
                if window
                    .request_animation_frame(scroll_frame.as_ref().as_ref().unchecked_ref())
                    .is_err()
                {
                    scroll_throttle.borrow_mut().frame_done();
                }
            }) as Box<dyn FnMut()>));

            let mut key_nav = nav;
            let mut key_notices = notices;
            let on_keydown = Rc::new(Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
                if event.key() != "Escape" {
                    return;
                }
                let mut state = key_nav.peek().clone();
                if state.dismiss_menu() {
                    key_nav.set(state);
                    apply_scroll_lock(MenuState::Closed);
                }
                if key_notices.peek().is_some() {
                    key_notices.set(None);
                }
            }) as Box<dyn FnMut(_)>));

            let mut click_nav = nav;
            let on_outside_click = Rc::new(Closure::wrap(Box::new(move |event: web_sys::Event| {
                if !click_nav.peek().menu.is_open() {
                    return;
                }
                let inside = event
                    .target()
                    .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
                    .and_then(|element| element.closest(&format!("#{NAVBAR_ID}")).ok().flatten())
                    .is_some();
                if !inside {
                    let mut state = click_nav.peek().clone();
                    if state.dismiss_menu() {
                        click_nav.set(state);
                        apply_scroll_lock(MenuState::Closed);
                    }
                }
            }) as Box<dyn FnMut(_)>));

            let _ = window.add_event_listener_with_callback(
                "scroll",
                on_scroll.as_ref().as_ref().unchecked_ref(),
            );
            let _ = document.add_event_listener_with_callback(
                "keydown",
                on_keydown.as_ref().as_ref().unchecked_ref(),
            );
            let _ = document.add_event_listener_with_callback(
                "click",
                on_outside_click.as_ref().as_ref().unchecked_ref(),
            );

            // Initial state before the first scroll event arrives.
            update_active_link(nav);
            update_scrolled_class(scrolled);

            listeners.set(Some(NavbarListeners {
                scroll: on_scroll,
                _frame: frame,
                keydown: on_keydown,
                outside_click: on_outside_click,
            }));
        });

        use_effect(move || {
            if enforcement.read().is_some() {
                return;
            }
            let Some(window) = web_sys::window() else {
                return;
            };
            use wasm_bindgen::closure::Closure;

            enforce_visibility(ENFORCE_RETRY_ATTEMPTS);
            wasm_bindgen_futures::spawn_local(async {
                gloo_timers::future::TimeoutFuture::new(ENFORCE_STARTUP_DELAY_MS).await;
                enforce_visibility(ENFORCE_RETRY_ATTEMPTS);
            });

            let tick = Rc::new(Closure::wrap(Box::new(move || {
                enforce_visibility(0);
            }) as Box<dyn FnMut()>));
            let Ok(interval_id) = window.set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().as_ref().unchecked_ref(),
                ENFORCE_INTERVAL_MS as i32,
            ) else {
                return;
            };

            let on_mutate = Rc::new(Closure::wrap(Box::new(move || {
                enforce_visibility(0);
            }) as Box<dyn FnMut()>));
            let Ok(observer) =
                web_sys::MutationObserver::new(on_mutate.as_ref().as_ref().unchecked_ref())
            else {
                window.clear_interval_with_handle(interval_id);
                return;
            };
            if let Some(element) = window
                .document()
                .and_then(|document| document.get_element_by_id(NAVBAR_ID))
            {
                let init = web_sys::MutationObserverInit::new();
                init.set_attributes(true);
                let _ = observer.observe_with_options(&element, &init);
            }

            enforcement.set(Some(EnforcementHandle {
                interval_id,
                _tick: tick,
                observer,
                _on_mutate: on_mutate,
            }));
        });

        let listeners = listeners;
        let enforcement = enforcement;
        use_drop(move || {
            if let Some(window) = web_sys::window() {
                if let Some(wired) = listeners.read().as_ref() {
                    let _ = window.remove_event_listener_with_callback(
                        "scroll",
                        wired.scroll.as_ref().as_ref().unchecked_ref(),
                    );
                    if let Some(document) = window.document() {
                        let _ = document.remove_event_listener_with_callback(
                            "keydown",
                            wired.keydown.as_ref().as_ref().unchecked_ref(),
                        );
                        let _ = document.remove_event_listener_with_callback(
                            "click",
                            wired.outside_click.as_ref().as_ref().unchecked_ref(),
                        );
                    }
                }
                if let Some(handle) = enforcement.read().as_ref() {
                    window.clear_interval_with_handle(handle.interval_id);
                    handle.observer.disconnect();
                }
            }
        });
    }

    let navbar_class = if scrolled() { "navbar scrolled" } else { "navbar" };
    let menu_open = nav().menu.is_open();
    let menu_class = if menu_open { "nav-menu active" } else { "nav-menu" };
    let hamburger_class = if menu_open {
        "hamburger active"
    } else {
        "hamburger"
    };

    rsx! {
        nav { id: NAVBAR_ID, class: navbar_class, aria_label: "Main navigation",
            div { class: "nav-container",
                a {
                    href: "#home",
                    class: "nav-logo",
                    onclick: move |event| {
                        event.prevent_default();
                        navigate_to("home", nav);
                    },
                    "stellar.dev"
                }
                button {
                    r#type: "button",
                    class: hamburger_class,
                    aria_label: "Toggle navigation menu",
                    aria_expanded: if menu_open { "true" } else { "false" },
                    onclick: move |_| toggle_menu(nav),
                    span { class: "bar" }
                    span { class: "bar" }
                    span { class: "bar" }
                }
                ul { class: menu_class,
                    for (id, label) in NAV_LINKS.iter().copied() {
                        li { class: "nav-item",
                            a {
                                href: "#{id}",
                                class: if nav().active == id { "nav-link active" } else { "nav-link" },
                                onclick: move |event| {
                                    event.prevent_default();
                                    navigate_to(id, nav);
                                },
                                "{label}"
                            }
                        }
                    }
                }
            }
        }
    }
}

fn toggle_menu(mut nav: Signal<NavState>) {
    let mut state = nav.peek().clone();
    state.toggle_menu();
    let next = state.menu;
    nav.set(state);
    apply_scroll_lock(next);
}

/// Anchor-link navigation: [`NavState::select`] closes the menu and marks
/// the link active right away instead of waiting for the scroll-driven
/// recomputation to catch up, then the viewport smooth-scrolls over.
fn navigate_to(id: &str, mut nav: Signal<NavState>) {
    let mut state = nav.peek().clone();
    let was_open = state.menu.is_open();
    state.select(id);
    nav.set(state);
    if was_open {
        apply_scroll_lock(MenuState::Closed);
    }
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(target) = window
            .document()
            .and_then(|document| document.get_element_by_id(id))
            .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
        else {
            return;
        };
        let options = web_sys::ScrollToOptions::new();
        options.set_top((target.offset_top() as f64 - NAV_SCROLL_OFFSET).max(0.0));
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

fn apply_scroll_lock(state: MenuState) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(body) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.body())
        else {
            return;
        };
        let style = body.style();
        match state.scroll_lock() {
            Some(value) => {
                let _ = style.set_property("overflow", value);
            }
            None => {
                let _ = style.remove_property("overflow");
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = state;
    }
}

/// Converges the navbar element's inline style to [`NAVBAR_STYLE_POLICY`].
/// Safe to call from any trigger, any number of times, in any order. When
/// the element is not in the DOM yet (load-order race), retries after a
/// short delay up to `attempts_left` times.
#[cfg(target_arch = "wasm32")]
pub fn enforce_visibility(attempts_left: u32) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let element = document
        .get_element_by_id(NAVBAR_ID)
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok());
    match element {
        Some(element) => {
            let style = element.style();
            let read = style.clone();
            apply_navbar_policy(
                move |property| read.get_property_value(property).unwrap_or_default(),
                move |property, value| {
                    let _ = style.set_property_with_priority(property, value, "important");
                },
            );
        }
        None if attempts_left > 0 => {
            wasm_bindgen_futures::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(ENFORCE_RETRY_DELAY_MS).await;
                enforce_visibility(attempts_left - 1);
            });
        }
        None => {
            tracing::warn!("navbar: element never appeared, enforcement abandoned");
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn measure_sections(document: &web_sys::Document) -> Vec<SectionSpan> {
    let Ok(nodes) = document.query_selector_all("section[id]") else {
        return Vec::new();
    };
    let mut sections = Vec::with_capacity(nodes.length() as usize);
    for index in 0..nodes.length() {
        let Some(element) = nodes
            .item(index)
            .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        else {
            continue;
        };
        sections.push(SectionSpan::new(
            element.id(),
            element.offset_top() as f64,
            element.offset_height() as f64,
        ));
    }
    sections
}

#[cfg(target_arch = "wasm32")]
fn update_active_link(mut nav: Signal<NavState>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let sections = measure_sections(&document);
    if let Some(id) = active_section(&sections, scroll_y) {
        if nav.peek().active != id {
            nav.write().active = id.to_string();
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn update_scrolled_class(mut scrolled: Signal<bool>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let is_scrolled = window.scroll_y().unwrap_or(0.0) > SCROLLED_CLASS_THRESHOLD;
    if *scrolled.peek() != is_scrolled {
        scrolled.set(is_scrolled);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn enforce_into(styles: &mut BTreeMap<String, String>) -> usize {
        let snapshot = styles.clone();
        apply_navbar_policy(
            move |property| snapshot.get(property).cloned().unwrap_or_default(),
            |property, value| {
                styles.insert(property.to_string(), value.to_string());
            },
        )
    }

    #[test]
    fn policy_enforcement_is_idempotent() {
        let mut styles = BTreeMap::new();
        let first = enforce_into(&mut styles);
        assert_eq!(first, NAVBAR_STYLE_POLICY.len());
        let after_first = styles.clone();
        let second = enforce_into(&mut styles);
        assert_eq!(second, 0);
        assert_eq!(styles, after_first);
    }

    #[test]
    fn policy_heals_external_mutation() {
        let mut styles = BTreeMap::new();
        enforce_into(&mut styles);
        styles.insert("display".to_string(), "none".to_string());
        styles.insert("opacity".to_string(), "0".to_string());
        let writes = enforce_into(&mut styles);
        assert_eq!(writes, 2);
        assert_eq!(styles.get("display").map(String::as_str), Some("block"));
        assert_eq!(styles.get("opacity").map(String::as_str), Some("1"));
    }

    #[test]
    fn menu_toggle_is_its_own_inverse() {
        let initial = MenuState::Closed;
        let opened = initial.toggled();
        assert!(opened.is_open());
        assert_eq!(opened.scroll_lock(), Some("hidden"));
        let closed = opened.toggled();
        assert_eq!(closed, initial);
        assert_eq!(closed.scroll_lock(), initial.scroll_lock());
    }

    #[test]
    fn link_click_closes_menu_and_activates_target() {
        let mut nav = NavState::default();
        nav.toggle_menu();
        assert!(nav.menu.is_open());

        // Selection takes effect in the same step, no scroll needed.
        nav.select("projects");
        assert_eq!(nav.menu, MenuState::Closed);
        assert_eq!(nav.active, "projects");
    }

    #[test]
    fn escape_dismisses_only_an_open_menu() {
        let mut nav = NavState::default();
        assert!(!nav.dismiss_menu());
        assert_eq!(nav, NavState::default());

        nav.toggle_menu();
        assert!(nav.dismiss_menu());
        assert_eq!(nav.menu, MenuState::Closed);
        // Dismissal leaves the active link alone.
        assert_eq!(nav.active, DEFAULT_SECTION_ID);
    }

    #[test]
    fn nav_links_cover_unique_sections() {
        let mut ids: Vec<&str> = NAV_LINKS.iter().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), NAV_LINKS.len());
        assert!(NAV_LINKS.iter().any(|(id, _)| *id == DEFAULT_SECTION_ID));
    }
}
