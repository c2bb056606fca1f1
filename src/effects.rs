//! Decorative collaborators: scroll progress, starfield, floating
//! particles, confetti bursts, the first-visit loader, and reveal-on-scroll.
//! All of it is fire-and-forget with no data model; nothing here may touch
//! navigation state.

use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;

#[cfg(target_arch = "wasm32")]
use crate::scrollspy::ScrollThrottle;

#[cfg(target_arch = "wasm32")]
const PARTICLE_GLYPHS: &[&str] = &["✨", "💫", "⭐", "🌟"];
#[cfg(target_arch = "wasm32")]
const PARTICLE_INTERVAL_MS: i32 = 2_000;
#[cfg(target_arch = "wasm32")]
const PARTICLE_INTERVAL_REDUCED_MS: i32 = 5_000;
#[cfg(target_arch = "wasm32")]
const PARTICLE_LIFETIME_MS: u32 = 5_000;

#[cfg(target_arch = "wasm32")]
const CONFETTI_COLORS: &[&str] = &[
    "#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4", "#feca57", "#ff9ff3",
];
#[cfg(target_arch = "wasm32")]
const CONFETTI_COUNT: usize = 50;
#[cfg(target_arch = "wasm32")]
const CONFETTI_LIFETIME_MS: u32 = 4_000;

#[cfg(target_arch = "wasm32")]
const LOADER_FIRST_VISIT_MS: u32 = 2_000;
#[cfg(target_arch = "wasm32")]
const LOADER_REVISIT_MS: u32 = 600;
#[cfg(target_arch = "wasm32")]
const LOADER_FADE_MS: u32 = 550;
#[cfg(target_arch = "wasm32")]
const VISITED_STORAGE_KEY: &str = "portfolio.visited";

/// Whether the visitor asked the platform for less motion. Decorative
/// subsystems thin themselves out when this holds.
pub fn reduced_motion() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|window| window.match_media("(prefers-reduced-motion: reduce)").ok())
            .flatten()
            .map(|query| query.matches())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        false
    }
}

/// Scroll progress as a percentage of the scrollable distance.
pub fn scroll_percent(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let track = scroll_height - viewport_height;
    if track <= 0.0 {
        return 0.0;
    }
    (scroll_top / track * 100.0).clamp(0.0, 100.0)
}

#[cfg(target_arch = "wasm32")]
struct ProgressListeners {
    scroll: Rc<wasm_bindgen::closure::Closure<dyn FnMut()>>,
    _frame: Rc<wasm_bindgen::closure::Closure<dyn FnMut()>>,
}

#[component]
pub fn ScrollProgressBar() -> Element {
    let progress = use_signal(|| 0.0f64);
    #[cfg(target_arch = "wasm32")]
    let mut listeners = use_signal(|| None::<ProgressListeners>);

    #[cfg(target_arch = "wasm32")]
    {
        use_effect(move || {
            if listeners.read().is_some() {
                return;
            }
            let Some(window) = web_sys::window() else {
                return;
            };
            use wasm_bindgen::closure::Closure;

            let throttle = Rc::new(RefCell::new(ScrollThrottle::new()));

            let frame_throttle = throttle.clone();
            let mut frame_progress = progress;
            let frame = Rc::new(Closure::wrap(Box::new(move || {
                if let Some(percent) = measure_scroll_percent() {
                    frame_progress.set(percent);
                }
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

            let _ = window.add_event_listener_with_callback(
                "scroll",
                on_scroll.as_ref().as_ref().unchecked_ref(),
            );
            listeners.set(Some(ProgressListeners {
                scroll: on_scroll,
                _frame: frame,
            }));
        });

        let listeners = listeners;
        use_drop(move || {
            if let Some(wired) = listeners.read().as_ref() {
                if let Some(window) = web_sys::window() {
                    let _ = window.remove_event_listener_with_callback(
                        "scroll",
                        wired.scroll.as_ref().as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    rsx! {
        div { class: "scroll-progress", style: "width: {progress()}%;" }
    }
}

#[cfg(target_arch = "wasm32")]
fn measure_scroll_percent() -> Option<f64> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let root = document.document_element()?;
    let scroll_top = window.scroll_y().unwrap_or(0.0);
    let viewport = window.inner_height().ok()?.as_f64()?;
    Some(scroll_percent(
        scroll_top,
        root.scroll_height() as f64,
        viewport,
    ))
}

#[derive(Clone, Debug, PartialEq)]
struct Star {
    left: f64,
    top: f64,
    size: f64,
    delay: f64,
}

fn generate_stars(count: usize) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            left: rand_unit() * 100.0,
            top: rand_unit() * 100.0,
            size: rand_unit() * 3.0 + 1.0,
            delay: rand_unit() * 3.0,
        })
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn rand_unit() -> f64 {
    js_sys::Math::random()
}

// Deterministic stand-in so host builds render a stable field.
#[cfg(not(target_arch = "wasm32"))]
fn rand_unit() -> f64 {
    use std::cell::Cell;
    thread_local! {
        static STATE: Cell<u64> = const { Cell::new(0x2545_f491_4f6c_dd1d) };
    }
    STATE.with(|state| {
        let mut x = state.get();
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        state.set(x);
        (x >> 11) as f64 / (1u64 << 53) as f64
    })
}

#[component]
pub fn StarField() -> Element {
    let stars = use_signal(|| {
        let count = if reduced_motion() { 60 } else { 100 };
        generate_stars(count)
    });
    let star_list = stars();
    rsx! {
        div { class: "stars-container", aria_hidden: "true",
            for star in star_list.iter() {
                div {
                    class: "star",
                    style: "left: {star.left:.2}%; top: {star.top:.2}%; width: {star.size:.2}px; height: {star.size:.2}px; animation-delay: {star.delay:.2}s;",
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
struct IntervalHandle {
    id: i32,
    _closure: Rc<wasm_bindgen::closure::Closure<dyn FnMut()>>,
}

#[component]
pub fn FloatingParticles() -> Element {
    #[cfg(target_arch = "wasm32")]
    {
        let mut interval = use_signal(|| None::<IntervalHandle>);
        use_effect(move || {
            if interval.read().is_some() {
                return;
            }
            let Some(window) = web_sys::window() else {
                return;
            };
            use wasm_bindgen::closure::Closure;
            let period = if reduced_motion() {
                PARTICLE_INTERVAL_REDUCED_MS
            } else {
                PARTICLE_INTERVAL_MS
            };
            let closure = Rc::new(Closure::wrap(
                Box::new(spawn_floating_particle) as Box<dyn FnMut()>
            ));
            if let Ok(id) = window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().as_ref().unchecked_ref(),
                period,
            ) {
                interval.set(Some(IntervalHandle {
                    id,
                    _closure: closure,
                }));
            }
        });

        let interval = interval;
        use_drop(move || {
            if let Some(handle) = interval.read().as_ref() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(handle.id);
                }
            }
        });
    }
    rsx! {}
}

#[cfg(target_arch = "wasm32")]
fn spawn_floating_particle() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let Some(particle) = document
        .create_element("div")
        .ok()
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return;
    };
    let glyph = PARTICLE_GLYPHS[(rand_unit() * PARTICLE_GLYPHS.len() as f64) as usize
        % PARTICLE_GLYPHS.len()];
    particle.set_text_content(Some(glyph));
    let viewport_width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let viewport_height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    particle.style().set_css_text(&format!(
        "position: fixed; left: {:.0}px; top: {:.0}px; font-size: {:.0}px; opacity: {:.2}; \
         pointer-events: none; z-index: 9999; animation: float-particle {:.1}s linear forwards;",
        rand_unit() * viewport_width,
        viewport_height,
        rand_unit() * 20.0 + 15.0,
        rand_unit() * 0.5 + 0.3,
        rand_unit() * 3.0 + 2.0,
    ));
    if body.append_child(&particle).is_err() {
        return;
    }
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(PARTICLE_LIFETIME_MS).await;
        particle.remove();
    });
}

/// Confetti burst wired to primary buttons. No-op when the platform asked
/// for reduced motion.
pub fn spawn_confetti() {
    #[cfg(target_arch = "wasm32")]
    {
        if reduced_motion() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(body) = document.body() else {
            return;
        };
        let viewport_width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        for _ in 0..CONFETTI_COUNT {
            let Some(piece) = document
                .create_element("div")
                .ok()
                .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
            else {
                continue;
            };
            let color = CONFETTI_COLORS
                [(rand_unit() * CONFETTI_COLORS.len() as f64) as usize % CONFETTI_COLORS.len()];
            let size = rand_unit() * 10.0 + 5.0;
            piece.style().set_css_text(&format!(
                "position: fixed; width: {size:.0}px; height: {size:.0}px; background: {color}; \
                 top: -10px; left: {:.0}px; border-radius: 50%; pointer-events: none; \
                 z-index: 9999; animation: confetti-fall {:.1}s linear forwards;",
                rand_unit() * viewport_width,
                rand_unit() * 2.0 + 2.0,
            ));
            if body.append_child(&piece).is_err() {
                continue;
            }
            wasm_bindgen_futures::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(CONFETTI_LIFETIME_MS).await;
                piece.remove();
            });
        }
    }
}

#[component]
pub fn FirstVisitLoader() -> Element {
    let visible = use_signal(initial_loader_visibility);
    #[cfg(target_arch = "wasm32")]
    {
        let mut started = use_signal(|| false);
        use_effect(move || {
            if started() || !*visible.peek() {
                return;
            }
            started.set(true);

            use gloo_storage::{LocalStorage, Storage};
            let revisit = LocalStorage::get::<bool>(VISITED_STORAGE_KEY).unwrap_or(false);
            let _ = LocalStorage::set(VISITED_STORAGE_KEY, true);
            let hold = if revisit {
                LOADER_REVISIT_MS
            } else {
                LOADER_FIRST_VISIT_MS
            };
            tracing::debug!("loader: hold for {hold}ms (revisit: {revisit})");

            set_body_overflow(Some("hidden"));
            let mut loader_visible = visible;
            wasm_bindgen_futures::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(hold).await;
                if !reduced_motion() {
                    spawn_petal_burst();
                }
                gloo_timers::future::TimeoutFuture::new(LOADER_FADE_MS).await;
                set_body_overflow(None);
                loader_visible.set(false);
            });
        });
    }

    if !visible() {
        return rsx! {};
    }
    rsx! {
        div { class: "first-visit-loader", aria_hidden: "true",
            div { class: "loader-bloom",
                span { "✳" }
            }
        }
    }
}

fn initial_loader_visibility() -> bool {
    cfg!(target_arch = "wasm32")
}

#[cfg(target_arch = "wasm32")]
fn set_body_overflow(value: Option<&str>) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };
    match value {
        Some(value) => {
            let _ = body.style().set_property("overflow", value);
        }
        None => {
            let _ = body.style().remove_property("overflow");
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn spawn_petal_burst() {
    const GLYPHS: &[&str] = &["✦", "✧", "✳", "❋", "✹"];
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let center_x = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) / 2.0;
    let center_y = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) / 2.0;
    for index in 0..60usize {
        let Some(petal) = document
            .create_element("span")
            .ok()
            .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
        else {
            continue;
        };
        petal.set_text_content(Some(GLYPHS[index % GLYPHS.len()]));
        let angle = rand_unit() * std::f64::consts::TAU;
        let distance = 120.0 + rand_unit() * 180.0;
        petal.set_class_name("petal");
        let style = petal.style();
        style.set_css_text(&format!(
            "left: {center_x:.0}px; top: {center_y:.0}px; font-size: {:.0}px;",
            rand_unit() * 18.0 + 16.0,
        ));
        let _ = style.set_property("--tx", &format!("{:.0}px", angle.cos() * distance));
        let _ = style.set_property("--ty", &format!("{:.0}px", angle.sin() * distance));
        if body.append_child(&petal).is_err() {
            continue;
        }
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(1_500).await;
            petal.remove();
        });
    }
}

#[cfg(target_arch = "wasm32")]
struct RevealHandle {
    observer: web_sys::IntersectionObserver,
    _callback: Rc<wasm_bindgen::closure::Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>>,
}

/// Adds the `visible` class to content cards as they enter the viewport.
/// Renders nothing; it only wires the observer after the sections mount.
#[component]
pub fn RevealObserver() -> Element {
    #[cfg(target_arch = "wasm32")]
    {
        let mut handle = use_signal(|| None::<RevealHandle>);
        use_effect(move || {
            if handle.read().is_some() {
                return;
            }
            let Some(document) = web_sys::window().and_then(|window| window.document()) else {
                return;
            };
            use wasm_bindgen::closure::Closure;
            use wasm_bindgen::JsValue;

            let callback = Rc::new(Closure::wrap(Box::new(
                move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
                    for entry in entries.iter() {
                        let entry: web_sys::IntersectionObserverEntry = entry.unchecked_into();
                        if entry.is_intersecting() {
                            let target = entry.target();
                            let _ = target.class_list().add_1("visible");
                            observer.unobserve(&target);
                        }
                    }
                },
            )
                as Box<dyn FnMut(_, _)>));

            let init = web_sys::IntersectionObserverInit::new();
            init.set_threshold(&JsValue::from_f64(0.1));
            init.set_root_margin("0px 0px -50px 0px");
            let Ok(observer) = web_sys::IntersectionObserver::new_with_options(
                callback.as_ref().as_ref().unchecked_ref(),
                &init,
            ) else {
                return;
            };

            if let Ok(nodes) = document
                .query_selector_all(".project-card, .about-content, .contact-content, .education-item")
            {
                for index in 0..nodes.length() {
                    if let Some(element) = nodes
                        .item(index)
                        .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
                    {
                        observer.observe(&element);
                    }
                }
            }

            handle.set(Some(RevealHandle {
                observer,
                _callback: callback,
            }));
        });

        let handle = handle;
        use_drop(move || {
            if let Some(wired) = handle.read().as_ref() {
                wired.observer.disconnect();
            }
        });
    }
    rsx! {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_percent_spans_the_track() {
        assert_eq!(scroll_percent(0.0, 3000.0, 800.0), 0.0);
        assert_eq!(scroll_percent(1100.0, 3000.0, 800.0), 50.0);
        assert_eq!(scroll_percent(2200.0, 3000.0, 800.0), 100.0);
    }

    #[test]
    fn scroll_percent_clamps_and_handles_short_pages() {
        assert_eq!(scroll_percent(9000.0, 3000.0, 800.0), 100.0);
        assert_eq!(scroll_percent(-5.0, 3000.0, 800.0), 0.0);
        // Page shorter than the viewport has no scrollable track.
        assert_eq!(scroll_percent(10.0, 700.0, 800.0), 0.0);
    }

    #[test]
    fn star_values_stay_in_range() {
        for star in generate_stars(200) {
            assert!((0.0..100.0).contains(&star.left));
            assert!((0.0..100.0).contains(&star.top));
            assert!((1.0..=4.0).contains(&star.size));
            assert!((0.0..3.0).contains(&star.delay));
        }
    }
}
