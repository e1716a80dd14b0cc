//! Waiting for the closing animation.

use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::Element;

/// Prefixed and standard names of the animation-end event.
pub const ANIMATION_END_EVENTS: [&str; 4] = [
    "webkitAnimationEnd",
    "oanimationend",
    "msAnimationEnd",
    "animationend",
];

/// Listeners and fallback timer for one closing modal.
///
/// `on_done` may run more than once (one per alias that fires, plus the
/// timer); the controller removes the modal only on the first call.
/// Dropping the watch detaches everything.
pub struct CloseWatch {
    _listeners: Vec<EventListener>,
    _fallback: Option<Timeout>,
}

impl CloseWatch {
    pub fn new<F>(modal: &Element, fallback_ms: u32, on_done: F) -> Self
    where
        F: Fn() + 'static,
    {
        let on_done = Rc::new(on_done);

        let listeners = ANIMATION_END_EVENTS
            .iter()
            .map(|&name| {
                let on_done = Rc::clone(&on_done);
                let container = modal.clone();
                EventListener::new(modal, name, move |event| {
                    // Child animations bubble up here; only the container's own counts.
                    let own = event
                        .target()
                        .and_then(|t| t.dyn_into::<Element>().ok())
                        .is_some_and(|t| t == container);
                    if own {
                        on_done();
                    }
                })
            })
            .collect();

        let fallback = (fallback_ms > 0).then(|| {
            let on_done = Rc::clone(&on_done);
            Timeout::new(fallback_ms, move || on_done())
        });

        Self {
            _listeners: listeners,
            _fallback: fallback,
        }
    }
}

/// Computed `animation-name` of the element, `None` when it can't be read.
pub fn animation_name(element: &Element) -> Option<String> {
    let style = web_sys::window()?.get_computed_style(element).ok()??;
    style.get_property_value("animation-name").ok()
}

/// Whether applying the closing class started a new CSS animation.
///
/// `before` is the animation name read before the class went on. An
/// animation that was already running (a finished opening one, say) fires no
/// further animation-end, and neither does no animation at all, so callers
/// remove the modal right away in both cases.
pub fn starts_animation(element: &Element, before: Option<&str>) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Ok(Some(style)) = window.get_computed_style(element) else {
        return true;
    };
    let Ok(names) = style.get_property_value("animation-name") else {
        return true;
    };
    let duration = style
        .get_property_value("animation-duration")
        .unwrap_or_default();

    let named = names
        .split(',')
        .map(str::trim)
        .any(|name| !name.is_empty() && name != "none");
    let timed = duration.is_empty()
        || duration
            .split(',')
            .map(str::trim)
            .any(|d| d != "0s" && d != "0ms");
    let changed = before.is_none_or(|before| before != names);
    named && timed && changed
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use std::cell::Cell;

    use super::*;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
    use web_sys::Event;

    wasm_bindgen_test_configure!(run_in_browser);

    fn element() -> Element {
        let el = gloo::utils::document().create_element("div").unwrap();
        gloo::utils::body().append_child(&el).unwrap();
        el
    }

    #[wasm_bindgen_test]
    fn test_unstyled_element_has_no_animation() {
        let el = element();
        assert!(!starts_animation(&el, None));
        assert_eq!(animation_name(&el).as_deref(), Some("none"));
    }

    #[wasm_bindgen_test]
    fn test_finished_opening_animation_is_not_a_closing_one() {
        let el = element();
        el.set_attribute("style", "animation: hex-modal-open 1s").unwrap();
        let before = animation_name(&el);
        assert_eq!(before.as_deref(), Some("hex-modal-open"));

        // Closing class changes nothing about the animation.
        assert!(!starts_animation(&el, before.as_deref()));

        el.set_attribute("style", "animation: hex-modal-close 1s").unwrap();
        assert!(starts_animation(&el, before.as_deref()));
        assert!(starts_animation(&el, Some("none")));
    }

    #[wasm_bindgen_test]
    fn test_every_alias_reaches_callback() {
        let modal = element();
        let calls = Rc::new(Cell::new(0));
        let _watch = CloseWatch::new(&modal, 0, {
            let calls = calls.clone();
            move || calls.set(calls.get() + 1)
        });

        for name in ANIMATION_END_EVENTS {
            modal.dispatch_event(&Event::new(name).unwrap()).unwrap();
        }
        assert_eq!(calls.get(), 4);
    }

    #[wasm_bindgen_test]
    fn test_child_animation_is_ignored() {
        let modal = element();
        let child = gloo::utils::document().create_element("span").unwrap();
        modal.append_child(&child).unwrap();

        let calls = Rc::new(Cell::new(0));
        let _watch = CloseWatch::new(&modal, 0, {
            let calls = calls.clone();
            move || calls.set(calls.get() + 1)
        });

        let init = web_sys::EventInit::new();
        init.set_bubbles(true);
        let event = Event::new_with_event_init_dict("animationend", &init).unwrap();
        child.dispatch_event(&event).unwrap();
        assert_eq!(calls.get(), 0);
    }

    #[wasm_bindgen_test]
    async fn test_fallback_timer_fires() {
        let modal = element();
        let calls = Rc::new(Cell::new(0));
        let _watch = CloseWatch::new(&modal, 20, {
            let calls = calls.clone();
            move || calls.set(calls.get() + 1)
        });

        gloo::timers::future::TimeoutFuture::new(60).await;
        assert_eq!(calls.get(), 1);
    }

    #[wasm_bindgen_test]
    fn test_dropped_watch_detaches() {
        let modal = element();
        let calls = Rc::new(Cell::new(0));
        let watch = CloseWatch::new(&modal, 0, {
            let calls = calls.clone();
            move || calls.set(calls.get() + 1)
        });
        drop(watch);

        modal.dispatch_event(&Event::new("animationend").unwrap()).unwrap();
        assert_eq!(calls.get(), 0);
    }
}
