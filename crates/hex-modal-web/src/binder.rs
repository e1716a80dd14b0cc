//! Document-level listeners.
//!
//! Everything is delegated from the document because the modal does not
//! exist when the listeners are bound.

use std::rc::Rc;

use gloo::events::EventListener;
use hex_modal_core::{ClickTarget, ModalRequest, UiEvent, is_escape};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent};

use crate::runtime::Modals;

/// Binds the click and keyup listeners. They stay active while the returned
/// listeners are alive.
pub fn bind(document: &Document, modals: &Rc<Modals>) -> Vec<EventListener> {
    let click = {
        let modals = Rc::clone(modals);
        EventListener::new(document, "click", move |event| on_click(&modals, event))
    };
    let keyup = {
        let modals = Rc::clone(modals);
        EventListener::new(document, "keyup", move |event| on_keyup(&modals, event))
    };
    vec![click, keyup]
}

/// The click target followed by its ancestors.
fn ancestors(event: &Event) -> Vec<Element> {
    let mut chain = Vec::new();
    let mut current = event.target().and_then(|t| t.dyn_into::<Element>().ok());
    while let Some(element) = current {
        current = element.parent_element();
        chain.push(element);
    }
    chain
}

fn on_click(modals: &Rc<Modals>, event: &Event) {
    let config = modals.config();
    let chain = ancestors(event);
    let classes = chain
        .iter()
        .map(|el| el.get_attribute("class").unwrap_or_default());

    let ui_event = match ClickTarget::classify(config, classes) {
        ClickTarget::Trigger(depth) => {
            event.prevent_default();
            let Some(trigger) = chain.get(depth) else {
                return;
            };
            let request = ModalRequest::from_trigger(
                trigger.get_attribute("href").as_deref(),
                trigger.get_attribute(&config.type_attribute).as_deref(),
            );
            match request {
                Ok(request) => UiEvent::Trigger(request),
                Err(e) => {
                    warn!("Ignoring modal trigger: {e}");
                    return;
                }
            }
        }
        ClickTarget::CloseButton => UiEvent::CloseButton,
        ClickTarget::InsideModal => UiEvent::InsideClick,
        ClickTarget::Outside => {
            if !modals.is_present() {
                return;
            }
            UiEvent::OutsideClick
        }
    };

    modals.dispatch(ui_event);
}

fn on_keyup(modals: &Rc<Modals>, event: &Event) {
    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
        return;
    };
    #[allow(deprecated)]
    let key_code = event.key_code();
    if is_escape(&event.key(), key_code) {
        modals.dispatch(UiEvent::Escape);
    }
}
