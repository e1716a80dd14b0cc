//! Hex Modals for the browser.
//!
//! A modal container is injected when a trigger link is clicked. Clicking a
//! trigger while the modal is open (for example a link inside the modal)
//! refills the same container. Content is the element with the configured
//! content class, taken from the page the trigger points to. Closing plays
//! the CSS closing animation and then removes the modal.
//!
//! Build for `wasm32-unknown-unknown`. From JavaScript:
//!
//! ```js
//! import init, { initModals } from "./hex_modal_web.js";
//! await init();
//! initModals({ modalClass: "modal" }, () => rebindForms());
//! ```

#![allow(clippy::missing_errors_doc)]

mod binder;
pub mod dom;
pub mod fetch;
mod runtime;
pub mod teardown;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use hex_modal_core::{ModalConfig, ModalController, ModalError, UiEvent};
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub use dom::DomHost;
use runtime::Modals;

/// Name of the global function called after content loads when no callback
/// is given to [`init_modals`].
pub const LEGACY_HOOK: &str = "modalLoaded";

struct Installed {
    modals: Rc<Modals>,
    _listeners: Vec<EventListener>,
}

thread_local! {
    static INSTALLED: RefCell<Option<Installed>> = const { RefCell::new(None) };
}

/// Sets up `tracing` output to the browser console. Safe to call repeatedly.
pub fn init_tracing() {
    console_error_panic_hook::set_once();

    let filter = EnvFilter::new("info,hex_modal_core=info,hex_modal_web=info");
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(filter);

    // Another subscriber may already be installed by the host page.
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

/// Binds the modal listeners to the current document.
///
/// `on_loaded` runs after each successful content insertion. Only one
/// installation per page is allowed.
pub fn install(
    config: ModalConfig,
    on_loaded: Option<Box<dyn FnMut()>>,
) -> Result<(), ModalError> {
    if INSTALLED.with(|installed| installed.borrow().is_some()) {
        return Err(ModalError::AlreadyInstalled);
    }

    let document = gloo::utils::document();
    let host = DomHost::new(document.clone(), &config)?;
    let controller = ModalController::new(config, host)?;

    let modals = Modals::new(controller, on_loaded);
    let listeners = binder::bind(&document, &modals);
    info!(
        "Modals installed on `{}` for `.{}` triggers",
        modals.config().append_target,
        modals.config().trigger_class
    );

    INSTALLED.with(|installed| {
        *installed.borrow_mut() = Some(Installed {
            modals,
            _listeners: listeners,
        });
    });
    Ok(())
}

/// Starts closing the open modal, if any.
pub fn close() {
    let modals =
        INSTALLED.with(|installed| installed.borrow().as_ref().map(|i| Rc::clone(&i.modals)));
    match modals {
        Some(modals) => modals.dispatch(UiEvent::CloseButton),
        None => warn!("close() called before install()"),
    }
}

/// Wraps a JS function as the post-load hook.
///
/// Runs on the next microtask so the hook may itself open or close modals.
fn js_hook(hook: Option<js_sys::Function>) -> Box<dyn FnMut()> {
    Box::new(move || {
        let hook = hook.clone().or_else(legacy_hook);
        if let Some(hook) = hook {
            spawn_local(async move {
                if let Err(e) = hook.call0(&JsValue::NULL) {
                    warn!("Modal loaded hook threw: {e:?}");
                }
            });
        }
    })
}

/// Looks up `window.modalLoaded` at call time.
fn legacy_hook() -> Option<js_sys::Function> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str(LEGACY_HOOK))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()
}

/// JS entry point. `config` may be omitted or partial.
#[wasm_bindgen(js_name = initModals)]
pub fn init_modals(config: JsValue, on_loaded: Option<js_sys::Function>) -> Result<(), JsValue> {
    init_tracing();

    let config: ModalConfig = if config.is_undefined() || config.is_null() {
        ModalConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid modal configuration: {e}")))?
    };

    install(config, Some(js_hook(on_loaded))).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen(js_name = closeModal)]
pub fn close_modal() {
    close();
}
