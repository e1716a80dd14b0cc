//! Runs the controller against the live page.
//!
//! Event handlers call [`Modals::dispatch`]; the resulting [`Command`] is
//! carried out here by spawning the fetch or arming the close watch. No
//! `RefCell` borrow is held across an `.await` or while the post-load hook
//! runs, so the hook may dispatch events itself.

use std::cell::RefCell;
use std::rc::Rc;

use hex_modal_core::{
    Command, Fragment, InstanceId, LoadJob, LoadOutcome, LoadTicket, ModalConfig,
    ModalController, ModalError, UiEvent,
};
use tracing::{debug, error};
use wasm_bindgen_futures::spawn_local;
use web_sys::AbortController;

use crate::dom::DomHost;
use crate::fetch::fetch_fragment;
use crate::teardown::{CloseWatch, animation_name, starts_animation};

struct InFlight {
    ticket: LoadTicket,
    abort: AbortController,
}

pub type LoadedHook = Box<dyn FnMut()>;

pub struct Modals {
    config: Rc<ModalConfig>,
    on_loaded: RefCell<Option<LoadedHook>>,
    controller: RefCell<ModalController<DomHost>>,
    inflight: RefCell<Option<InFlight>>,
    closing: RefCell<Option<CloseWatch>>,
}

impl Modals {
    /// `on_loaded` runs after each successful content insertion.
    pub fn new(controller: ModalController<DomHost>, on_loaded: Option<LoadedHook>) -> Rc<Self> {
        Rc::new(Self {
            config: Rc::new(controller.config().clone()),
            on_loaded: RefCell::new(on_loaded),
            controller: RefCell::new(controller),
            inflight: RefCell::new(None),
            closing: RefCell::new(None),
        })
    }

    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    pub fn is_present(&self) -> bool {
        self.controller.borrow().is_present()
    }

    /// Handles one UI event and starts whatever follows from it.
    pub fn dispatch(self: &Rc<Self>, event: UiEvent) {
        // Animation before the closing class goes on, to tell a new one apart.
        let before = match event {
            UiEvent::CloseButton | UiEvent::OutsideClick | UiEvent::Escape => {
                self.controller.borrow().element().and_then(animation_name)
            }
            _ => None,
        };

        let command = self.controller.borrow_mut().handle(event);
        match command {
            Ok(Command::Load(job)) => self.spawn_load(job),
            Ok(Command::AwaitClose(id)) => self.watch_close(id, before.as_deref()),
            Ok(Command::Nothing) => {}
            Err(e) => error!("Modal event failed: {e}"),
        }
    }

    fn abort_inflight(&self) {
        if let Some(previous) = self.inflight.borrow_mut().take() {
            debug!("Aborting superseded load {}", previous.ticket.instance);
            previous.abort.abort();
        }
    }

    fn spawn_load(self: &Rc<Self>, job: LoadJob) {
        self.abort_inflight();

        let abort = AbortController::new()
            .inspect_err(|e| error!("AbortController unavailable: {e:?}"))
            .ok();
        let signal = abort.as_ref().map(AbortController::signal);
        if let Some(abort) = abort {
            *self.inflight.borrow_mut() = Some(InFlight {
                ticket: job.ticket,
                abort,
            });
        }

        let this = Rc::clone(self);
        spawn_local(async move {
            let result = fetch_fragment(
                &job.location,
                &this.config.content_class,
                signal.as_ref(),
                this.config.fetch_timeout_ms,
            )
            .await;
            this.finish_load(job.ticket, result);
        });
    }

    fn finish_load(&self, ticket: LoadTicket, result: Result<Fragment, ModalError>) {
        {
            let mut inflight = self.inflight.borrow_mut();
            if inflight.as_ref().is_some_and(|f| f.ticket == ticket) {
                if let (Some(f), Err(ModalError::Timeout { .. })) = (inflight.take(), &result) {
                    f.abort.abort();
                }
            }
        }

        let outcome = self.controller.borrow_mut().complete_load(ticket, result);
        match outcome {
            Ok(LoadOutcome::Applied) => self.run_loaded_hook(),
            Ok(LoadOutcome::Stale) => debug!("Dropped stale load for {}", ticket.instance),
            Ok(LoadOutcome::Failed) => {}
            Err(e) => error!("Failed to update modal: {e}"),
        }
    }

    fn run_loaded_hook(&self) {
        // Taken out while it runs so a hook that triggers another load
        // doesn't find its own cell borrowed.
        let Some(mut hook) = self.on_loaded.borrow_mut().take() else {
            return;
        };
        hook();
        let mut slot = self.on_loaded.borrow_mut();
        if slot.is_none() {
            *slot = Some(hook);
        }
    }

    fn watch_close(self: &Rc<Self>, id: InstanceId, before: Option<&str>) {
        self.abort_inflight();

        let Some(modal) = self.controller.borrow().element().cloned() else {
            return;
        };
        if !starts_animation(&modal, before) {
            debug!("{id} has no closing animation");
            self.finish_close(id);
            return;
        }

        let weak = Rc::downgrade(self);
        let watch = CloseWatch::new(&modal, self.config.close_fallback_ms, move || {
            if let Some(this) = weak.upgrade() {
                this.finish_close(id);
            }
        });
        *self.closing.borrow_mut() = Some(watch);
    }

    fn finish_close(&self, id: InstanceId) {
        match self.controller.borrow_mut().finish_close(id) {
            Ok(true) => {
                // Called from inside one of the watch's own callbacks; drop it later.
                if let Some(watch) = self.closing.borrow_mut().take() {
                    spawn_local(async move { drop(watch) });
                }
            }
            Ok(false) => {}
            Err(e) => error!("Failed to remove modal: {e}"),
        }
    }
}
