//! Modal lifecycle.
//!
//! The controller owns the single modal instance and drives a [`ModalHost`]
//! through three states:
//!
//! - no modal (REMOVED)
//! - [`ModalPhase::Open`]: created by a trigger, updated in place by later triggers
//! - [`ModalPhase::Closing`]: closing class applied, waiting for the animation
//!
//! Asynchronous work (the content fetch, the animation wait) is performed by
//! the caller. The controller hands out a [`LoadJob`] or an [`InstanceId`] and
//! is told about completion through [`ModalController::complete_load`] and
//! [`ModalController::finish_close`]. Running follow-up hooks after an
//! [`LoadOutcome::Applied`] is left to the caller as well, so a hook is free
//! to call back into the controller.

use std::fmt;

use tracing::{debug, info, warn};

use crate::config::ModalConfig;
use crate::error::ModalError;
use crate::event::UiEvent;
use crate::host::{Fragment, ModalHost};
use crate::request::{ModalRequest, ModalVariant};

/// Identity of one modal instance, unique for the controller's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "modal#{}", self.0)
    }
}

/// Identifies one issued content load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub instance: InstanceId,
    pub generation: u64,
}

/// A fetch the caller has to perform, then report with
/// [`ModalController::complete_load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadJob {
    pub ticket: LoadTicket,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Open,
    Closing,
}

/// Result of a trigger activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A new modal was built.
    Created(LoadJob),
    /// The open modal is being refilled.
    Updated(LoadJob),
    /// The modal is closing; the activation was dropped.
    Ignored,
}

impl Dispatch {
    pub fn job(&self) -> Option<&LoadJob> {
        match self {
            Self::Created(job) | Self::Updated(job) => Some(job),
            Self::Ignored => None,
        }
    }
}

/// Result of reporting a finished fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Content inserted.
    Applied,
    /// Error block inserted.
    Failed,
    /// Superseded by a newer load or the modal is gone. Nothing changed.
    Stale,
}

/// Result of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Closing class applied. The caller waits for the animation and then
    /// calls [`ModalController::finish_close`] with this id.
    Closing(InstanceId),
    AlreadyClosing,
    NoModal,
}

/// Follow-up work for the caller after handling a [`UiEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(LoadJob),
    AwaitClose(InstanceId),
    Nothing,
}

struct ModalInstance<E> {
    id: InstanceId,
    element: E,
    variant: Option<ModalVariant>,
    phase: ModalPhase,
    generation: u64,
    location: String,
}

pub struct ModalController<H: ModalHost> {
    config: ModalConfig,
    host: H,
    modal: Option<ModalInstance<H::Element>>,
    next_instance: u64,
}

impl<H: ModalHost> ModalController<H> {
    pub fn new(config: ModalConfig, host: H) -> Result<Self, ModalError> {
        config.validate()?;
        Ok(Self {
            config,
            host,
            modal: None,
            next_instance: 1,
        })
    }

    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Phase of the current modal, `None` when no modal exists.
    pub fn phase(&self) -> Option<ModalPhase> {
        self.modal.as_ref().map(|m| m.phase)
    }

    pub fn is_present(&self) -> bool {
        self.modal.is_some()
    }

    pub fn instance(&self) -> Option<InstanceId> {
        self.modal.as_ref().map(|m| m.id)
    }

    pub fn element(&self) -> Option<&H::Element> {
        self.modal.as_ref().map(|m| &m.element)
    }

    pub fn variant(&self) -> Option<&ModalVariant> {
        self.modal.as_ref().and_then(|m| m.variant.as_ref())
    }

    /// Whether `ticket` belongs to the latest load of the open modal.
    ///
    /// A closing modal accepts no content; its loads are stale.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.modal.as_ref().is_some_and(|m| {
            m.phase == ModalPhase::Open
                && m.id == ticket.instance
                && m.generation == ticket.generation
        })
    }

    /// Routes a classified UI event.
    pub fn handle(&mut self, event: UiEvent) -> Result<Command, ModalError> {
        match event {
            UiEvent::Trigger(request) => Ok(match self.open(request)? {
                Dispatch::Created(job) | Dispatch::Updated(job) => Command::Load(job),
                Dispatch::Ignored => Command::Nothing,
            }),
            UiEvent::CloseButton | UiEvent::OutsideClick | UiEvent::Escape => {
                Ok(match self.close()? {
                    CloseOutcome::Closing(id) => Command::AwaitClose(id),
                    CloseOutcome::AlreadyClosing | CloseOutcome::NoModal => Command::Nothing,
                })
            }
            UiEvent::InsideClick => Ok(Command::Nothing),
        }
    }

    /// Creates the modal, or refills it if one is open.
    pub fn open(&mut self, request: ModalRequest) -> Result<Dispatch, ModalError> {
        match self.modal.as_ref().map(|m| m.phase) {
            Some(ModalPhase::Closing) => {
                debug!("Ignoring {} while the modal is closing", request.location);
                Ok(Dispatch::Ignored)
            }
            Some(ModalPhase::Open) => self.update(request).map(Dispatch::Updated),
            None => self.create(request).map(Dispatch::Created),
        }
    }

    fn create(&mut self, request: ModalRequest) -> Result<LoadJob, ModalError> {
        let classes = self
            .config
            .container_classes(request.variant.as_ref().map(ModalVariant::as_str));
        let element = self.host.create_modal(&classes)?;

        if let Err(e) = self.host.set_overlay(true) {
            // Keep overlay and container in step.
            let _ = self.host.remove_modal(&element);
            return Err(e);
        }

        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        info!("Opening {id} for {}", request.location);

        self.modal = Some(ModalInstance {
            id,
            element,
            variant: request.variant,
            phase: ModalPhase::Open,
            generation: 0,
            location: String::new(),
        });
        self.begin_load(request.location)
    }

    fn update(&mut self, request: ModalRequest) -> Result<LoadJob, ModalError> {
        let Some(modal) = self.modal.as_ref() else {
            return Err(ModalError::Dom("no modal to update".to_string()));
        };
        if request.variant.is_some() && request.variant != modal.variant {
            debug!("{} keeps its variant on update", modal.id);
        }
        info!("Updating {} with {}", modal.id, request.location);
        self.begin_load(request.location)
    }

    /// Shows the loader, clears old content, makes sure the close button
    /// exists and issues a new ticket.
    fn begin_load(&mut self, location: String) -> Result<LoadJob, ModalError> {
        let Some(modal) = self.modal.as_mut() else {
            return Err(ModalError::Dom("no modal to load into".to_string()));
        };

        self.host.show_loader(&modal.element)?;
        if modal.generation > 0 {
            self.host.clear_wrapper(&modal.element)?;
        }
        if !self.host.has_close_button(&modal.element) {
            self.host.add_close_button(&modal.element)?;
        }

        modal.generation += 1;
        modal.location.clone_from(&location);
        Ok(LoadJob {
            ticket: LoadTicket {
                instance: modal.id,
                generation: modal.generation,
            },
            location,
        })
    }

    /// Reports a finished fetch.
    ///
    /// Only the latest ticket of the live modal is applied; anything else is
    /// reported as [`LoadOutcome::Stale`] without touching the document.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Fragment, ModalError>,
    ) -> Result<LoadOutcome, ModalError> {
        if !self.is_current(ticket) {
            debug!(
                "Discarding stale load {}/{}",
                ticket.instance, ticket.generation
            );
            return Ok(LoadOutcome::Stale);
        }
        let Some(modal) = self.modal.as_ref() else {
            return Ok(LoadOutcome::Stale);
        };

        match result {
            Ok(fragment) => {
                self.host.set_wrapper_content(&modal.element, &fragment)?;
                self.host.remove_loader(&modal.element)?;
                debug!("{} loaded {}", modal.id, modal.location);
                Ok(LoadOutcome::Applied)
            }
            Err(e) => {
                warn!("{} failed to load {}: {e}", modal.id, modal.location);
                self.host.remove_loader(&modal.element)?;
                self.host
                    .show_error(&modal.element, e.user_message(), &modal.location)?;
                Ok(LoadOutcome::Failed)
            }
        }
    }

    /// Starts the closing animation.
    pub fn close(&mut self) -> Result<CloseOutcome, ModalError> {
        let Some(modal) = self.modal.as_mut() else {
            return Ok(CloseOutcome::NoModal);
        };
        if modal.phase == ModalPhase::Closing {
            return Ok(CloseOutcome::AlreadyClosing);
        }

        self.host.add_class(&modal.element, &self.config.closing_class)?;
        modal.phase = ModalPhase::Closing;
        debug!("{} closing", modal.id);
        Ok(CloseOutcome::Closing(modal.id))
    }

    /// Removes the modal once its closing animation is over.
    ///
    /// Returns `false` when `id` is not the closing modal, which happens for
    /// every signal after the first.
    pub fn finish_close(&mut self, id: InstanceId) -> Result<bool, ModalError> {
        let closing = self
            .modal
            .as_ref()
            .is_some_and(|m| m.id == id && m.phase == ModalPhase::Closing);
        if !closing {
            return Ok(false);
        }
        let Some(modal) = self.modal.take() else {
            return Ok(false);
        };

        let removed = self.host.remove_modal(&modal.element);
        let overlay = self.host.set_overlay(false);
        info!("{} removed", modal.id);
        removed.and(overlay)?;
        Ok(true)
    }
}
