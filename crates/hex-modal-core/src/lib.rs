//! Hex Modals Core Library
//!
//! Lifecycle of a single, lazily created modal dialog whose body is filled
//! with a fragment of another page.
//!
//! This crate has no browser dependency. The DOM is reached through the
//! [`ModalHost`] trait, implemented by `hex-modal-web` for `web-sys` and by an
//! in-memory host in tests.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod host;
pub mod request;

#[cfg(test)]
mod test_host;

pub use config::{ConfigError, ModalConfig};
pub use controller::{
    CloseOutcome, Command, Dispatch, InstanceId, LoadJob, LoadOutcome, LoadTicket, ModalController,
    ModalPhase,
};
pub use error::ModalError;
pub use event::{ClickTarget, ESCAPE_KEY, ESCAPE_KEY_CODE, UiEvent, has_class, is_escape};
pub use host::{Fragment, ModalHost};
pub use request::{ModalRequest, ModalVariant};
