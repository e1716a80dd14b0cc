//! Classification of document-level UI events.
//!
//! Listeners are delegated from the document, so a click is routed by the
//! classes found on its target and the target's ancestors.

use crate::config::ModalConfig;
use crate::request::ModalRequest;

pub const ESCAPE_KEY: &str = "Escape";
pub const ESCAPE_KEY_CODE: u32 = 27;

/// Where a click landed, relative to the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// A trigger link. Holds the ancestor depth of the trigger element
    /// (0 = the click target itself).
    Trigger(usize),
    CloseButton,
    /// Anywhere in the modal region. Not a dismissal.
    InsideModal,
    Outside,
}

impl ClickTarget {
    /// Classifies a click from the `class` attributes of the target and its
    /// ancestors, nearest first.
    ///
    /// Priority for the whole chain is trigger, close button, modal region,
    /// outside.
    pub fn classify<I, S>(config: &ModalConfig, class_chain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut close_button = false;
        let mut inside = false;

        for (depth, class_attr) in class_chain.into_iter().enumerate() {
            let class_attr = class_attr.as_ref();
            if has_class(class_attr, &config.trigger_class) {
                return Self::Trigger(depth);
            }
            close_button |= has_class(class_attr, &config.close_button_class);
            inside |= config.is_modal_region(class_attr);
        }

        if close_button {
            Self::CloseButton
        } else if inside {
            Self::InsideModal
        } else {
            Self::Outside
        }
    }
}

/// Whitespace-separated class list membership.
pub fn has_class(class_attr: &str, class: &str) -> bool {
    class_attr.split_ascii_whitespace().any(|c| c == class)
}

/// Whether a keyup should dismiss the modal.
pub fn is_escape(key: &str, key_code: u32) -> bool {
    key == ESCAPE_KEY || key == "Esc" || key_code == ESCAPE_KEY_CODE
}

/// A user interaction, already classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Trigger(ModalRequest),
    CloseButton,
    InsideClick,
    OutsideClick,
    Escape,
}
