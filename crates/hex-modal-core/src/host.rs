//! The seam between the lifecycle and the document.

use crate::error::ModalError;

/// Inner HTML extracted from the content element of a fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    pub html: String,
}

impl Fragment {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

/// Document operations the controller needs.
///
/// Implementations receive class names from the same [`ModalConfig`] the
/// controller was built with and must not keep their own modal state: the
/// controller decides whether a modal exists.
///
/// [`ModalConfig`]: crate::ModalConfig
pub trait ModalHost {
    /// Handle to a modal container.
    type Element: Clone;

    /// Builds a container with the given classes and an empty wrapper, and
    /// prepends it to the append target.
    fn create_modal(&mut self, classes: &[String]) -> Result<Self::Element, ModalError>;

    /// Shows the loader in the container unless one is already there.
    fn show_loader(&mut self, modal: &Self::Element) -> Result<(), ModalError>;

    /// Removes every loader from the container.
    fn remove_loader(&mut self, modal: &Self::Element) -> Result<(), ModalError>;

    /// Whether the container already has its close button.
    fn has_close_button(&self, modal: &Self::Element) -> bool;

    /// Prepends a close button to the container.
    fn add_close_button(&mut self, modal: &Self::Element) -> Result<(), ModalError>;

    /// Removes all children of the wrapper.
    fn clear_wrapper(&mut self, modal: &Self::Element) -> Result<(), ModalError>;

    /// Replaces the wrapper contents with a fragment.
    fn set_wrapper_content(
        &mut self,
        modal: &Self::Element,
        fragment: &Fragment,
    ) -> Result<(), ModalError>;

    /// Replaces the wrapper contents with an error block holding `message`
    /// and a retry trigger for `retry_location`.
    fn show_error(
        &mut self,
        modal: &Self::Element,
        message: &str,
        retry_location: &str,
    ) -> Result<(), ModalError>;

    fn add_class(&mut self, modal: &Self::Element, class: &str) -> Result<(), ModalError>;

    /// Detaches the container from the document.
    fn remove_modal(&mut self, modal: &Self::Element) -> Result<(), ModalError>;

    /// Adds or removes the overlay class on the append target.
    fn set_overlay(&mut self, open: bool) -> Result<(), ModalError>;
}
