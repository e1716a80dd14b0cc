//! Error type for modal operations.

use crate::config::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModalError {
    #[error("Invalid modal configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Modals are already installed on this page")]
    AlreadyInstalled,

    #[error("Append target not found: {0}")]
    MissingAppendTarget(String),

    #[error("Trigger has no location to load")]
    MissingLocation,

    #[error("Request failed with HTTP {status}")]
    Http { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {after_ms} ms")]
    Timeout { after_ms: u32 },

    #[error("Page has no element with class `{class}`")]
    MissingFragment { class: String },

    #[error("DOM error: {0}")]
    Dom(String),
}

impl ModalError {
    /// Message shown to the user inside the error block.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Http { status: 404 } | Self::MissingFragment { .. } => {
                "This content could not be found."
            }
            Self::Timeout { .. } => "This is taking too long to load.",
            Self::Network(_) | Self::Http { .. } => "This content could not be loaded.",
            _ => "Something went wrong.",
        }
    }
}
