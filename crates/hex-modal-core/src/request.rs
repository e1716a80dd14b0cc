//! Per-activation modal request.

use std::fmt;

use tracing::warn;

use crate::error::ModalError;

/// Modal variant taken from a trigger's type attribute.
///
/// Only tokens usable as part of a class name are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModalVariant(String);

impl ModalVariant {
    pub fn new(raw: &str) -> Option<Self> {
        let token = raw.trim();
        let valid = !token.is_empty()
            && token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModalVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a trigger activation asks for: where to load from and which variant
/// to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalRequest {
    pub location: String,
    pub variant: Option<ModalVariant>,
}

impl ModalRequest {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            variant: None,
        }
    }

    #[must_use]
    pub fn with_variant(mut self, variant: ModalVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Builds a request from a trigger's `href` and type attribute values.
    ///
    /// An unusable type value is dropped rather than rejecting the click.
    pub fn from_trigger(href: Option<&str>, type_value: Option<&str>) -> Result<Self, ModalError> {
        let location = href
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .ok_or(ModalError::MissingLocation)?;

        let variant = type_value.and_then(|raw| {
            let variant = ModalVariant::new(raw);
            if variant.is_none() && !raw.trim().is_empty() {
                warn!("Ignoring invalid modal type {raw:?}");
            }
            variant
        });

        Ok(Self {
            location: location.to_string(),
            variant,
        })
    }
}
