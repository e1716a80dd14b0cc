//! Class names and timing knobs shared by the controller and the DOM host.

use serde::Deserialize;

/// Error returned by [`ModalConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("`{0}` must not be empty")]
    Empty(&'static str),
    #[error("`{field}` must be a single class name, got {value:?}")]
    NotAClassName { field: &'static str, value: String },
}

/// Modal configuration.
///
/// Every field is optional when deserialized; missing fields keep the
/// defaults below, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModalConfig {
    /// Selector of the element the modal is prepended to and that carries
    /// the overlay class.
    pub append_target: String,
    /// Class of the element extracted from fetched pages.
    pub content_class: String,
    /// Class of links that open a modal.
    pub trigger_class: String,
    /// Attribute on a trigger naming the modal variant.
    pub type_attribute: String,
    /// Class toggled on the append target while a modal exists.
    pub overlay_class: String,
    /// Class of the modal container. Variants are `<modal_class>--<type>`.
    pub modal_class: String,
    pub wrapper_class: String,
    pub close_button_class: String,
    pub loader_class: String,
    /// Modifier applied while the closing animation plays.
    pub closing_class: String,
    /// Class of the block shown in the wrapper when a load fails.
    pub error_class: String,
    /// Markup placed inside the loader element.
    pub loader_html: String,
    /// Text of the retry link in the error block.
    pub retry_label: String,
    /// Request timeout in milliseconds. `0` disables the timeout.
    pub fetch_timeout_ms: u32,
    /// Upper bound on the closing animation before the modal is removed anyway.
    pub close_fallback_ms: u32,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            append_target: "body".to_string(),
            content_class: "modal__content".to_string(),
            trigger_class: "modal__link".to_string(),
            type_attribute: "data-modal-type".to_string(),
            overlay_class: "overlay-background".to_string(),
            modal_class: "modal".to_string(),
            wrapper_class: "modal__wrapper".to_string(),
            close_button_class: "modal__close-btn".to_string(),
            loader_class: "modal__loader".to_string(),
            closing_class: "modal--closing".to_string(),
            error_class: "modal__error".to_string(),
            loader_html: r#"<div class="loader"></div>"#.to_string(),
            retry_label: "Retry".to_string(),
            fetch_timeout_ms: 10_000,
            close_fallback_ms: 1_000,
        }
    }
}

impl ModalConfig {
    /// Checks that every class name is a single non-empty token.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.append_target.trim().is_empty() {
            return Err(ConfigError::Empty("appendTarget"));
        }
        if self.type_attribute.trim().is_empty() {
            return Err(ConfigError::Empty("typeAttribute"));
        }

        let classes = [
            ("contentClass", &self.content_class),
            ("triggerClass", &self.trigger_class),
            ("overlayClass", &self.overlay_class),
            ("modalClass", &self.modal_class),
            ("wrapperClass", &self.wrapper_class),
            ("closeButtonClass", &self.close_button_class),
            ("loaderClass", &self.loader_class),
            ("closingClass", &self.closing_class),
            ("errorClass", &self.error_class),
        ];
        for (field, value) in classes {
            if value.is_empty() {
                return Err(ConfigError::Empty(field));
            }
            if value.chars().any(|c| c.is_whitespace() || c == '.') {
                return Err(ConfigError::NotAClassName {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Modifier class for a modal variant, e.g. `modal--wide`.
    pub fn variant_class(&self, variant: &str) -> String {
        format!("{}--{}", self.modal_class, variant)
    }

    /// Classes of a freshly created container.
    pub fn container_classes(&self, variant: Option<&str>) -> Vec<String> {
        let mut classes = vec![self.modal_class.clone()];
        if let Some(variant) = variant {
            classes.push(self.variant_class(variant));
        }
        classes
    }

    /// Whether a `class` attribute value belongs to the modal region.
    ///
    /// Substring match on the raw attribute, so the container, its variants
    /// and any `modal__*` child all count as inside.
    pub fn is_modal_region(&self, class_attr: &str) -> bool {
        class_attr.contains(self.modal_class.as_str())
    }

    /// CSS selector for a single class.
    pub fn selector(class: &str) -> String {
        format!(".{class}")
    }
}
