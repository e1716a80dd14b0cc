//! `web-sys` implementation of [`ModalHost`].

use hex_modal_core::{Fragment, ModalConfig, ModalError, ModalHost};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

/// Converts a thrown JS value into a [`ModalError`].
pub(crate) fn dom_error(value: JsValue) -> ModalError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    ModalError::Dom(message)
}

/// Modal host backed by the live document.
pub struct DomHost {
    document: Document,
    target: Element,
    config: ModalConfig,
}

impl DomHost {
    /// Resolves the append target. Fails if the selector matches nothing.
    pub fn new(document: Document, config: &ModalConfig) -> Result<Self, ModalError> {
        let target = document
            .query_selector(&config.append_target)
            .map_err(dom_error)?
            .ok_or_else(|| ModalError::MissingAppendTarget(config.append_target.clone()))?;
        Ok(Self {
            document,
            target,
            config: config.clone(),
        })
    }

    fn div(&self, class: &str) -> Result<Element, ModalError> {
        let el = self.document.create_element("div").map_err(dom_error)?;
        el.set_class_name(class);
        Ok(el)
    }

    fn find(&self, modal: &Element, class: &str) -> Result<Option<Element>, ModalError> {
        modal
            .query_selector(&ModalConfig::selector(class))
            .map_err(dom_error)
    }

    fn wrapper(&self, modal: &Element) -> Result<Element, ModalError> {
        self.find(modal, &self.config.wrapper_class)?
            .ok_or_else(|| ModalError::Dom("modal has no wrapper".to_string()))
    }
}

impl ModalHost for DomHost {
    type Element = Element;

    fn create_modal(&mut self, classes: &[String]) -> Result<Element, ModalError> {
        let modal = self.div(&classes.join(" "))?;
        let wrapper = self.div(&self.config.wrapper_class)?;
        modal.append_child(&wrapper).map_err(dom_error)?;
        self.target.prepend_with_node_1(&modal).map_err(dom_error)?;
        Ok(modal)
    }

    fn show_loader(&mut self, modal: &Element) -> Result<(), ModalError> {
        if self.find(modal, &self.config.loader_class)?.is_some() {
            return Ok(());
        }
        let loader = self.div(&self.config.loader_class)?;
        loader.set_inner_html(&self.config.loader_html);
        modal.prepend_with_node_1(&loader).map_err(dom_error)
    }

    fn remove_loader(&mut self, modal: &Element) -> Result<(), ModalError> {
        let loaders = modal
            .query_selector_all(&ModalConfig::selector(&self.config.loader_class))
            .map_err(dom_error)?;
        for i in 0..loaders.length() {
            if let Some(loader) = loaders.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                loader.remove();
            }
        }
        Ok(())
    }

    fn has_close_button(&self, modal: &Element) -> bool {
        matches!(self.find(modal, &self.config.close_button_class), Ok(Some(_)))
    }

    fn add_close_button(&mut self, modal: &Element) -> Result<(), ModalError> {
        let button = self.div(&self.config.close_button_class)?;
        modal.prepend_with_node_1(&button).map_err(dom_error)
    }

    fn clear_wrapper(&mut self, modal: &Element) -> Result<(), ModalError> {
        self.wrapper(modal)?.set_inner_html("");
        Ok(())
    }

    fn set_wrapper_content(&mut self, modal: &Element, fragment: &Fragment) -> Result<(), ModalError> {
        self.wrapper(modal)?.set_inner_html(&fragment.html);
        Ok(())
    }

    fn show_error(&mut self, modal: &Element, message: &str, retry_location: &str) -> Result<(), ModalError> {
        let wrapper = self.wrapper(modal)?;
        let block = self.div(&self.config.error_class)?;

        let text = self.document.create_element("p").map_err(dom_error)?;
        text.set_text_content(Some(message));
        block.append_child(&text).map_err(dom_error)?;

        // The retry link is an ordinary trigger, so clicking it refills the modal.
        let retry = self.document.create_element("a").map_err(dom_error)?;
        retry.set_class_name(&self.config.trigger_class);
        retry.set_attribute("href", retry_location).map_err(dom_error)?;
        retry.set_text_content(Some(&self.config.retry_label));
        block.append_child(&retry).map_err(dom_error)?;

        wrapper.set_inner_html("");
        wrapper.append_child(&block).map_err(dom_error)?;
        Ok(())
    }

    fn add_class(&mut self, modal: &Element, class: &str) -> Result<(), ModalError> {
        modal.class_list().add_1(class).map_err(dom_error)
    }

    fn remove_modal(&mut self, modal: &Element) -> Result<(), ModalError> {
        modal.remove();
        Ok(())
    }

    fn set_overlay(&mut self, open: bool) -> Result<(), ModalError> {
        let classes = self.target.class_list();
        let result = if open {
            classes.add_1(&self.config.overlay_class)
        } else {
            classes.remove_1(&self.config.overlay_class)
        };
        result.map_err(dom_error)
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    wasm_bindgen_test_configure!(run_in_browser);

    /// Host appending into a fresh container so tests don't share state.
    fn host() -> (DomHost, Element) {
        let document = gloo::utils::document();
        let root = document.create_element("section").unwrap();
        let id = format!("host-{}", js_sys::Math::random().to_bits());
        root.set_id(&id);
        gloo::utils::body().append_child(&root).unwrap();

        let config = ModalConfig {
            append_target: format!("#{id}"),
            ..Default::default()
        };
        (DomHost::new(document, &config).unwrap(), root)
    }

    fn count(root: &Element, selector: &str) -> u32 {
        root.query_selector_all(selector).unwrap().length()
    }

    #[wasm_bindgen_test]
    fn test_missing_append_target() {
        let config = ModalConfig {
            append_target: "#does-not-exist".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            DomHost::new(gloo::utils::document(), &config),
            Err(ModalError::MissingAppendTarget(_))
        ));
    }

    #[wasm_bindgen_test]
    fn test_create_modal_prepends_container_with_wrapper() {
        let (mut host, root) = host();
        let existing = gloo::utils::document().create_element("p").unwrap();
        root.append_child(&existing).unwrap();

        let modal = host
            .create_modal(&["modal".to_string(), "modal--wide".to_string()])
            .unwrap();

        assert_eq!(root.first_element_child(), Some(modal.clone()));
        assert_eq!(modal.class_name(), "modal modal--wide");
        assert_eq!(count(&modal, ".modal__wrapper"), 1);
    }

    #[wasm_bindgen_test]
    fn test_loader_and_close_button() {
        let (mut host, _root) = host();
        let modal = host.create_modal(&["modal".to_string()]).unwrap();

        host.show_loader(&modal).unwrap();
        host.show_loader(&modal).unwrap();
        assert_eq!(count(&modal, ".modal__loader"), 1);
        assert_eq!(count(&modal, ".modal__loader .loader"), 1);

        assert!(!host.has_close_button(&modal));
        host.add_close_button(&modal).unwrap();
        assert!(host.has_close_button(&modal));

        host.remove_loader(&modal).unwrap();
        assert_eq!(count(&modal, ".modal__loader"), 0);
    }

    #[wasm_bindgen_test]
    fn test_wrapper_content_replaced() {
        let (mut host, _root) = host();
        let modal = host.create_modal(&["modal".to_string()]).unwrap();

        host.set_wrapper_content(&modal, &Fragment::new("<p>one</p>")).unwrap();
        host.set_wrapper_content(&modal, &Fragment::new("<p>two</p>")).unwrap();
        let wrapper = modal.query_selector(".modal__wrapper").unwrap().unwrap();
        assert_eq!(wrapper.inner_html(), "<p>two</p>");

        host.clear_wrapper(&modal).unwrap();
        assert_eq!(wrapper.inner_html(), "");
    }

    #[wasm_bindgen_test]
    fn test_error_block_has_retry_trigger() {
        let (mut host, _root) = host();
        let modal = host.create_modal(&["modal".to_string()]).unwrap();

        host.show_error(&modal, "Nope.", "/terms?x=\"1\"").unwrap();

        let retry = modal
            .query_selector(".modal__wrapper .modal__error a.modal__link")
            .unwrap()
            .unwrap();
        assert_eq!(retry.get_attribute("href").as_deref(), Some("/terms?x=\"1\""));
        assert_eq!(retry.text_content().as_deref(), Some("Retry"));
        let text = modal.query_selector(".modal__error p").unwrap().unwrap();
        assert_eq!(text.text_content().as_deref(), Some("Nope."));
    }

    #[wasm_bindgen_test]
    fn test_overlay_and_removal() {
        let (mut host, root) = host();
        let modal = host.create_modal(&["modal".to_string()]).unwrap();

        host.set_overlay(true).unwrap();
        host.set_overlay(true).unwrap();
        assert!(root.class_list().contains("overlay-background"));

        host.add_class(&modal, "modal--closing").unwrap();
        assert!(modal.class_list().contains("modal--closing"));

        host.remove_modal(&modal).unwrap();
        host.set_overlay(false).unwrap();
        assert_eq!(count(&root, ".modal"), 0);
        assert!(!root.class_list().contains("overlay-background"));
    }
}
