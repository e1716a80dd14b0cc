//! In-memory [`ModalHost`] for controller tests.

use crate::error::ModalError;
use crate::host::{Fragment, ModalHost};

/// Recorded host call, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Create(usize),
    ShowLoader(usize),
    RemoveLoader(usize),
    AddCloseButton(usize),
    ClearWrapper(usize),
    SetContent(usize, String),
    ShowError(usize, String),
    AddClass(usize, String),
    Remove(usize),
    Overlay(bool),
}

#[derive(Debug, Default)]
pub struct FakeModal {
    pub classes: Vec<String>,
    pub loaders: usize,
    pub close_buttons: usize,
    pub wrapper: String,
    pub error_retry: Option<String>,
    pub attached: bool,
}

#[derive(Debug, Default)]
pub struct FakeHost {
    pub modals: Vec<FakeModal>,
    pub overlay: bool,
    pub ops: Vec<Op>,
}

impl FakeHost {
    /// Containers currently in the document.
    pub fn attached(&self) -> impl Iterator<Item = &FakeModal> {
        self.modals.iter().filter(|m| m.attached)
    }

    pub fn attached_count(&self) -> usize {
        self.attached().count()
    }

    pub fn only_modal(&self) -> &FakeModal {
        let mut attached = self.attached();
        let modal = attached.next().expect("no modal attached");
        assert!(attached.next().is_none(), "more than one modal attached");
        modal
    }

    pub fn position(&self, op: &Op) -> Option<usize> {
        self.ops.iter().position(|o| o == op)
    }

    fn modal(&mut self, id: usize) -> Result<&mut FakeModal, ModalError> {
        self.modals
            .get_mut(id)
            .filter(|m| m.attached)
            .ok_or_else(|| ModalError::Dom(format!("modal {id} is not attached")))
    }
}

impl ModalHost for FakeHost {
    type Element = usize;

    fn create_modal(&mut self, classes: &[String]) -> Result<usize, ModalError> {
        let id = self.modals.len();
        self.modals.push(FakeModal {
            classes: classes.to_vec(),
            attached: true,
            ..Default::default()
        });
        self.ops.push(Op::Create(id));
        Ok(id)
    }

    fn show_loader(&mut self, modal: &usize) -> Result<(), ModalError> {
        let m = self.modal(*modal)?;
        if m.loaders == 0 {
            m.loaders = 1;
        }
        self.ops.push(Op::ShowLoader(*modal));
        Ok(())
    }

    fn remove_loader(&mut self, modal: &usize) -> Result<(), ModalError> {
        self.modal(*modal)?.loaders = 0;
        self.ops.push(Op::RemoveLoader(*modal));
        Ok(())
    }

    fn has_close_button(&self, modal: &usize) -> bool {
        self.modals.get(*modal).is_some_and(|m| m.close_buttons > 0)
    }

    fn add_close_button(&mut self, modal: &usize) -> Result<(), ModalError> {
        self.modal(*modal)?.close_buttons += 1;
        self.ops.push(Op::AddCloseButton(*modal));
        Ok(())
    }

    fn clear_wrapper(&mut self, modal: &usize) -> Result<(), ModalError> {
        let m = self.modal(*modal)?;
        m.wrapper.clear();
        m.error_retry = None;
        self.ops.push(Op::ClearWrapper(*modal));
        Ok(())
    }

    fn set_wrapper_content(&mut self, modal: &usize, fragment: &Fragment) -> Result<(), ModalError> {
        let m = self.modal(*modal)?;
        m.wrapper.clone_from(&fragment.html);
        m.error_retry = None;
        self.ops.push(Op::SetContent(*modal, fragment.html.clone()));
        Ok(())
    }

    fn show_error(&mut self, modal: &usize, message: &str, retry_location: &str) -> Result<(), ModalError> {
        let m = self.modal(*modal)?;
        m.wrapper = message.to_string();
        m.error_retry = Some(retry_location.to_string());
        self.ops.push(Op::ShowError(*modal, message.to_string()));
        Ok(())
    }

    fn add_class(&mut self, modal: &usize, class: &str) -> Result<(), ModalError> {
        let m = self.modal(*modal)?;
        if !m.classes.iter().any(|c| c == class) {
            m.classes.push(class.to_string());
        }
        self.ops.push(Op::AddClass(*modal, class.to_string()));
        Ok(())
    }

    fn remove_modal(&mut self, modal: &usize) -> Result<(), ModalError> {
        self.modal(*modal)?.attached = false;
        self.ops.push(Op::Remove(*modal));
        Ok(())
    }

    fn set_overlay(&mut self, open: bool) -> Result<(), ModalError> {
        self.overlay = open;
        self.ops.push(Op::Overlay(open));
        Ok(())
    }
}
