//! The slice of the document object model the page controller touches.
//!
//! Browser builds implement these traits over `web_sys`; headless builds and tests
//! use [`crate::memory::MemoryDocument`].

use std::{cell::Cell, rc::Rc};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("element has no parent to insert into")]
    Detached,
    #[error("dom operation failed: {0}")]
    Host(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
        }
    }
}

/// Vertical alignment for a smooth `scroll_into_view`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    Start,
    Center,
}

/// A dispatched event as seen by a listener.
pub struct DomEvent<E> {
    target: E,
    default_prevented: Cell<bool>,
}

impl<E> DomEvent<E> {
    pub fn new(target: E) -> Self {
        Self {
            target,
            default_prevented: Cell::new(false),
        }
    }

    pub fn target(&self) -> &E {
        &self.target
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

pub type Listener<E> = Rc<dyn Fn(&DomEvent<E>)>;

pub trait Element: Clone + 'static {
    fn attribute(&self, name: &str) -> Option<String>;
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn set_class_name(&self, classes: &str);
    fn text_content(&self) -> String;
    fn set_text_content(&self, text: &str);
    fn set_inner_html(&self, html: &str);
    /// Inline `style.display`.
    fn set_display(&self, display: &str);
    fn is_disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);
    /// Current value of a form control; empty for other elements.
    fn value(&self) -> String;
    /// Detach from the document. Detached elements ignore the call.
    fn remove(&self);
    /// Insert `node` as the previous sibling of `self`.
    fn insert_before(&self, node: &Self) -> Result<(), DomError>;
    /// Smooth scroll so that `self` lands at `block` in the viewport.
    fn scroll_into_view(&self, block: ScrollBlock);
}

pub trait Document: Clone + 'static {
    type Element: Element;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    /// First match in document order. Invalid selectors match nothing.
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;
    fn create_element(&self, tag: &str) -> Result<Self::Element, DomError>;
    fn add_listener(
        &self,
        target: &Self::Element,
        kind: EventKind,
        listener: Listener<Self::Element>,
    );
}
