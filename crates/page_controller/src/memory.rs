//! In-memory document used for headless runs and tests.
//!
//! Queries understand compound selectors only: an optional tag followed by any
//! mix of `#id`, `.class`, `[attr]`, `[attr="v"]` and `[attr^="v"]`. Anything
//! else (combinators, pseudo-classes, a bare `#`) is treated as invalid and
//! matches nothing. Events are delivered to the target's own listeners only.
//!
//! Attribute values always compare case-sensitively. Browsers compare some HTML
//! attributes such as `method` case-insensitively, so `form[method="POST"]` does
//! not match `method="post"` here even though it would in a page.

use std::{
    cell::RefCell,
    collections::BTreeMap,
    fmt,
    rc::{Rc, Weak},
};

use crate::dom::{Document, DomError, DomEvent, Element, EventKind, Listener, ScrollBlock};

const DOCUMENT_TAG: &str = "#document";

struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    content: String,
    display: Option<String>,
    disabled: bool,
    value: String,
    scrolled_to: Option<ScrollBlock>,
    parent: Weak<RefCell<Node>>,
    children: Vec<Rc<RefCell<Node>>>,
    listeners: Vec<(EventKind, Listener<MemoryElement>)>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            content: String::new(),
            display: None,
            disabled: false,
            value: String::new(),
            scrolled_to: None,
            parent: Weak::new(),
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        if name == "class" {
            return (!self.classes.is_empty()).then(|| self.classes.join(" "));
        }
        self.attributes.get(name).cloned()
    }
}

#[derive(Clone)]
pub struct MemoryElement(Rc<RefCell<Node>>);

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for MemoryElement {}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("MemoryElement")
            .field("tag", &node.tag)
            .field("id", &node.attributes.get("id"))
            .field("classes", &node.classes)
            .finish()
    }
}

impl MemoryElement {
    fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(Node::new(tag))))
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        if name == "class" {
            self.set_class_name(value);
            return;
        }
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = value.to_string();
    }

    /// Markup or text last written to the element, stored verbatim.
    pub fn inner_html(&self) -> String {
        self.0.borrow().content.clone()
    }

    pub fn display(&self) -> Option<String> {
        self.0.borrow().display.clone()
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    pub fn scrolled_to(&self) -> Option<ScrollBlock> {
        self.0.borrow().scrolled_to
    }

    pub fn parent(&self) -> Option<MemoryElement> {
        self.0.borrow().parent.upgrade().map(MemoryElement)
    }

    pub fn children(&self) -> Vec<MemoryElement> {
        self.0
            .borrow()
            .children
            .iter()
            .cloned()
            .map(MemoryElement)
            .collect()
    }

    pub fn append_child(&self, child: &MemoryElement) {
        child.remove();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.0.clone());
    }

    /// Whether the element is still reachable from its document root.
    pub fn is_connected(&self) -> bool {
        let mut current = self.clone();
        loop {
            if current.0.borrow().tag == DOCUMENT_TAG {
                return true;
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn descendants(&self, out: &mut Vec<MemoryElement>) {
        for child in self.children() {
            out.push(child.clone());
            child.descendants(out);
        }
    }

    fn listeners(&self, kind: EventKind) -> Vec<Listener<MemoryElement>> {
        self.0
            .borrow()
            .listeners
            .iter()
            .filter(|(registered, _)| *registered == kind)
            .map(|(_, listener)| listener.clone())
            .collect()
    }
}

impl Element for MemoryElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attribute(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.borrow_mut().classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    fn set_class_name(&self, classes: &str) {
        let mut parsed: Vec<String> = Vec::new();
        for class in classes.split_whitespace() {
            if !parsed.iter().any(|c| c == class) {
                parsed.push(class.to_string());
            }
        }
        self.0.borrow_mut().classes = parsed;
    }

    fn text_content(&self) -> String {
        self.0.borrow().content.clone()
    }

    fn set_text_content(&self, text: &str) {
        self.0.borrow_mut().content = text.to_string();
    }

    fn set_inner_html(&self, html: &str) {
        self.0.borrow_mut().content = html.to_string();
    }

    fn set_display(&self, display: &str) {
        self.0.borrow_mut().display = Some(display.to_string());
    }

    fn is_disabled(&self) -> bool {
        self.0.borrow().disabled
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }

    fn value(&self) -> String {
        self.0.borrow().value.clone()
    }

    fn remove(&self) {
        let Some(parent) = self.parent() else {
            return;
        };
        parent
            .0
            .borrow_mut()
            .children
            .retain(|child| !Rc::ptr_eq(child, &self.0));
        self.0.borrow_mut().parent = Weak::new();
    }

    fn insert_before(&self, node: &Self) -> Result<(), DomError> {
        let parent = self.parent().ok_or(DomError::Detached)?;
        node.remove();
        let mut parent_node = parent.0.borrow_mut();
        let index = parent_node
            .children
            .iter()
            .position(|child| Rc::ptr_eq(child, &self.0))
            .ok_or(DomError::Detached)?;
        parent_node.children.insert(index, node.0.clone());
        node.0.borrow_mut().parent = Rc::downgrade(&parent.0);
        Ok(())
    }

    fn scroll_into_view(&self, block: ScrollBlock) {
        self.0.borrow_mut().scrolled_to = Some(block);
    }
}

#[derive(Clone)]
pub struct MemoryDocument {
    root: MemoryElement,
    body: MemoryElement,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        let root = MemoryElement::new(DOCUMENT_TAG);
        let body = MemoryElement::new("body");
        root.append_child(&body);
        Self { root, body }
    }

    pub fn body(&self) -> MemoryElement {
        self.body.clone()
    }

    /// Create an element with `attributes` and append it to `parent`.
    pub fn append(
        &self,
        parent: &MemoryElement,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> MemoryElement {
        let element = MemoryElement::new(tag);
        for (name, value) in attributes {
            element.set_attribute(name, value);
        }
        parent.append_child(&element);
        element
    }

    /// Run the listeners `target` registered for `kind`, in registration order.
    pub fn dispatch(&self, target: &MemoryElement, kind: EventKind) -> DomEvent<MemoryElement> {
        let event = DomEvent::new(target.clone());
        for listener in target.listeners(kind) {
            listener(&event);
        }
        event
    }

    fn all_elements(&self) -> Vec<MemoryElement> {
        let mut out = Vec::new();
        self.root.descendants(&mut out);
        out
    }
}

impl Document for MemoryDocument {
    type Element = MemoryElement;

    fn element_by_id(&self, id: &str) -> Option<MemoryElement> {
        self.all_elements()
            .into_iter()
            .find(|element| element.attribute("id").as_deref() == Some(id))
    }

    fn query_selector(&self, selector: &str) -> Option<MemoryElement> {
        self.query_selector_all(selector).into_iter().next()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<MemoryElement> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.all_elements()
            .into_iter()
            .filter(|element| selector.matches(&element.0.borrow()))
            .collect()
    }

    fn create_element(&self, tag: &str) -> Result<MemoryElement, DomError> {
        Ok(MemoryElement::new(tag))
    }

    fn add_listener(
        &self,
        target: &MemoryElement,
        kind: EventKind,
        listener: Listener<MemoryElement>,
    ) {
        target.0.borrow_mut().listeners.push((kind, listener));
    }
}

#[derive(Debug, PartialEq, Eq)]
enum AttributeMatch {
    Present(String),
    Equals(String, String),
    Prefix(String, String),
}

#[derive(Debug, Default)]
struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeMatch>,
}

impl Selector {
    fn parse(input: &str) -> Option<Self> {
        let mut rest = input.trim();
        if rest.is_empty() {
            return None;
        }

        let mut selector = Selector::default();
        let (tag, tail) = take_ident(rest);
        if !tag.is_empty() {
            selector.tag = Some(tag.to_ascii_lowercase());
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix('*') {
            rest = tail;
        }

        while let Some(first) = rest.chars().next() {
            match first {
                '#' => {
                    let (id, tail) = take_name(&rest[1..])?;
                    selector.id = Some(id.to_string());
                    rest = tail;
                }
                '.' => {
                    let (class, tail) = take_name(&rest[1..])?;
                    selector.classes.push(class.to_string());
                    rest = tail;
                }
                '[' => {
                    let end = find_unquoted(rest, ']')?;
                    selector.attributes.push(parse_attribute(&rest[1..end])?);
                    rest = &rest[end + 1..];
                }
                _ => return None,
            }
        }

        Some(selector)
    }

    fn matches(&self, node: &Node) -> bool {
        if node.tag == DOCUMENT_TAG {
            return false;
        }
        if self.tag.as_ref().is_some_and(|tag| *tag != node.tag) {
            return false;
        }
        if self
            .id
            .as_ref()
            .is_some_and(|id| node.attributes.get("id") != Some(id))
        {
            return false;
        }
        if !self
            .classes
            .iter()
            .all(|class| node.classes.iter().any(|c| c == class))
        {
            return false;
        }
        self.attributes.iter().all(|matcher| match matcher {
            AttributeMatch::Present(name) => node.attribute(name).is_some(),
            AttributeMatch::Equals(name, value) => node.attribute(name).as_ref() == Some(value),
            AttributeMatch::Prefix(name, value) => {
                !value.is_empty()
                    && node
                        .attribute(name)
                        .is_some_and(|actual| actual.starts_with(value.as_str()))
            }
        })
    }
}

fn take_ident(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(input.len());
    input.split_at(end)
}

fn take_name(input: &str) -> Option<(&str, &str)> {
    let (name, tail) = take_ident(input);
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some((name, tail))
}

/// Byte offset of the first `target` outside a quoted string.
fn find_unquoted(input: &str, target: char) -> Option<usize> {
    let mut quote = None;
    for (index, c) in input.char_indices() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == target => return Some(index),
            None => {}
        }
    }
    None
}

fn parse_attribute(inner: &str) -> Option<AttributeMatch> {
    let inner = inner.trim();
    let Some(eq) = find_unquoted(inner, '=') else {
        return Some(AttributeMatch::Present(attribute_name(inner)?));
    };
    let (name, value) = (&inner[..eq], unquote(&inner[eq + 1..])?);
    match name.strip_suffix('^') {
        Some(name) => Some(AttributeMatch::Prefix(attribute_name(name)?, value)),
        None => Some(AttributeMatch::Equals(attribute_name(name)?, value)),
    }
}

fn attribute_name(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let (name, tail) = take_ident(raw);
    (!name.is_empty() && tail.is_empty()).then(|| name.to_ascii_lowercase())
}

fn unquote(raw: &str) -> Option<String> {
    let raw = raw.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = raw
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return Some(inner.to_string());
        }
    }
    let (ident, tail) = take_ident(raw);
    (!ident.is_empty() && tail.is_empty()).then(|| ident.to_string())
}

#[cfg(test)]
#[path = "tests/memory_tests.rs"]
mod tests;
