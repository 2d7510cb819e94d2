//! `web_sys` implementation of the controller's document traits.

use page_controller::dom::{
    Document, DomError, DomEvent, Element, EventKind, Listener, ScrollBlock,
};
use tracing::warn;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

fn host_error(context: &str, error: JsValue) -> DomError {
    DomError::Host(format!("{context}: {error:?}"))
}

#[derive(Clone)]
pub struct WebElement(pub web_sys::Element);

impl Element for WebElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn set_class_name(&self, classes: &str) {
        self.0.set_class_name(classes);
    }

    fn text_content(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text_content(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn set_display(&self, display: &str) {
        if let Some(element) = self.0.dyn_ref::<HtmlElement>() {
            if let Err(error) = element.style().set_property("display", display) {
                warn!(?error, "failed to set display");
            }
        }
    }

    fn is_disabled(&self) -> bool {
        match self.0.dyn_ref::<HtmlButtonElement>() {
            Some(button) => button.disabled(),
            None => self.0.has_attribute("disabled"),
        }
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(button) = self.0.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
            return;
        }
        let result = if disabled {
            self.0.set_attribute("disabled", "")
        } else {
            self.0.remove_attribute("disabled")
        };
        if let Err(error) = result {
            warn!(?error, "failed to toggle disabled");
        }
    }

    fn value(&self) -> String {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            return input.value();
        }
        if let Some(textarea) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            return textarea.value();
        }
        if let Some(select) = self.0.dyn_ref::<HtmlSelectElement>() {
            return select.value();
        }
        self.0.get_attribute("value").unwrap_or_default()
    }

    fn remove(&self) {
        self.0.remove();
    }

    fn insert_before(&self, node: &Self) -> Result<(), DomError> {
        if self.0.parent_node().is_none() {
            return Err(DomError::Detached);
        }
        self.0
            .before_with_node_1(&node.0)
            .map_err(|error| host_error("insert before", error))
    }

    fn scroll_into_view(&self, block: ScrollBlock) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(match block {
            ScrollBlock::Start => ScrollLogicalPosition::Start,
            ScrollBlock::Center => ScrollLogicalPosition::Center,
        });
        self.0.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

#[derive(Clone)]
pub struct WebDocument(pub web_sys::Document);

impl Document for WebDocument {
    type Element = WebElement;

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.0.get_element_by_id(id).map(WebElement)
    }

    fn query_selector(&self, selector: &str) -> Option<WebElement> {
        self.0.query_selector(selector).ok().flatten().map(WebElement)
    }

    fn query_selector_all(&self, selector: &str) -> Vec<WebElement> {
        let Ok(nodes) = self.0.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(WebElement)
            .collect()
    }

    fn create_element(&self, tag: &str) -> Result<WebElement, DomError> {
        self.0
            .create_element(tag)
            .map(WebElement)
            .map_err(|error| host_error("create element", error))
    }

    fn add_listener(&self, target: &WebElement, kind: EventKind, listener: Listener<WebElement>) {
        let element = target.clone();
        let callback = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let dom_event = DomEvent::new(element.clone());
            listener(&dom_event);
            if dom_event.default_prevented() {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        if let Err(error) = target
            .0
            .add_event_listener_with_callback(kind.as_str(), callback.as_ref().unchecked_ref())
        {
            warn!(?error, event = kind.as_str(), "failed to add listener");
        }
        // Listeners live as long as the page.
        callback.forget();
    }
}
