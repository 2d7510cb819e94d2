use page_controller::TooltipCapability;
use tracing::warn;
use wasm_bindgen::prelude::*;

use super::dom::WebElement;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    type Tooltip;

    #[wasm_bindgen(constructor, js_namespace = bootstrap, catch)]
    fn new(element: &web_sys::Element) -> Result<Tooltip, JsValue>;
}

/// Whether the Bootstrap bundle put its `bootstrap` global on the window.
pub fn bootstrap_available(window: &web_sys::Window) -> bool {
    js_sys::Reflect::get(window, &JsValue::from_str("bootstrap"))
        .map(|value| !value.is_undefined() && !value.is_null())
        .unwrap_or(false)
}

pub struct BootstrapTooltips;

impl TooltipCapability<WebElement> for BootstrapTooltips {
    fn attach(&self, element: &WebElement) {
        if let Err(error) = Tooltip::new(&element.0) {
            warn!(?error, "bootstrap tooltip construction failed");
        }
    }
}
