//! wasm entry point and the functions exported to page scripts.

use std::cell::RefCell;

use page_controller::{HttpDataSource, PageController};
use tracing::{error, info, warn};
use url::Url;
use wasm_bindgen::{prelude::*, JsCast};

use crate::config::{parse_config, CONFIG_ELEMENT_ID};

mod dom;
mod logging;
mod runtime;
mod tooltip;

use dom::{WebDocument, WebElement};
use runtime::{BrowserSpawner, WindowScheduler};
use tooltip::{bootstrap_available, BootstrapTooltips};

thread_local! {
    static CONTROLLER: RefCell<Option<PageController<WebDocument>>> = const { RefCell::new(None) };
}

fn current_controller() -> Option<PageController<WebDocument>> {
    CONTROLLER.with(|slot| slot.borrow().clone())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logging::init();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() != "loading" {
        return boot(&window);
    }

    let on_ready = Closure::once_into_js(move || {
        if let Err(error) = boot(&window) {
            error!(?error, "page controller failed to start");
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
}

fn boot(window: &web_sys::Window) -> Result<(), JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let origin = window.location().origin()?;
    let base_url = Url::parse(&origin).map_err(|error| JsValue::from_str(&error.to_string()))?;

    let config_block = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());
    let config = parse_config(config_block.as_deref());

    let mut controller = PageController::new(
        WebDocument(document),
        WindowScheduler::new(window.clone()),
        HttpDataSource::new(base_url),
    )
    .with_spawner(BrowserSpawner)
    .with_config(config);
    if bootstrap_available(window) {
        controller = controller.with_tooltips(BootstrapTooltips);
    }

    controller.init();
    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller));
    info!(%origin, "page controller ready");
    Ok(())
}

/// Click handler for markup that wires the loader itself, e.g.
/// `onclick="loadApiData(event)"`.
#[wasm_bindgen(js_name = loadApiData)]
pub fn load_api_data(event: web_sys::Event) {
    let Some(button) = event
        .current_target()
        .or_else(|| event.target())
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
    else {
        warn!("loadApiData called without an element target");
        return;
    };
    let Some(controller) = current_controller() else {
        warn!("loadApiData called before the page controller started");
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(error) = controller.load_api_data(&WebElement(button)).await {
            error!(%error, "data loader could not run");
        }
    });
}

/// Validate the contact form and flag failing fields. Reports valid when the
/// controller has not started, leaving the browser's own submission alone.
#[wasm_bindgen(js_name = validateContactForm)]
pub fn validate_contact_form() -> bool {
    match current_controller() {
        Some(controller) => controller.validate_contact_form(),
        None => {
            warn!("validateContactForm called before the page controller started");
            true
        }
    }
}
