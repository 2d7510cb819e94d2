//! Page controller for the server-rendered site.
//!
//! Wires tooltips, alert auto-dismiss, in-page anchor scrolling, the API data
//! loader and contact form validation onto a [`dom::Document`]. Everything runs
//! on one thread; handlers mutate elements directly and only the loader awaits.

use std::rc::Rc;

use serde_json::Value;
use shared::domain::ContactField;
use tracing::{debug, error, info, warn};

pub mod config;
pub mod data_source;
pub mod dom;
pub mod error;
pub mod memory;
pub mod spawn;
pub mod timers;
pub mod tooltip;
pub mod validation;

pub use config::ControllerConfig;
pub use data_source::{DataSource, HttpDataSource};
pub use dom::{Document, DomError, DomEvent, Element, EventKind, ScrollBlock};
pub use error::{ControllerError, LoadError};
pub use spawn::Spawner;
pub use timers::{Scheduler, TimerHandle};
pub use tooltip::TooltipCapability;
pub use validation::ContactValidation;

pub const API_DATA_ID: &str = "api-data";
pub const API_CONTENT_ID: &str = "api-content";

pub const TOOLTIP_SELECTOR: &str = r#"[data-bs-toggle="tooltip"]"#;
pub const DISMISSIBLE_ALERT_SELECTOR: &str = ".alert-dismissible";
pub const IN_PAGE_ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;
pub const CONTACT_FORM_SELECTOR: &str = r#"form[method="POST"]"#;
pub const LOADER_BUTTON_SELECTOR: &str = r#"[data-action="load-api-data"]"#;

pub const SHOW_CLASS: &str = "show";
pub const FADE_IN_CLASS: &str = "fade-in";
pub const INVALID_CLASS: &str = "is-invalid";
pub const ALERT_INFO_CLASS: &str = "alert-info";
pub const ALERT_DANGER_CLASS: &str = "alert-danger";

pub const IDLE_LABEL: &str = "Load API Data";
pub const LOADING_LABEL_HTML: &str =
    r#"<span class="spinner-border spinner-border-sm" role="status"></span> Loading..."#;
pub const LOADED_LABEL: &str = "Data Loaded!";
pub const RETRY_LABEL: &str = "Try Again";
pub const LOAD_ERROR_PREFIX: &str = "Error loading data: ";

const VALIDATION_ALERT_CLASSES: &str = "alert alert-danger alert-dismissible fade show";

/// Visual classification of the loader button. Exactly one is applied at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Secondary,
    Success,
    Danger,
}

impl ButtonStyle {
    pub const ALL: [ButtonStyle; 3] = [Self::Secondary, Self::Success, Self::Danger];

    pub fn class(self) -> &'static str {
        match self {
            Self::Secondary => "btn-secondary",
            Self::Success => "btn-success",
            Self::Danger => "btn-danger",
        }
    }

    pub fn apply<E: Element>(self, button: &E) {
        for style in Self::ALL {
            if style != self {
                button.remove_class(style.class());
            }
        }
        button.add_class(self.class());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed(String),
}

/// What `init` found and wired up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitSummary {
    pub tooltips: usize,
    pub alerts: usize,
    pub anchors: usize,
    pub contact_form: bool,
    pub loader_buttons: usize,
}

/// Pretty-print a payload the way the loader shows it: two-space indent, keys in
/// the order they arrived.
pub fn render_payload(payload: &Value) -> Result<String, LoadError> {
    Ok(serde_json::to_string_pretty(payload)?)
}

/// Body of the alert inserted above an invalid contact form. It always lists
/// every rule, whichever fields actually failed.
pub fn validation_alert_html() -> String {
    let items: String = ContactField::ALL
        .iter()
        .map(|field| format!("<li>{}</li>", field.requirement()))
        .collect();
    format!(
        r#"<strong>Please fix the following errors:</strong><ul class="mb-0 mt-2">{items}</ul><button type="button" class="btn-close" data-bs-dismiss="alert"></button>"#
    )
}

pub struct PageController<D: Document> {
    document: D,
    scheduler: Rc<dyn Scheduler>,
    data_source: Rc<dyn DataSource>,
    spawner: Option<Rc<dyn Spawner>>,
    tooltips: Option<Rc<dyn TooltipCapability<D::Element>>>,
    config: Rc<ControllerConfig>,
}

impl<D: Document> Clone for PageController<D> {
    fn clone(&self) -> Self {
        Self {
            document: self.document.clone(),
            scheduler: self.scheduler.clone(),
            data_source: self.data_source.clone(),
            spawner: self.spawner.clone(),
            tooltips: self.tooltips.clone(),
            config: self.config.clone(),
        }
    }
}

impl<D: Document> PageController<D> {
    pub fn new(
        document: D,
        scheduler: impl Scheduler + 'static,
        data_source: impl DataSource + 'static,
    ) -> Self {
        Self {
            document,
            scheduler: Rc::new(scheduler),
            data_source: Rc::new(data_source),
            spawner: None,
            tooltips: None,
            config: Rc::new(ControllerConfig::default()),
        }
    }

    pub fn with_tooltips(mut self, tooltips: impl TooltipCapability<D::Element> + 'static) -> Self {
        self.tooltips = Some(Rc::new(tooltips));
        self
    }

    /// Needed for loader buttons to be bound during `init`.
    pub fn with_spawner(mut self, spawner: impl Spawner + 'static) -> Self {
        self.spawner = Some(Rc::new(spawner));
        self
    }

    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = Rc::new(config);
        self
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// One-time setup once the document structure is parsed. The steps are
    /// independent of each other.
    pub fn init(&self) -> InitSummary {
        let summary = InitSummary {
            tooltips: self.activate_tooltips(),
            alerts: self.schedule_alert_dismissal().len(),
            anchors: self.bind_anchor_scrolling(),
            contact_form: self.intercept_contact_form(),
            loader_buttons: self.bind_loader_buttons(),
        };
        info!(
            tooltips = summary.tooltips,
            alerts = summary.alerts,
            anchors = summary.anchors,
            contact_form = summary.contact_form,
            loader_buttons = summary.loader_buttons,
            "page controller initialized"
        );
        summary
    }

    pub fn activate_tooltips(&self) -> usize {
        let Some(tooltips) = &self.tooltips else {
            debug!("no tooltip capability; skipping tooltip activation");
            return 0;
        };
        let triggers = self.document.query_selector_all(TOOLTIP_SELECTOR);
        for trigger in &triggers {
            tooltips.attach(trigger);
        }
        triggers.len()
    }

    /// Fade out and then remove every dismissible alert currently on the page.
    /// An alert whose `show` class is gone by the time the first timer fires is
    /// left alone.
    pub fn schedule_alert_dismissal(&self) -> Vec<TimerHandle> {
        let fade = self.config.alert_fade_delay();
        self.document
            .query_selector_all(DISMISSIBLE_ALERT_SELECTOR)
            .into_iter()
            .map(|alert| {
                let scheduler = self.scheduler.clone();
                self.scheduler.schedule(
                    self.config.alert_dismiss_delay(),
                    Box::new(move || {
                        if !alert.has_class(SHOW_CLASS) {
                            return;
                        }
                        alert.remove_class(SHOW_CLASS);
                        scheduler.schedule(fade, Box::new(move || alert.remove()));
                    }),
                )
            })
            .collect()
    }

    pub fn bind_anchor_scrolling(&self) -> usize {
        let anchors = self.document.query_selector_all(IN_PAGE_ANCHOR_SELECTOR);
        for anchor in &anchors {
            let document = self.document.clone();
            let link = anchor.clone();
            self.document.add_listener(
                anchor,
                EventKind::Click,
                Rc::new(move |event: &DomEvent<D::Element>| {
                    event.prevent_default();
                    let Some(href) = link.attribute("href") else {
                        return;
                    };
                    match document.query_selector(&href) {
                        Some(target) => target.scroll_into_view(ScrollBlock::Start),
                        None => debug!(%href, "anchor target not found"),
                    }
                }),
            );
        }
        anchors.len()
    }

    pub fn intercept_contact_form(&self) -> bool {
        let Some(form) = self.document.query_selector(CONTACT_FORM_SELECTOR) else {
            return false;
        };
        let controller = self.clone();
        let target = form.clone();
        self.document.add_listener(
            &form,
            EventKind::Submit,
            Rc::new(move |event: &DomEvent<D::Element>| {
                if let Err(error) = controller.handle_contact_submit(&target, event) {
                    warn!(%error, "could not place validation alert");
                }
            }),
        );
        true
    }

    pub fn bind_loader_buttons(&self) -> usize {
        let buttons = self.document.query_selector_all(LOADER_BUTTON_SELECTOR);
        if buttons.is_empty() {
            return 0;
        }
        let Some(spawner) = self.spawner.clone() else {
            warn!(
                count = buttons.len(),
                "loader buttons present but no spawner configured; leaving them unbound"
            );
            return 0;
        };
        for button in &buttons {
            let controller = self.clone();
            let spawner = spawner.clone();
            let target = button.clone();
            self.document.add_listener(
                button,
                EventKind::Click,
                Rc::new(move |_event: &DomEvent<D::Element>| {
                    let controller = controller.clone();
                    let button = target.clone();
                    spawner.spawn_local(Box::pin(async move {
                        if let Err(error) = controller.load_api_data(&button).await {
                            error!(%error, "data loader could not run");
                        }
                    }));
                }),
            );
        }
        buttons.len()
    }

    /// Fetch the API payload and show it, driving `button` through
    /// loading → loaded/failed. A successful load resets the button after
    /// `loader_reset_ms`; a failed one leaves it in the retry state, enabled.
    pub async fn load_api_data(&self, button: &D::Element) -> Result<LoadOutcome, ControllerError> {
        let container = self.require(API_DATA_ID)?;
        let content = self.require(API_CONTENT_ID)?;

        button.set_disabled(true);
        button.set_inner_html(LOADING_LABEL_HTML);

        match self.fetch_rendered().await {
            Ok(rendered) => {
                content.set_text_content(&rendered);
                container.set_display("block");
                container.add_class(FADE_IN_CLASS);

                button.set_inner_html(LOADED_LABEL);
                ButtonStyle::Success.apply(button);

                let button = button.clone();
                self.scheduler.schedule(
                    self.config.loader_reset_delay(),
                    Box::new(move || {
                        button.set_inner_html(IDLE_LABEL);
                        ButtonStyle::Secondary.apply(&button);
                        button.set_disabled(false);
                    }),
                );
                Ok(LoadOutcome::Loaded)
            }
            Err(load_error) => {
                error!(error = %load_error, "error loading API data");
                let message = load_error.to_string();

                content.set_text_content(&format!("{LOAD_ERROR_PREFIX}{message}"));
                container.set_display("block");
                container.remove_class(ALERT_INFO_CLASS);
                container.add_class(ALERT_DANGER_CLASS);

                button.set_inner_html(RETRY_LABEL);
                ButtonStyle::Danger.apply(button);
                button.set_disabled(false);
                Ok(LoadOutcome::Failed(message))
            }
        }
    }

    /// Fetch the configured endpoint and render it for display.
    pub async fn fetch_rendered(&self) -> Result<String, LoadError> {
        let payload = self.data_source.fetch_json(&self.config.api_path).await?;
        render_payload(&payload)
    }

    pub fn validate_contact_form(&self) -> bool {
        self.contact_validation().is_valid()
    }

    /// Recompute the `is-invalid` flag of each contact field present on the page.
    pub fn contact_validation(&self) -> ContactValidation {
        let fields = ContactField::ALL.map(|field| {
            let element = self.document.element_by_id(field.element_id());
            if let Some(element) = &element {
                element.remove_class(INVALID_CLASS);
            }
            (field, element)
        });

        let value_of = |index: usize| fields[index].1.as_ref().map(|element| element.value());
        let (name, email, message) = (value_of(0), value_of(1), value_of(2));
        let report =
            validation::validate_fields(name.as_deref(), email.as_deref(), message.as_deref());

        for (field, element) in &fields {
            if let Some(element) = element {
                if report.verdict(*field) == Some(false) {
                    element.add_class(INVALID_CLASS);
                }
            }
        }

        if !report.is_valid() {
            debug!(failed = ?report.failed_fields(), "contact form rejected");
        }
        report
    }

    /// Submit handler for the contact form. Returns whether the native submission
    /// may proceed. An invalid form is always blocked, even when the alert
    /// cannot be placed.
    pub fn handle_contact_submit(
        &self,
        form: &D::Element,
        event: &DomEvent<D::Element>,
    ) -> Result<bool, ControllerError> {
        if self.validate_contact_form() {
            return Ok(true);
        }
        event.prevent_default();
        self.show_validation_alert(form)?;
        Ok(false)
    }

    fn show_validation_alert(&self, form: &D::Element) -> Result<(), DomError> {
        let alert = self.document.create_element("div")?;
        alert.set_class_name(VALIDATION_ALERT_CLASSES);
        alert.set_inner_html(&validation_alert_html());
        form.insert_before(&alert)?;
        alert.scroll_into_view(ScrollBlock::Center);
        Ok(())
    }

    fn require(&self, id: &'static str) -> Result<D::Element, ControllerError> {
        self.document
            .element_by_id(id)
            .ok_or(ControllerError::MissingElement(id))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
