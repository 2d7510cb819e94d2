use page_controller::ControllerConfig;
use tracing::warn;

/// Id of the `<script type="application/json">` block pages may use to override
/// controller settings.
pub const CONFIG_ELEMENT_ID: &str = "page-controller-config";

/// Settings from the page's config block; defaults when absent or malformed.
pub fn parse_config(raw: Option<&str>) -> ControllerConfig {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return ControllerConfig::default();
    };
    match ControllerConfig::from_json(raw) {
        Ok(config) => config,
        Err(error) => {
            warn!(%error, "ignoring malformed page controller config");
            ControllerConfig::default()
        }
    }
}
