use std::time::Duration;

use serde::Deserialize;
use shared::protocol::api_data_route;

/// Endpoint and timings used by the controller. Every field may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub api_path: String,
    pub alert_dismiss_ms: u64,
    pub alert_fade_ms: u64,
    pub loader_reset_ms: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            api_path: api_data_route().to_string(),
            alert_dismiss_ms: 5000,
            alert_fade_ms: 150,
            loader_reset_ms: 3000,
        }
    }
}

impl ControllerConfig {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn alert_dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.alert_dismiss_ms)
    }

    pub fn alert_fade_delay(&self) -> Duration {
        Duration::from_millis(self.alert_fade_ms)
    }

    pub fn loader_reset_delay(&self) -> Duration {
        Duration::from_millis(self.loader_reset_ms)
    }
}
