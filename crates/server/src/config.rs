use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::warn;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_bind: String,
    pub static_dir: PathBuf,
    pub site_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "0.0.0.0:5001".into(),
            static_dir: PathBuf::from("./static"),
            site_name: "Page Server".into(),
        }
    }
}

/// Defaults, then `server.toml` in the working directory, then the environment.
pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    apply_overrides(Settings::default(), file.as_deref(), |key| {
        std::env::var(key).ok()
    })
}

pub(crate) fn apply_overrides(
    mut settings: Settings,
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("bind_addr") {
                    settings.server_bind = v.clone();
                }
                if let Some(v) = file_cfg.get("static_dir") {
                    settings.static_dir = normalize_static_dir(v);
                }
                if let Some(v) = file_cfg.get("site_name") {
                    settings.site_name = v.clone();
                }
            }
            Err(error) => warn!(%error, file = SETTINGS_FILE, "ignoring unreadable settings file"),
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("STATIC_DIR") {
        settings.static_dir = normalize_static_dir(&v);
    }
    if let Some(v) = env("APP__STATIC_DIR") {
        settings.static_dir = normalize_static_dir(&v);
    }

    if let Some(v) = env("SITE_NAME") {
        settings.site_name = v;
    }
    if let Some(v) = env("APP__SITE_NAME") {
        settings.site_name = v;
    }

    settings
}

pub(crate) fn normalize_static_dir(raw: &str) -> PathBuf {
    let raw = raw.trim();
    if raw.is_empty() {
        return Settings::default().static_dir;
    }
    PathBuf::from(raw.replace('\\', "/"))
}

/// Pages still render without static assets, so a missing directory only warns.
pub fn check_static_dir(path: &Path) -> bool {
    if path.is_dir() {
        return true;
    }
    warn!(
        static_dir = %path.display(),
        "static directory not found; the browser bundle will not be served"
    );
    false
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
