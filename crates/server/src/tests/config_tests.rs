use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_match_the_development_server() {
    let settings = apply_overrides(Settings::default(), None, no_env);
    assert_eq!(settings.server_bind, "0.0.0.0:5001");
    assert_eq!(settings.static_dir, PathBuf::from("./static"));
}

#[test]
fn file_values_apply_before_environment() {
    let file = r#"
bind_addr = "127.0.0.1:9000"
static_dir = "assets"
site_name = "From File"
"#;
    let settings = apply_overrides(Settings::default(), Some(file), |key| {
        (key == "APP__SITE_NAME").then(|| "From Env".to_string())
    });
    assert_eq!(settings.server_bind, "127.0.0.1:9000");
    assert_eq!(settings.static_dir, PathBuf::from("assets"));
    assert_eq!(settings.site_name, "From Env");
}

#[test]
fn prefixed_env_wins_over_plain_env() {
    let settings = apply_overrides(Settings::default(), None, |key| match key {
        "SERVER_BIND" => Some("127.0.0.1:1".into()),
        "APP__BIND_ADDR" => Some("127.0.0.1:2".into()),
        _ => None,
    });
    assert_eq!(settings.server_bind, "127.0.0.1:2");
}

#[test]
fn malformed_file_is_ignored() {
    let settings = apply_overrides(Settings::default(), Some("bind_addr = ["), no_env);
    assert_eq!(settings.server_bind, Settings::default().server_bind);
}

#[test]
fn normalizes_static_dir() {
    assert_eq!(normalize_static_dir("  "), PathBuf::from("./static"));
    assert_eq!(
        normalize_static_dir("C:\\site\\static"),
        PathBuf::from("C:/site/static")
    );
}

#[test]
fn static_dir_check_reports_presence() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("page_server_static_test_{suffix}"));
    assert!(!check_static_dir(&temp_root));

    fs::create_dir_all(&temp_root).expect("temp root");
    assert!(check_static_dir(&temp_root));
    fs::remove_dir_all(temp_root).expect("cleanup");
}
