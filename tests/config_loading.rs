//! Config file discovery under the user's config directory

use serial_test::serial;
use taskdeck::config::{get_app_dir, load_config, save_config, Config, DEFAULT_SERVER_URL};

fn setup_temp_home() -> tempfile::TempDir {
    let temp = tempfile::TempDir::new().unwrap();
    std::env::set_var("HOME", temp.path());
    std::env::set_var("XDG_CONFIG_HOME", temp.path().join(".config"));
    temp
}

#[test]
#[serial]
fn test_missing_config_uses_defaults() {
    let _temp = setup_temp_home();

    assert!(load_config().unwrap().is_none());
    let config = Config::load().unwrap();
    assert_eq!(config.server.base_url, DEFAULT_SERVER_URL);
}

#[test]
#[serial]
fn test_saved_config_is_loaded() {
    let _temp = setup_temp_home();

    let mut config = Config::default();
    config.server.base_url = "http://tasks.local:8080".to_string();
    config.ui.week_starts_monday = false;
    save_config(&config).unwrap();

    let loaded = Config::load().unwrap();
    assert_eq!(loaded.server.base_url, "http://tasks.local:8080");
    assert!(!loaded.ui.week_starts_monday);
    assert_eq!(loaded.server_url(Some("http://override:1")), "http://override:1");
}

#[test]
#[serial]
fn test_invalid_config_is_an_error() {
    let _temp = setup_temp_home();

    let path = get_app_dir().unwrap().join("config.toml");
    std::fs::write(&path, "[server\nbase_url = ").unwrap();

    let err = Config::load().unwrap_err();
    assert!(err.to_string().contains("Invalid config file"));
}
