// SPDX-License-Identifier: MPL-2.0
use lazy_photos::config::{self, Config, DEFAULT_PAGE_SIZE, DEFAULT_SERVER_URL};
use lazy_photos::session::{self, Session};
use tempfile::tempdir;

#[test]
fn test_config_roundtrip_via_files() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let initial = Config {
        server_url: Some("https://photos.example.com".to_string()),
        theme: Some("dark".to_string()),
        page_size: Some(40),
    };
    config::save_to_path(&initial, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    assert_eq!(loaded.server_url(), "https://photos.example.com");
    assert_eq!(loaded.theme.as_deref(), Some("dark"));
    assert_eq!(loaded.page_size(), 40);

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn test_missing_config_falls_back_to_defaults() {
    let config = Config::default();
    assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
    assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
}

#[test]
fn test_session_roundtrip_via_files() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("session.toml");

    let mut stored = Session::default();
    stored.set("access".to_string(), "refresh".to_string(), "ada".to_string());
    session::save_to_path(&stored, &path).expect("Failed to write session file");

    let loaded = session::load_from_path(&path).expect("Failed to load session from path");
    assert_eq!(loaded.username(), Some("ada"));
    assert_eq!(loaded.access_token(), Some("access"));
    assert_eq!(loaded.refresh_token(), Some("refresh"));

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn test_cleared_session_round_trips_as_logged_out() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("session.toml");

    let mut stored = Session::default();
    stored.set("access".to_string(), "refresh".to_string(), "ada".to_string());
    stored.clear();
    session::save_to_path(&stored, &path).expect("Failed to write session file");

    let loaded = session::load_from_path(&path).expect("Failed to load session from path");
    assert!(!loaded.is_authenticated());
}
