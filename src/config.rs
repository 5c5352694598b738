// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use lazy_photos::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Point the client at a different deployment
//! config.server_url = Some("https://photos.example.com".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "LazyPhotos";

/// Base URL of the hosted Lazy Photos API, used when no override is set.
pub const DEFAULT_SERVER_URL: &str = "https://lazy-photo-api.azurewebsites.net";

/// Number of photos requested per page when listing the library.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Lazy Photos API.
    pub server_url: Option<String>,
    /// Preferred theme: "light", "dark", or unset to follow the system.
    #[serde(default)]
    pub theme: Option<String>,
    /// Photos fetched per listing request.
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: None,
            theme: None,
            page_size: Some(DEFAULT_PAGE_SIZE),
        }
    }
}

impl Config {
    /// Returns the effective API base URL, falling back to the hosted service.
    pub fn server_url(&self) -> &str {
        self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    /// Returns the effective listing page size.
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_uses_hosted_service() {
        let config = Config::default();
        assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
        assert!(config.theme.is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("settings.toml");

        let config = Config {
            server_url: Some("https://photos.example.com".to_string()),
            theme: Some("dark".to_string()),
            page_size: Some(50),
        };
        save_to_path(&config, &path).expect("save failed");

        let loaded = load_from_path(&path).expect("load failed");
        assert_eq!(loaded.server_url(), "https://photos.example.com");
        assert_eq!(loaded.theme.as_deref(), Some("dark"));
        assert_eq!(loaded.page_size(), 50);
    }

    #[test]
    fn load_from_missing_path_is_an_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("does-not-exist.toml");
        assert!(load_from_path(&path).is_err());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("settings.toml");
        fs::write(&path, "not = [valid").expect("write failed");

        let loaded = load_from_path(&path).expect("load failed");
        assert_eq!(loaded.server_url(), DEFAULT_SERVER_URL);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nested").join("settings.toml");
        save_to_path(&Config::default(), &path).expect("save failed");
        assert!(path.exists());
    }
}
