// SPDX-License-Identifier: MPL-2.0
//! This module handles the page layer's configuration, loaded from a
//! `settings.toml` file.
//!
//! Every section is optional; missing keys take the values in [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use page_feedback::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.language = Some("fr".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "PageFeedback";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub ttl_ms: u64,
    pub exit_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            exit_ms: DEFAULT_EXIT_ANIMATION_MS,
        }
    }
}

impl NotificationConfig {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    #[must_use]
    pub fn exit(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    pub redirect_delay_ms: u64,
    pub request_timeout_ms: u64,
    /// Base URL that relative form endpoints are resolved against.
    pub base_url: Option<String>,
    pub success_field: String,
    pub error_field: String,
    pub csrf_field: String,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            base_url: None,
            success_field: DEFAULT_SUCCESS_FIELD.to_string(),
            error_field: DEFAULT_ERROR_FIELD.to_string(),
            csrf_field: DEFAULT_CSRF_FIELD.to_string(),
        }
    }
}

impl SubmissionConfig {
    #[must_use]
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub scroll_threshold: f64,
    pub tooltip_fade_in_ms: u64,
    pub tooltip_fade_out_ms: u64,
    pub download_reset_ms: u64,
    pub reveal_threshold: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            tooltip_fade_in_ms: DEFAULT_TOOLTIP_FADE_IN_MS,
            tooltip_fade_out_ms: DEFAULT_TOOLTIP_FADE_OUT_MS,
            download_reset_ms: DEFAULT_DOWNLOAD_RESET_MS,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
        }
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

/// Loads a config file; unparseable content yields the defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            Ok(Config::default())
        }
    }
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
    fn save_and_load_round_trip_preserves_values() {
        let mut config = Config {
            language: Some("fr".to_string()),
            ..Config::default()
        };
        config.notifications.ttl_ms = 8_000;
        config.submission.base_url = Some("https://example.test".to_string());

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[notifications]\nttl_ms = 1000\n").expect("write");

        let loaded = load_from_path(&config_path).expect("load");
        assert_eq!(loaded.notifications.ttl_ms, 1_000);
        assert_eq!(loaded.notifications.exit_ms, DEFAULT_EXIT_ANIMATION_MS);
        assert_eq!(loaded.submission, SubmissionConfig::default());
    }

    #[test]
    fn load_from_missing_path_is_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn default_timings_match_page_contract() {
        let config = Config::default();
        assert_eq!(config.notifications.ttl(), Duration::from_millis(5_000));
        assert_eq!(config.notifications.exit(), Duration::from_millis(500));
        assert_eq!(config.submission.redirect_delay(), Duration::from_millis(2_000));
        assert_eq!(config.ui.scroll_threshold, 50.0);
    }
}
