// SPDX-License-Identifier: MPL-2.0
//! This module handles the toast configuration, including loading and saving
//! preferences to a `toasts.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use toast_queue::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Slow the auto-hide down a bit
//! config.auto_hide_delay_ms = Some(3_500);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

mod defaults;

pub use defaults::*;

use crate::error::Result;
use crate::notifications::AutoHideDelay;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "toasts.toml";
const APP_NAME: &str = "ToastQueue";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub auto_hide_delay_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_hide_delay_ms: Some(DEFAULT_AUTO_HIDE_DELAY_MS),
        }
    }
}

impl Config {
    /// Returns the configured auto-hide delay, clamped to the valid range.
    #[must_use]
    pub fn auto_hide_delay(&self) -> AutoHideDelay {
        self.auto_hide_delay_ms
            .map(AutoHideDelay::from_millis)
            .unwrap_or_default()
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
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "invalid toast config, using defaults");
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
