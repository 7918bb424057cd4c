// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use spot_lens::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration (falls back to defaults with a warning key)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.display.radius_display_ratio = Some(0.5);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::domain::{Color, TrackDisplayMode};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Warning key returned when an existing config file cannot be read.
pub const CONFIG_LOAD_WARNING: &str = "config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// Overlay display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Drawn spot radius relative to the detector radius.
    #[serde(
        default = "default_radius_display_ratio",
        skip_serializing_if = "Option::is_none"
    )]
    pub radius_display_ratio: Option<f32>,

    #[serde(default = "default_spot_visible", skip_serializing_if = "Option::is_none")]
    pub spot_visible: Option<bool>,

    #[serde(default = "default_track_visible", skip_serializing_if = "Option::is_none")]
    pub track_visible: Option<bool>,

    /// Color of spots that are not colored by a feature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot_color: Option<Color>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_display_mode: Option<TrackDisplayMode>,

    #[serde(
        default = "default_track_display_depth",
        skip_serializing_if = "Option::is_none"
    )]
    pub track_display_depth: Option<usize>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            radius_display_ratio: default_radius_display_ratio(),
            spot_visible: default_spot_visible(),
            track_visible: default_track_visible(),
            spot_color: Some(Color::default()),
            track_display_mode: Some(TrackDisplayMode::default()),
            track_display_depth: default_track_display_depth(),
        }
    }
}

/// Click selection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SelectionConfig {
    /// Selection radius in calibrated units. When unset, the detector's
    /// expected radius is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub selection: SelectionConfig,
}

impl Config {
    /// Radius display ratio, clamped to the supported range.
    #[must_use]
    pub fn radius_display_ratio(&self) -> f32 {
        self.display
            .radius_display_ratio
            .unwrap_or(DEFAULT_RADIUS_DISPLAY_RATIO)
            .clamp(MIN_RADIUS_DISPLAY_RATIO, MAX_RADIUS_DISPLAY_RATIO)
    }

    /// Selection radius override, ignoring non-positive values.
    #[must_use]
    pub fn selection_radius(&self) -> Option<f32> {
        self.selection
            .radius
            .filter(|r| r.is_finite() && *r >= MIN_SELECTION_RADIUS)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_radius_display_ratio() -> Option<f32> {
    Some(DEFAULT_RADIUS_DISPLAY_RATIO)
}

fn default_spot_visible() -> Option<bool> {
    Some(DEFAULT_SPOT_VISIBLE)
}

fn default_track_visible() -> Option<bool> {
    Some(DEFAULT_TRACK_VISIBLE)
}

fn default_track_display_depth() -> Option<usize> {
    Some(DEFAULT_TRACK_DISPLAY_DEPTH)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("Falling back to default config: {}", err);
                    return (Config::default(), Some(CONFIG_LOAD_WARNING.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
