// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::domain::{Feature, TrackDisplayMode};
use crate::ui::spot_canvas::CanvasMessage;
use std::fmt;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Canvas(CanvasMessage),
    NextFrame,
    PreviousFrame,
    NextSlice,
    PreviousSlice,
    SpotsVisible(bool),
    TracksVisible(bool),
    ColorBy(ColorChoice),
    TrackModeSelected(TrackDisplayMode),
    RadiusRatioChanged(f32),
    /// Persist the current display settings to `settings.toml`.
    SaveSettings,
}

impl From<CanvasMessage> for Message {
    fn from(message: CanvasMessage) -> Self {
        Message::Canvas(message)
    }
}

/// Entry of the "color by" list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Uniform,
    Feature(Feature),
}

impl ColorChoice {
    #[must_use]
    pub fn all() -> Vec<ColorChoice> {
        std::iter::once(ColorChoice::Uniform)
            .chain(Feature::ALL.into_iter().map(ColorChoice::Feature))
            .collect()
    }

    #[must_use]
    pub fn feature(self) -> Option<Feature> {
        match self {
            ColorChoice::Uniform => None,
            ColorChoice::Feature(feature) => Some(feature),
        }
    }
}

impl From<Option<Feature>> for ColorChoice {
    fn from(feature: Option<Feature>) -> Self {
        feature.map_or(ColorChoice::Uniform, ColorChoice::Feature)
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorChoice::Uniform => f.write_str("Uniform color"),
            ColorChoice::Feature(feature) => feature.fmt(f),
        }
    }
}

/// Runtime flags passed in from the command line.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional spot file to load on startup.
    pub spots_path: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `SPOT_LENS_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
