// SPDX-License-Identifier: MPL-2.0
//! Colors and the feature colormap.

use serde::{Deserialize, Serialize};

/// RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);

    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::MAGENTA
    }
}

/// Jet colormap: blue, cyan, green, yellow, red over `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Colormap;

impl Colormap {
    /// Color for a normalized value. Values outside `[0, 1]` (and NaN) are clamped.
    #[must_use]
    pub fn color(self, value: f32) -> Color {
        let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        let channel = |center: f32| (1.5 - (4.0 * v - center).abs()).clamp(0.0, 1.0);
        Color::rgb(channel(3.0), channel(2.0), channel(1.0))
    }

    /// Color of `value` normalized into `[min, max]`. A degenerate range maps to the low end.
    #[must_use]
    pub fn color_in_range(self, value: f32, min: f32, max: f32) -> Color {
        let span = max - min;
        if span.abs() <= f32::EPSILON {
            return self.color(0.0);
        }
        self.color((value - min) / span)
    }
}
