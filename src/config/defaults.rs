// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Overlay**: spot radius display ratio and visibility
//! - **Tracks**: track display depth
//! - **Selection**: selection radius bounds

// ==========================================================================
// Overlay Defaults
// ==========================================================================

/// Default ratio between the drawn spot radius and the detector radius.
pub const DEFAULT_RADIUS_DISPLAY_RATIO: f32 = 1.0;

/// Minimum radius display ratio.
pub const MIN_RADIUS_DISPLAY_RATIO: f32 = 0.1;

/// Maximum radius display ratio.
pub const MAX_RADIUS_DISPLAY_RATIO: f32 = 5.0;

/// Whether spots are drawn when a session starts.
pub const DEFAULT_SPOT_VISIBLE: bool = true;

/// Whether tracks are drawn when a session starts.
pub const DEFAULT_TRACK_VISIBLE: bool = true;

// ==========================================================================
// Track Defaults
// ==========================================================================

/// Default number of frames shown around the current one in local track modes.
pub const DEFAULT_TRACK_DISPLAY_DEPTH: usize = 10;

// ==========================================================================
// Selection Defaults
// ==========================================================================

/// Smallest accepted selection radius override, in calibrated units.
pub const MIN_SELECTION_RADIUS: f32 = 0.01;
