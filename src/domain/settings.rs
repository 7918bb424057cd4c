// SPDX-License-Identifier: MPL-2.0
//! Acquisition settings and spatial calibration.

use serde::{Deserialize, Serialize};

/// Physical size of one pixel along each axis (z is the slice spacing).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    pub dx: f32,
    pub dy: f32,
    pub dz: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            dx: 1.0,
            dy: 1.0,
            dz: 1.0,
        }
    }
}

impl Calibration {
    /// Converts pixel indices and a 1-based slice number to calibrated coordinates.
    #[must_use]
    pub fn to_physical(self, ix: i32, iy: i32, slice: usize) -> [f32; 3] {
        [
            ix as f32 * self.dx,
            iy as f32 * self.dy,
            slice.saturating_sub(1) as f32 * self.dz,
        ]
    }

    /// 1-based slice number holding a calibrated z coordinate.
    #[must_use]
    pub fn slice_of(self, z: f32) -> usize {
        if self.dz <= 0.0 {
            return 1;
        }
        let index = (z / self.dz).round();
        if index <= 0.0 {
            1
        } else {
            index as usize + 1
        }
    }
}

/// Dimensions and calibration of the image the spots were detected in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub nslices: usize,
    pub nframes: usize,
    #[serde(flatten)]
    pub calibration: Calibration,
    /// Radius the detector expected spots to have, in calibrated units.
    pub expected_radius: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            nslices: 1,
            nframes: 1,
            calibration: Calibration::default(),
            expected_radius: 5.0,
        }
    }
}
