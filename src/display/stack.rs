// SPDX-License-Identifier: MPL-2.0
//! Image hyperstack and the view that displays it.
//!
//! A hyperstack is a single-channel image with `nslices` z-slices per time
//! frame. Planes are stored frame-major: all slices of frame 1, then all
//! slices of frame 2, and so on. Slice and frame positions are 1-based.

use super::controller::DisplaySurface;
use crate::domain::Settings;
use crate::error::{Error, Result};
use image_rs::GrayImage;

/// Single-channel 8-bit image with z and t dimensions.
#[derive(Debug, Clone)]
pub struct HyperStack {
    title: String,
    width: u32,
    height: u32,
    nslices: usize,
    nframes: usize,
    planes: Vec<GrayImage>,
}

impl HyperStack {
    /// Creates a black stack.
    pub fn blank(
        title: impl Into<String>,
        width: u32,
        height: u32,
        nslices: usize,
        nframes: usize,
    ) -> Result<Self> {
        if width == 0 || height == 0 || nslices == 0 || nframes == 0 {
            return Err(Error::Stack(format!(
                "invalid dimensions {}x{}x{}x{}",
                width, height, nslices, nframes
            )));
        }
        let planes = (0..nslices * nframes)
            .map(|_| GrayImage::new(width, height))
            .collect();
        Ok(Self {
            title: title.into(),
            width,
            height,
            nslices,
            nframes,
            planes,
        })
    }

    /// Creates the black placeholder stack described by acquisition settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::blank(
            "Empty",
            settings.width,
            settings.height,
            settings.nslices,
            settings.nframes,
        )
    }

    /// Builds a stack from existing planes, frame-major.
    pub fn from_planes(
        title: impl Into<String>,
        planes: Vec<GrayImage>,
        nslices: usize,
        nframes: usize,
    ) -> Result<Self> {
        if planes.len() != nslices * nframes || planes.is_empty() {
            return Err(Error::Stack(format!(
                "expected {} planes, got {}",
                nslices * nframes,
                planes.len()
            )));
        }
        let (width, height) = planes[0].dimensions();
        if planes.iter().any(|p| p.dimensions() != (width, height)) {
            return Err(Error::Stack("planes differ in size".to_string()));
        }
        Ok(Self {
            title: title.into(),
            width,
            height,
            nslices,
            nframes,
            planes,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn nslices(&self) -> usize {
        self.nslices
    }

    #[must_use]
    pub fn nframes(&self) -> usize {
        self.nframes
    }

    /// Plane at a 1-based slice and frame.
    #[must_use]
    pub fn plane(&self, slice: usize, frame: usize) -> Option<&GrayImage> {
        if slice == 0 || frame == 0 || slice > self.nslices || frame > self.nframes {
            return None;
        }
        self.planes.get((frame - 1) * self.nslices + (slice - 1))
    }
}

/// Maps screen coordinates to image pixels.
///
/// `src_x`/`src_y` is the image position shown at the screen origin; it is
/// negative when the image is letterboxed inside a larger canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub src_x: f32,
    pub src_y: f32,
    pub magnification: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            src_x: 0.0,
            src_y: 0.0,
            magnification: 1.0,
        }
    }
}

impl Viewport {
    /// Viewport that fits an image inside `bounds` (`ContentFit::Contain` logic).
    #[must_use]
    pub fn fit(image_width: u32, image_height: u32, bounds_width: f32, bounds_height: f32) -> Self {
        if image_width == 0 || image_height == 0 || bounds_width <= 0.0 || bounds_height <= 0.0 {
            return Self::default();
        }
        let img_aspect = image_width as f32 / image_height as f32;
        let bounds_aspect = bounds_width / bounds_height;

        let (magnification, offset_x, offset_y) = if img_aspect > bounds_aspect {
            // Image is wider - fit to width
            let magnification = bounds_width / image_width as f32;
            let display_height = image_height as f32 * magnification;
            (magnification, 0.0, (bounds_height - display_height) / 2.0)
        } else {
            // Image is taller - fit to height
            let magnification = bounds_height / image_height as f32;
            let display_width = image_width as f32 * magnification;
            (magnification, (bounds_width - display_width) / 2.0, 0.0)
        };

        Self {
            src_x: -offset_x / magnification,
            src_y: -offset_y / magnification,
            magnification,
        }
    }

    /// Screen position of a (fractional) pixel coordinate.
    #[must_use]
    pub fn to_screen(&self, px: f32, py: f32) -> (f32, f32) {
        (
            (px - self.src_x) * self.magnification,
            (py - self.src_y) * self.magnification,
        )
    }
}

/// A hyperstack shown through a viewport at a slice/frame position.
#[derive(Debug, Clone)]
pub struct StackView {
    stack: HyperStack,
    viewport: Viewport,
    slice: usize,
    frame: usize,
    revision: u64,
}

impl StackView {
    #[must_use]
    pub fn new(stack: HyperStack) -> Self {
        Self {
            stack,
            viewport: Viewport::default(),
            slice: 1,
            frame: 1,
            revision: 0,
        }
    }

    #[must_use]
    pub fn stack(&self) -> &HyperStack {
        &self.stack
    }

    /// Gives the displayed stack back, dropping the view position.
    #[must_use]
    pub fn into_stack(self) -> HyperStack {
        self.stack
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Moves to a 1-based slice and frame, clamped to the stack dimensions.
    pub fn set_position(&mut self, slice: usize, frame: usize) {
        self.slice = slice.clamp(1, self.stack.nslices());
        self.frame = frame.clamp(1, self.stack.nframes());
        self.request_redraw();
    }

    /// Increments the revision observed by the renderer.
    pub fn request_redraw(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl DisplaySurface for StackView {
    fn offscreen_x(&self, screen_x: f32) -> i32 {
        (self.viewport.src_x + screen_x / self.viewport.magnification).floor() as i32
    }

    fn offscreen_y(&self, screen_y: f32) -> i32 {
        (self.viewport.src_y + screen_y / self.viewport.magnification).floor() as i32
    }

    fn current_slice(&self) -> usize {
        self.slice
    }

    fn current_frame(&self) -> usize {
        self.frame
    }
}
