// SPDX-License-Identifier: MPL-2.0
//! Spot selection and edit controller.
//!
//! Turns pointer clicks on the displayed stack into selection changes and
//! edit-mode transitions. At most one spot is edited at a time:
//!
//! - single click while idle: select the nearest spot of the current frame
//!   (shift adds to the selection instead of replacing it)
//! - single click while editing: ignored
//! - double click while idle: clear the selection, then edit the nearest spot
//!   when the click falls within the selection radius, or a new spot created
//!   at the click location otherwise
//! - double click while editing: clear the selection and leave edit mode

use crate::domain::{Calibration, SelectionMode, Spot, SpotCollection};

/// Host surface the spots are displayed on.
pub trait DisplaySurface {
    /// Converts a screen x coordinate to an image pixel column.
    fn offscreen_x(&self, screen_x: f32) -> i32;
    /// Converts a screen y coordinate to an image pixel row.
    fn offscreen_y(&self, screen_y: f32) -> i32;
    /// Currently displayed slice, 1-based.
    fn current_slice(&self) -> usize;
    /// Currently displayed frame, 1-based.
    fn current_frame(&self) -> usize;
}

/// A pointer click, independent of any windowing toolkit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub x: f32,
    pub y: f32,
    /// 1 for a single click, 2 for a double click, and so on.
    pub click_count: u32,
    /// Whether the user asked to add to the selection (shift held).
    pub additive: bool,
}

impl ClickEvent {
    #[must_use]
    pub fn single(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            click_count: 1,
            additive: false,
        }
    }

    #[must_use]
    pub fn double(x: f32, y: f32) -> Self {
        Self {
            click_count: 2,
            ..Self::single(x, y)
        }
    }

    #[must_use]
    pub fn with_additive(mut self, additive: bool) -> Self {
        self.additive = additive;
        self
    }
}

/// Edit mode of the controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditState {
    /// Plain selection mode.
    #[default]
    Idle,
    /// One spot is being edited.
    Editing(Spot),
}

/// Effects produced by a click, for the displayer to dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Selection listeners must be told about a new selection target.
    SelectionChanged {
        target: Option<Spot>,
        /// 0-based frame the click happened in.
        frame: usize,
        mode: SelectionMode,
    },
    /// The overlay must show a new edited spot (or none).
    EditedSpotChanged(Option<Spot>),
}

/// Holds the edit state for one display session.
#[derive(Debug, Clone)]
pub struct SpotEditController {
    state: EditState,
    calibration: Calibration,
    radius: f32,
}

impl SpotEditController {
    #[must_use]
    pub fn new(calibration: Calibration, radius: f32) -> Self {
        Self {
            state: EditState::Idle,
            calibration,
            radius,
        }
    }

    #[must_use]
    pub fn state(&self) -> &EditState {
        &self.state
    }

    #[must_use]
    pub fn edited_spot(&self) -> Option<&Spot> {
        match &self.state {
            EditState::Idle => None,
            EditState::Editing(spot) => Some(spot),
        }
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }

    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    /// Leaves edit mode without any other effect. Used on display teardown.
    pub fn reset(&mut self) {
        self.state = EditState::Idle;
    }

    /// Calibrated location of a click on the surface.
    #[must_use]
    pub fn click_location<S>(&self, event: &ClickEvent, surface: &S) -> [f32; 3]
    where
        S: DisplaySurface + ?Sized,
    {
        let ix = surface.offscreen_x(event.x);
        let iy = surface.offscreen_y(event.y);
        self.calibration
            .to_physical(ix, iy, surface.current_slice())
    }

    /// Handles a click on the surface against the spots displayed in its current frame.
    pub fn handle_click<S>(
        &mut self,
        event: &ClickEvent,
        surface: &S,
        spots: &SpotCollection,
    ) -> Vec<Effect>
    where
        S: DisplaySurface + ?Sized,
    {
        let location = self.click_location(event, surface);
        let frame = surface.current_frame().saturating_sub(1);
        let target = spots.closest_spot(location, frame);

        match event.click_count {
            1 => {
                if self.is_editing() {
                    return Vec::new();
                }
                let mode = if event.additive {
                    SelectionMode::Add
                } else {
                    SelectionMode::Replace
                };
                vec![Effect::SelectionChanged {
                    target: target.cloned(),
                    frame,
                    mode,
                }]
            }
            2 => {
                let clear = Effect::SelectionChanged {
                    target: None,
                    frame,
                    mode: SelectionMode::Replace,
                };

                self.state = match std::mem::take(&mut self.state) {
                    EditState::Idle => {
                        log::debug!("Entering edit mode in frame {}", frame);
                        let radius_sq = self.radius * self.radius;
                        let spot = match target {
                            Some(spot) if spot.square_distance_to_point(location) <= radius_sq => {
                                log::debug!("Editing spot {}", spot.name());
                                spot.clone()
                            }
                            _ => {
                                let spot = Spot::new(location);
                                log::debug!("Creating new spot {} at {:?}", spot.name(), location);
                                spot
                            }
                        };
                        EditState::Editing(spot)
                    }
                    EditState::Editing(spot) => {
                        log::debug!("Leaving edit mode, was editing {}", spot.name());
                        EditState::Idle
                    }
                };

                vec![clear, Effect::EditedSpotChanged(self.edited_spot().cloned())]
            }
            _ => Vec::new(),
        }
    }
}
