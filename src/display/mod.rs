// SPDX-License-Identifier: MPL-2.0
//! Hyperstack spot displayer.
//!
//! [`SpotDisplayer`] owns the stack view, the spot and track overlays, and the
//! [`SpotEditController`]. It follows the same "state down, effects up"
//! pattern as the rest of the UI: clicks go in through
//! [`SpotDisplayer::mouse_clicked`], selection changes come out both to the
//! registered [`SelectionListener`]s and as returned [`Effect`]s.

mod controller;
mod overlay;
mod stack;

pub use controller::{ClickEvent, DisplaySurface, EditState, Effect, SpotEditController};
pub use overlay::{SpotMark, SpotOverlay, TrackOverlay, TrackSegment};
pub use stack::{HyperStack, StackView, Viewport};

use crate::domain::{
    Calibration, Color, Colormap, Feature, SelectionMode, Settings, Spot, SpotCollection, SpotId,
    TrackDisplayMode, TrackLink,
};
use crate::error::Result;
use std::collections::HashMap;

/// Receives selection changes raised by clicks on the display.
pub trait SelectionListener {
    /// `frame` is the 0-based frame the click happened in.
    fn spot_selection_changed(&mut self, target: Option<&Spot>, frame: usize, mode: SelectionMode);
}

/// Displays spots and tracks over a hyperstack and handles spot editing.
pub struct SpotDisplayer {
    settings: Settings,
    calibration: Calibration,
    radius: f32,
    radius_ratio: f32,
    default_color: Color,
    colormap: Colormap,
    spots: SpotCollection,
    spots_to_show: SpotCollection,
    color_feature: Option<Feature>,
    feature_range: Option<(f32, f32)>,
    spot_colors: HashMap<SpotId, Color>,
    track_links: Vec<TrackLink>,
    stack: Option<HyperStack>,
    view: Option<StackView>,
    spot_overlay: SpotOverlay,
    track_overlay: TrackOverlay,
    controller: SpotEditController,
    listeners: Vec<Box<dyn SelectionListener>>,
}

impl std::fmt::Debug for SpotDisplayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotDisplayer")
            .field("settings", &self.settings)
            .field("radius", &self.radius)
            .field("radius_ratio", &self.radius_ratio)
            .field("spots", &self.spots.len())
            .field("spots_to_show", &self.spots_to_show.len())
            .field("color_feature", &self.color_feature)
            .field("rendered", &self.view.is_some())
            .field("edit_state", self.controller.state())
            .finish_non_exhaustive()
    }
}

impl SpotDisplayer {
    /// Creates a displayer for the given acquisition settings. Nothing is
    /// shown until [`render`](Self::render) is called.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let calibration = settings.calibration;
        let radius = settings.expected_radius;
        Self {
            calibration,
            radius,
            radius_ratio: 1.0,
            default_color: Color::default(),
            colormap: Colormap,
            spots: SpotCollection::new(),
            spots_to_show: SpotCollection::new(),
            color_feature: None,
            feature_range: None,
            spot_colors: HashMap::new(),
            track_links: Vec::new(),
            stack: None,
            view: None,
            spot_overlay: SpotOverlay::new(calibration, radius),
            track_overlay: TrackOverlay::new(calibration),
            controller: SpotEditController::new(calibration, radius),
            listeners: Vec::new(),
            settings,
        }
    }

    /// Displays spots over an existing stack instead of a blank one.
    #[must_use]
    pub fn with_stack(mut self, stack: HyperStack) -> Self {
        self.stack = Some(stack);
        self
    }

    pub fn add_selection_listener(&mut self, listener: Box<dyn SelectionListener>) {
        self.listeners.push(listener);
    }

    /// Builds the view. Without a stack, a black one matching the settings is created.
    ///
    /// Rendering again keeps the stack already on display.
    pub fn render(&mut self) -> Result<()> {
        let stack = match self
            .view
            .take()
            .map(StackView::into_stack)
            .or_else(|| self.stack.take())
        {
            Some(stack) => stack,
            None => HyperStack::from_settings(&self.settings)?,
        };
        log::info!(
            "Rendering {} ({}x{}, {} slices, {} frames)",
            stack.title(),
            stack.width(),
            stack.height(),
            stack.nslices(),
            stack.nframes()
        );
        self.view = Some(StackView::new(stack));
        self.spot_overlay.set_radius(self.radius_ratio * self.radius);
        self.prepare_spot_overlay();
        self.prepare_track_overlay();
        self.refresh();
        Ok(())
    }

    /// Sets every spot known to the session and shows all of them.
    pub fn set_spots(&mut self, spots: SpotCollection) {
        self.spots = spots.clone();
        self.set_spots_to_show(spots);
    }

    /// Sets the subset of spots drawn and available for clicks.
    pub fn set_spots_to_show(&mut self, spots: SpotCollection) {
        self.spots_to_show = spots;
        self.prepare_spot_overlay();
        self.prepare_track_overlay();
    }

    pub fn set_track_links(&mut self, links: Vec<TrackLink>) {
        self.track_links = links;
        self.prepare_track_overlay();
        self.refresh();
    }

    pub fn set_display_track_mode(&mut self, mode: TrackDisplayMode, depth: usize) {
        self.track_overlay.set_display_track_mode(mode, depth);
        self.refresh();
    }

    pub fn highlight_edges<I>(&mut self, links: I)
    where
        I: IntoIterator<Item = TrackLink>,
    {
        self.track_overlay.set_highlight(links);
    }

    pub fn highlight_spots<I>(&mut self, spots: I)
    where
        I: IntoIterator<Item = SpotId>,
    {
        self.spot_overlay.set_spot_selection(spots);
        self.refresh();
    }

    /// Moves the view to the frame and slice holding a displayed spot.
    /// Spots that are not displayed are ignored.
    pub fn center_view_on(&mut self, spot: SpotId) {
        let Some(frame) = self.spots_to_show.frame_of(spot) else {
            return;
        };
        let Some(z) = self.spots_to_show.get(spot).map(|s| s.position()[2]) else {
            return;
        };
        let slice = self.calibration.slice_of(z);
        self.set_position(slice, frame + 1);
    }

    pub fn set_track_visible(&mut self, visible: bool) {
        self.track_overlay.set_track_visible(visible);
        self.refresh();
    }

    pub fn set_spot_visible(&mut self, visible: bool) {
        self.spot_overlay.set_spot_visible(visible);
        self.refresh();
    }

    pub fn set_radius_display_ratio(&mut self, ratio: f32) {
        self.radius_ratio = ratio;
        self.spot_overlay.set_radius(ratio * self.radius);
        self.refresh();
    }

    /// Overrides the radius used to decide whether a double click edits an
    /// existing spot or creates a new one.
    pub fn set_selection_radius(&mut self, radius: f32) {
        self.controller.set_radius(radius);
    }

    pub fn set_default_color(&mut self, color: Color) {
        self.default_color = color;
        self.spot_overlay.set_default_color(color);
        self.prepare_spot_overlay();
    }

    /// Colors spots by a feature. The range is taken over all spots, not only
    /// the displayed ones, so filtering does not shift colors.
    pub fn set_color_by_feature(&mut self, feature: Option<Feature>) {
        self.color_feature = feature;
        self.feature_range = feature.and_then(|f| self.spots.feature_range(f));
        self.prepare_spot_overlay();
        self.refresh();
    }

    /// Requests a redraw of the view.
    pub fn refresh(&mut self) {
        if let Some(view) = self.view.as_mut() {
            view.request_redraw();
        }
    }

    /// Tears the overlays down and leaves edit mode.
    pub fn clear(&mut self) {
        self.spot_overlay.clear();
        self.track_overlay.clear();
        self.controller.reset();
        self.refresh();
    }

    /// Handles a click on the view and dispatches the resulting effects.
    ///
    /// Clicks before [`render`](Self::render) are ignored.
    pub fn mouse_clicked(&mut self, event: &ClickEvent) -> Vec<Effect> {
        let Some(view) = self.view.as_ref() else {
            log::warn!("Click ignored, display not rendered");
            return Vec::new();
        };
        let effects = self
            .controller
            .handle_click(event, view, &self.spots_to_show);

        for effect in &effects {
            match effect {
                Effect::SelectionChanged {
                    target,
                    frame,
                    mode,
                } => {
                    for listener in &mut self.listeners {
                        listener.spot_selection_changed(target.as_ref(), *frame, *mode);
                    }
                }
                Effect::EditedSpotChanged(spot) => {
                    self.spot_overlay.set_edited_spot(spot.clone());
                }
            }
        }
        if !effects.is_empty() {
            self.refresh();
        }
        effects
    }

    /// Moves the view to a 1-based slice and frame.
    ///
    /// The edited spot belongs to the frame it was picked in, so changing
    /// frame leaves edit mode.
    pub fn set_position(&mut self, slice: usize, frame: usize) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        let previous_frame = view.current_frame();
        view.set_position(slice, frame);
        if view.current_frame() != previous_frame && self.controller.is_editing() {
            log::debug!("Leaving edit mode, frame changed");
            self.controller.reset();
            self.spot_overlay.set_edited_spot(None);
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if let Some(view) = self.view.as_mut() {
            view.set_viewport(viewport);
        }
    }

    #[must_use]
    pub fn view(&self) -> Option<&StackView> {
        self.view.as_ref()
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn spots(&self) -> &SpotCollection {
        &self.spots
    }

    #[must_use]
    pub fn spots_to_show(&self) -> &SpotCollection {
        &self.spots_to_show
    }

    #[must_use]
    pub fn color_feature(&self) -> Option<Feature> {
        self.color_feature
    }

    #[must_use]
    pub fn radius_display_ratio(&self) -> f32 {
        self.radius_ratio
    }

    #[must_use]
    pub fn spot_overlay(&self) -> &SpotOverlay {
        &self.spot_overlay
    }

    #[must_use]
    pub fn track_overlay(&self) -> &TrackOverlay {
        &self.track_overlay
    }

    #[must_use]
    pub fn edit_state(&self) -> &EditState {
        self.controller.state()
    }

    fn prepare_spot_overlay(&mut self) {
        let mut colors = HashMap::new();
        for (_, spot) in self.spots_to_show.iter() {
            let value = self.color_feature.and_then(|f| spot.feature(f));
            let color = match (value, self.feature_range) {
                (Some(v), Some((min, max))) => self.colormap.color_in_range(v, min, max),
                _ => self.default_color,
            };
            colors.insert(spot.id(), color);
        }
        self.spot_colors = colors;
        self.spot_overlay.set_target(self.spots_to_show.clone());
        self.spot_overlay.set_target_colors(self.spot_colors.clone());
    }

    fn prepare_track_overlay(&mut self) {
        self.track_overlay
            .set_track_links(&self.track_links, &self.spots_to_show);
        self.track_overlay.set_track_colors_from(self.colormap);
    }
}
