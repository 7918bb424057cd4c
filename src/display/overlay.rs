// SPDX-License-Identifier: MPL-2.0
//! Overlay models drawn on top of the stack.
//!
//! These hold what has to be drawn; the canvas in `ui::spot_canvas` turns them
//! into geometry.

use crate::domain::track::track_indices;
use crate::domain::{
    Calibration, Color, Colormap, Spot, SpotCollection, SpotId, TrackDisplayMode, TrackLink,
};
use std::collections::{HashMap, HashSet};

/// Spots, their colors, the highlighted selection and the edited spot.
#[derive(Debug, Clone)]
pub struct SpotOverlay {
    calibration: Calibration,
    radius: f32,
    visible: bool,
    targets: SpotCollection,
    colors: HashMap<SpotId, Color>,
    default_color: Color,
    highlighted: HashSet<SpotId>,
    edited: Option<Spot>,
}

/// A spot as it should appear on one slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotMark {
    pub id: SpotId,
    /// Pixel coordinates of the center.
    pub center: (f32, f32),
    /// Radius in pixels of the spot section through the slice.
    pub radius: f32,
    pub color: Color,
    pub highlighted: bool,
}

impl SpotOverlay {
    #[must_use]
    pub fn new(calibration: Calibration, radius: f32) -> Self {
        Self {
            calibration,
            radius,
            visible: true,
            targets: SpotCollection::new(),
            colors: HashMap::new(),
            default_color: Color::default(),
            highlighted: HashSet::new(),
            edited: None,
        }
    }

    pub fn set_target(&mut self, targets: SpotCollection) {
        self.targets = targets;
    }

    pub fn set_target_colors(&mut self, colors: HashMap<SpotId, Color>) {
        self.colors = colors;
    }

    pub fn set_default_color(&mut self, color: Color) {
        self.default_color = color;
    }

    pub fn set_spot_selection<I>(&mut self, spots: I)
    where
        I: IntoIterator<Item = SpotId>,
    {
        self.highlighted = spots.into_iter().collect();
    }

    pub fn set_edited_spot(&mut self, spot: Option<Spot>) {
        self.edited = spot;
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    pub fn set_spot_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Removes everything drawn by this overlay.
    pub fn clear(&mut self) {
        self.targets = SpotCollection::new();
        self.colors.clear();
        self.highlighted.clear();
        self.edited = None;
    }

    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn edited_spot(&self) -> Option<&Spot> {
        self.edited.as_ref()
    }

    #[must_use]
    pub fn is_highlighted(&self, id: SpotId) -> bool {
        self.highlighted.contains(&id)
    }

    #[must_use]
    pub fn color_of(&self, id: SpotId) -> Color {
        self.colors.get(&id).copied().unwrap_or(self.default_color)
    }

    /// Marks for the spots of a 0-based frame that intersect a 1-based slice.
    ///
    /// A spot is a sphere; its mark is the circle cut by the slice plane.
    #[must_use]
    pub fn marks(&self, frame: usize, slice: usize) -> Vec<SpotMark> {
        if !self.visible {
            return Vec::new();
        }
        self.targets
            .frame(frame)
            .iter()
            .filter_map(|spot| self.mark(spot, slice))
            .collect()
    }

    /// Mark of the edited spot on a slice, if it intersects it.
    #[must_use]
    pub fn edited_mark(&self, slice: usize) -> Option<SpotMark> {
        self.edited.as_ref().and_then(|spot| self.mark(spot, slice))
    }

    fn mark(&self, spot: &Spot, slice: usize) -> Option<SpotMark> {
        let [x, y, z] = spot.position();
        let slice_z = slice.saturating_sub(1) as f32 * self.calibration.dz;
        let dz = z - slice_z;
        let radius_sq = self.radius * self.radius - dz * dz;
        if radius_sq <= 0.0 {
            return None;
        }
        Some(SpotMark {
            id: spot.id(),
            center: (x / self.calibration.dx, y / self.calibration.dy),
            radius: radius_sq.sqrt() / self.calibration.dx,
            color: self.color_of(spot.id()),
            highlighted: self.is_highlighted(spot.id()),
        })
    }
}

/// One drawable track link with resolved endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSegment {
    pub link: TrackLink,
    /// Pixel coordinates of the source spot.
    pub from: (f32, f32),
    /// Pixel coordinates of the target spot.
    pub to: (f32, f32),
    pub from_frame: usize,
    pub to_frame: usize,
    pub track: usize,
}

/// Track links drawn across frames.
#[derive(Debug, Clone)]
pub struct TrackOverlay {
    calibration: Calibration,
    visible: bool,
    mode: TrackDisplayMode,
    depth: usize,
    segments: Vec<TrackSegment>,
    track_colors: HashMap<usize, Color>,
    highlighted: HashSet<TrackLink>,
}

impl TrackOverlay {
    #[must_use]
    pub fn new(calibration: Calibration) -> Self {
        Self {
            calibration,
            visible: true,
            mode: TrackDisplayMode::default(),
            depth: 0,
            segments: Vec::new(),
            track_colors: HashMap::new(),
            highlighted: HashSet::new(),
        }
    }

    /// Resolves links against the displayed spots. Links touching a spot that
    /// is not displayed are skipped.
    pub fn set_track_links(&mut self, links: &[TrackLink], spots: &SpotCollection) {
        let tracks = track_indices(links);
        let calibration = self.calibration;
        let locate = |id: SpotId| {
            let frame = spots.frame_of(id)?;
            let [x, y, _] = spots.get(id)?.position();
            Some(((x / calibration.dx, y / calibration.dy), frame))
        };
        self.segments = links
            .iter()
            .filter_map(|link| {
                let (from, from_frame) = locate(link.source)?;
                let (to, to_frame) = locate(link.target)?;
                Some(TrackSegment {
                    link: *link,
                    from,
                    to,
                    from_frame,
                    to_frame,
                    track: tracks.get(&link.source).copied().unwrap_or(0),
                })
            })
            .collect();
    }

    /// Spreads the colormap over the tracks.
    pub fn set_track_colors_from(&mut self, colormap: Colormap) {
        let count = self
            .segments
            .iter()
            .map(|s| s.track + 1)
            .max()
            .unwrap_or(0);
        self.track_colors = (0..count)
            .map(|track| {
                let value = if count > 1 {
                    track as f32 / (count - 1) as f32
                } else {
                    0.0
                };
                (track, colormap.color(value))
            })
            .collect();
    }

    pub fn set_display_track_mode(&mut self, mode: TrackDisplayMode, depth: usize) {
        self.mode = mode;
        self.depth = depth;
    }

    pub fn set_highlight<I>(&mut self, links: I)
    where
        I: IntoIterator<Item = TrackLink>,
    {
        self.highlighted = links.into_iter().collect();
    }

    pub fn set_track_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.track_colors.clear();
        self.highlighted.clear();
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn display_mode(&self) -> (TrackDisplayMode, usize) {
        (self.mode, self.depth)
    }

    /// Links currently resolved against the displayed spots.
    pub fn links(&self) -> impl Iterator<Item = TrackLink> + '_ {
        self.segments.iter().map(|s| s.link)
    }

    #[must_use]
    pub fn is_highlighted(&self, link: &TrackLink) -> bool {
        self.highlighted.contains(link)
    }

    #[must_use]
    pub fn color_of(&self, segment: &TrackSegment) -> Color {
        self.track_colors
            .get(&segment.track)
            .copied()
            .unwrap_or_default()
    }

    /// Segments to draw while the 0-based `frame` is displayed.
    pub fn visible_segments(&self, frame: usize) -> impl Iterator<Item = &TrackSegment> + '_ {
        let visible = self.visible;
        self.segments.iter().filter(move |s| {
            visible && self.mode.shows(s.from_frame, s.to_frame, frame, self.depth)
        })
    }
}
