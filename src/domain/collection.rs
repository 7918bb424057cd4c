// SPDX-License-Identifier: MPL-2.0
//! Spots grouped by frame.

use super::spot::{Feature, Spot, SpotId};
use std::collections::BTreeMap;

/// Spots grouped by their 0-based frame index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpotCollection {
    frames: BTreeMap<usize, Vec<Spot>>,
}

impl SpotCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a spot to the given frame.
    pub fn add(&mut self, spot: Spot, frame: usize) {
        self.frames.entry(frame).or_default().push(spot);
    }

    /// Removes a spot by identity. Returns the removed spot and its frame.
    pub fn remove(&mut self, id: SpotId) -> Option<(Spot, usize)> {
        let frame = self.frame_of(id)?;
        let spots = self.frames.get_mut(&frame)?;
        let index = spots.iter().position(|s| s.id() == id)?;
        Some((spots.remove(index), frame))
    }

    /// Spots of one frame. Unknown frames are empty.
    #[must_use]
    pub fn frame(&self, frame: usize) -> &[Spot] {
        self.frames.get(&frame).map_or(&[], Vec::as_slice)
    }

    /// Frame indices that hold at least one entry, in ascending order.
    pub fn frames(&self) -> impl Iterator<Item = usize> + '_ {
        self.frames.keys().copied()
    }

    /// Every spot with its frame, ordered by frame.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Spot)> + '_ {
        self.frames
            .iter()
            .flat_map(|(frame, spots)| spots.iter().map(move |s| (*frame, s)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the spot of `frame` closest to `location`, or `None` when the
    /// frame holds no spot.
    #[must_use]
    pub fn closest_spot(&self, location: [f32; 3], frame: usize) -> Option<&Spot> {
        self.frame(frame).iter().min_by(|a, b| {
            a.square_distance_to_point(location)
                .total_cmp(&b.square_distance_to_point(location))
        })
    }

    /// Frame index containing the spot with this id.
    #[must_use]
    pub fn frame_of(&self, id: SpotId) -> Option<usize> {
        self.frames
            .iter()
            .find(|(_, spots)| spots.iter().any(|s| s.id() == id))
            .map(|(frame, _)| *frame)
    }

    #[must_use]
    pub fn get(&self, id: SpotId) -> Option<&Spot> {
        self.frames.values().flatten().find(|s| s.id() == id)
    }

    /// Minimum and maximum of a feature over all spots carrying it.
    #[must_use]
    pub fn feature_range(&self, feature: Feature) -> Option<(f32, f32)> {
        self.iter()
            .filter_map(|(_, spot)| spot.feature(feature))
            .fold(None, |acc, value| match acc {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            })
    }

    /// A new collection holding clones of the spots that satisfy `keep`.
    #[must_use]
    pub fn filtered<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Spot) -> bool,
    {
        let mut out = Self::new();
        for (frame, spot) in self.iter() {
            if keep(spot) {
                out.add(spot.clone(), frame);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> (SpotCollection, Spot, Spot, Spot) {
        let a = Spot::new([0.0, 0.0, 0.0]);
        let b = Spot::new([10.0, 10.0, 0.0]);
        let c = Spot::new([5.0, 5.0, 0.0]);
        let mut spots = SpotCollection::new();
        spots.add(a.clone(), 0);
        spots.add(b.clone(), 0);
        spots.add(c.clone(), 3);
        (spots, a, b, c)
    }

    #[test]
    fn closest_spot_picks_nearest_in_frame_only() {
        let (spots, a, b, _) = collection();
        let found = spots.closest_spot([6.0, 6.0, 0.0], 0).expect("frame 0 has spots");
        assert_eq!(found.id(), b.id());
        let found = spots.closest_spot([1.0, 1.0, 0.0], 0).expect("frame 0 has spots");
        assert_eq!(found.id(), a.id());
    }

    #[test]
    fn closest_spot_on_empty_frame_is_none() {
        let (spots, ..) = collection();
        assert!(spots.closest_spot([0.0; 3], 1).is_none());
        assert!(SpotCollection::new().closest_spot([0.0; 3], 0).is_none());
    }

    #[test]
    fn frame_of_and_get_find_spots() {
        let (spots, _, _, c) = collection();
        assert_eq!(spots.frame_of(c.id()), Some(3));
        assert_eq!(spots.get(c.id()).map(Spot::id), Some(c.id()));
        assert_eq!(spots.frame_of(Spot::new([0.0; 3]).id()), None);
    }

    #[test]
    fn len_counts_every_frame() {
        let (spots, ..) = collection();
        assert_eq!(spots.len(), 3);
        assert!(!spots.is_empty());
        assert_eq!(spots.frames().collect::<Vec<_>>(), vec![0, 3]);
    }

    #[test]
    fn remove_returns_spot_and_frame() {
        let (mut spots, a, ..) = collection();
        let (removed, frame) = spots.remove(a.id()).expect("spot exists");
        assert_eq!(removed.id(), a.id());
        assert_eq!(frame, 0);
        assert_eq!(spots.len(), 2);
        assert!(spots.remove(a.id()).is_none());
    }

    #[test]
    fn feature_range_skips_missing_values() {
        let mut spots = SpotCollection::new();
        spots.add(Spot::new([0.0; 3]).with_feature(Feature::Quality, 2.0), 0);
        spots.add(Spot::new([0.0; 3]), 0);
        spots.add(Spot::new([0.0; 3]).with_feature(Feature::Quality, 7.5), 1);
        assert_eq!(spots.feature_range(Feature::Quality), Some((2.0, 7.5)));
        assert_eq!(spots.feature_range(Feature::Contrast), None);
    }

    #[test]
    fn filtered_keeps_frames() {
        let (spots, _, b, c) = collection();
        let far = spots.filtered(|s| s.position()[0] >= 5.0);
        assert_eq!(far.len(), 2);
        assert_eq!(far.frame_of(b.id()), Some(0));
        assert_eq!(far.frame_of(c.id()), Some(3));
    }
}
