// SPDX-License-Identifier: MPL-2.0
//! Spot selection model.

use super::spot::SpotId;
use std::collections::BTreeSet;

/// How a selection change combines with the previous selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// The target becomes the whole selection (no target clears it).
    Replace,
    /// The target is toggled in the existing selection.
    Add,
}

/// Set of selected spots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    spots: BTreeSet<SpotId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a selection change. Returns whether the selection changed.
    pub fn apply(&mut self, target: Option<SpotId>, mode: SelectionMode) -> bool {
        let before = self.spots.clone();
        match (mode, target) {
            (SelectionMode::Replace, None) => self.spots.clear(),
            (SelectionMode::Replace, Some(id)) => {
                self.spots.clear();
                self.spots.insert(id);
            }
            (SelectionMode::Add, None) => {}
            (SelectionMode::Add, Some(id)) => {
                if !self.spots.remove(&id) {
                    self.spots.insert(id);
                }
            }
        }
        before != self.spots
    }

    #[must_use]
    pub fn contains(&self, id: SpotId) -> bool {
        self.spots.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = SpotId> + '_ {
        self.spots.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }
}
