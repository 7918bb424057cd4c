// SPDX-License-Identifier: MPL-2.0
//! Track links between spots and how much of them to display.

use super::spot::SpotId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A link between two spots of the same track, usually in consecutive frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackLink {
    pub source: SpotId,
    pub target: SpotId,
}

impl TrackLink {
    #[must_use]
    pub fn new(source: SpotId, target: SpotId) -> Self {
        Self { source, target }
    }
}

/// Which parts of the tracks are drawn relative to the current frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayMode {
    /// Every link of every track.
    #[default]
    Whole,
    /// Links within `depth` frames before and after the current one.
    Local,
    /// Links within `depth` frames before the current one.
    LocalBackward,
    /// Links within `depth` frames after the current one.
    LocalForward,
}

impl TrackDisplayMode {
    pub const ALL: [TrackDisplayMode; 4] = [
        TrackDisplayMode::Whole,
        TrackDisplayMode::Local,
        TrackDisplayMode::LocalBackward,
        TrackDisplayMode::LocalForward,
    ];

    /// Whether a link spanning `[first, last]` is shown while `current` is displayed.
    #[must_use]
    pub fn shows(self, first: usize, last: usize, current: usize, depth: usize) -> bool {
        let (lo, hi) = (first.min(last), first.max(last));
        match self {
            TrackDisplayMode::Whole => true,
            TrackDisplayMode::Local => {
                hi + depth >= current && lo <= current.saturating_add(depth)
            }
            TrackDisplayMode::LocalBackward => hi <= current && hi + depth >= current,
            TrackDisplayMode::LocalForward => lo >= current && lo <= current.saturating_add(depth),
        }
    }
}

impl fmt::Display for TrackDisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrackDisplayMode::Whole => "Whole tracks",
            TrackDisplayMode::Local => "Local tracks",
            TrackDisplayMode::LocalBackward => "Local tracks, backward",
            TrackDisplayMode::LocalForward => "Local tracks, forward",
        })
    }
}

/// Assigns a track index to every spot touched by `links`.
///
/// Tracks are the connected components of the link graph, numbered from zero
/// in order of first appearance.
#[must_use]
pub fn track_indices(links: &[TrackLink]) -> HashMap<SpotId, usize> {
    let mut parent: HashMap<SpotId, SpotId> = HashMap::new();

    fn find(parent: &mut HashMap<SpotId, SpotId>, id: SpotId) -> SpotId {
        let mut root = id;
        while let Some(&p) = parent.get(&root) {
            if p == root {
                break;
            }
            root = p;
        }
        // path compression
        let mut node = id;
        while node != root {
            let next = parent.get(&node).copied().unwrap_or(root);
            parent.insert(node, root);
            node = next;
        }
        root
    }

    for link in links {
        parent.entry(link.source).or_insert(link.source);
        parent.entry(link.target).or_insert(link.target);
        let a = find(&mut parent, link.source);
        let b = find(&mut parent, link.target);
        if a != b {
            parent.insert(b, a);
        }
    }

    let mut roots: HashMap<SpotId, usize> = HashMap::new();
    let mut indices = HashMap::new();
    for link in links {
        for id in [link.source, link.target] {
            if indices.contains_key(&id) {
                continue;
            }
            let root = find(&mut parent, id);
            let next = roots.len();
            let index = *roots.entry(root).or_insert(next);
            indices.insert(id, index);
        }
    }
    indices
}
