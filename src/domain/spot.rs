// SPDX-License-Identifier: MPL-2.0
//! Spot type and its numeric features.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fresh spot identities. Shared by every spot created in the process.
static NEXT_SPOT_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a spot.
///
/// Two `Spot` values with the same id are the same spot, even if one of them
/// is a clone held by the overlay or the edit controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpotId(u64);

impl SpotId {
    fn next() -> Self {
        Self(NEXT_SPOT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID{}", self.0)
    }
}

/// Named numeric features a spot can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feature {
    PositionX,
    PositionY,
    PositionZ,
    PositionT,
    Quality,
    Radius,
    MeanIntensity,
    MedianIntensity,
    MinIntensity,
    MaxIntensity,
    TotalIntensity,
    StandardDeviation,
    Contrast,
    Snr,
}

impl Feature {
    /// Every feature, in display order.
    pub const ALL: [Feature; 14] = [
        Feature::PositionX,
        Feature::PositionY,
        Feature::PositionZ,
        Feature::PositionT,
        Feature::Quality,
        Feature::Radius,
        Feature::MeanIntensity,
        Feature::MedianIntensity,
        Feature::MinIntensity,
        Feature::MaxIntensity,
        Feature::TotalIntensity,
        Feature::StandardDeviation,
        Feature::Contrast,
        Feature::Snr,
    ];

    /// Key used in spot files, e.g. `MEAN_INTENSITY`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Feature::PositionX => "POSITION_X",
            Feature::PositionY => "POSITION_Y",
            Feature::PositionZ => "POSITION_Z",
            Feature::PositionT => "POSITION_T",
            Feature::Quality => "QUALITY",
            Feature::Radius => "RADIUS",
            Feature::MeanIntensity => "MEAN_INTENSITY",
            Feature::MedianIntensity => "MEDIAN_INTENSITY",
            Feature::MinIntensity => "MIN_INTENSITY",
            Feature::MaxIntensity => "MAX_INTENSITY",
            Feature::TotalIntensity => "TOTAL_INTENSITY",
            Feature::StandardDeviation => "STANDARD_DEVIATION",
            Feature::Contrast => "CONTRAST",
            Feature::Snr => "SNR",
        }
    }

    /// Looks a feature up by its spot file key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Human readable name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Feature::PositionX => "X",
            Feature::PositionY => "Y",
            Feature::PositionZ => "Z",
            Feature::PositionT => "T",
            Feature::Quality => "Quality",
            Feature::Radius => "Radius",
            Feature::MeanIntensity => "Mean intensity",
            Feature::MedianIntensity => "Median intensity",
            Feature::MinIntensity => "Min intensity",
            Feature::MaxIntensity => "Max intensity",
            Feature::TotalIntensity => "Total intensity",
            Feature::StandardDeviation => "Standard deviation",
            Feature::Contrast => "Contrast",
            Feature::Snr => "Signal/Noise ratio",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A point annotation in calibrated space.
#[derive(Debug, Clone, PartialEq)]
pub struct Spot {
    id: SpotId,
    name: Option<String>,
    features: BTreeMap<Feature, f32>,
}

impl Spot {
    /// Creates a spot at the given calibrated `[x, y, z]` position with a fresh identity.
    #[must_use]
    pub fn new(position: [f32; 3]) -> Self {
        let mut features = BTreeMap::new();
        features.insert(Feature::PositionX, position[0]);
        features.insert(Feature::PositionY, position[1]);
        features.insert(Feature::PositionZ, position[2]);
        Self {
            id: SpotId::next(),
            name: None,
            features,
        }
    }

    /// Sets the spot name, builder style.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a feature value, builder style.
    #[must_use]
    pub fn with_feature(mut self, feature: Feature, value: f32) -> Self {
        self.features.insert(feature, value);
        self
    }

    #[must_use]
    pub fn id(&self) -> SpotId {
        self.id
    }

    /// The spot name, or its id when it was never named.
    #[must_use]
    pub fn name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.to_string())
    }

    #[must_use]
    pub fn feature(&self, feature: Feature) -> Option<f32> {
        self.features.get(&feature).copied()
    }

    pub fn set_feature(&mut self, feature: Feature, value: f32) {
        self.features.insert(feature, value);
    }

    pub fn features(&self) -> impl Iterator<Item = (Feature, f32)> + '_ {
        self.features.iter().map(|(k, v)| (*k, *v))
    }

    /// Calibrated `[x, y, z]` position. Missing coordinates read as zero.
    #[must_use]
    pub fn position(&self) -> [f32; 3] {
        [
            self.feature(Feature::PositionX).unwrap_or(0.0),
            self.feature(Feature::PositionY).unwrap_or(0.0),
            self.feature(Feature::PositionZ).unwrap_or(0.0),
        ]
    }

    /// Squared euclidean distance between this spot and a calibrated position.
    #[must_use]
    pub fn square_distance_to_point(&self, point: [f32; 3]) -> f32 {
        self.position()
            .iter()
            .zip(point.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }

    #[must_use]
    pub fn square_distance_to(&self, other: &Spot) -> f32 {
        self.square_distance_to_point(other.position())
    }
}
