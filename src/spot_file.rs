// SPDX-License-Identifier: MPL-2.0
//! Loading spots and track links from a TOML file.
//!
//! ```toml
//! [settings]
//! width = 128
//! height = 128
//! nslices = 5
//! nframes = 20
//! dx = 0.2
//! dy = 0.2
//! dz = 1.0
//! expected_radius = 2.0
//!
//! [[spots]]
//! name = "a0"
//! frame = 0
//! x = 10.0
//! y = 12.5
//! z = 0.0
//! features = { QUALITY = 12.0, MEAN_INTENSITY = 88.0 }
//!
//! [[links]]
//! source = "a0"
//! target = "a1"
//! ```
//!
//! Positions come from `x`, `y`, `z` and `frame` only; `POSITION_*` keys in a
//! feature table are rejected.

use crate::domain::{Feature, Settings, Spot, SpotCollection, TrackLink};
use crate::error::{Result, SpotFileError};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Features derived from `x`, `y`, `z` and `frame`, not allowed in the feature table.
const POSITION_FEATURES: [Feature; 4] = [
    Feature::PositionX,
    Feature::PositionY,
    Feature::PositionZ,
    Feature::PositionT,
];

#[derive(Debug, Deserialize)]
struct RawSpotFile {
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    spots: Vec<RawSpot>,
    #[serde(default)]
    links: Vec<RawLink>,
}

#[derive(Debug, Deserialize)]
struct RawSpot {
    name: Option<String>,
    frame: usize,
    x: f32,
    y: f32,
    #[serde(default)]
    z: f32,
    #[serde(default)]
    features: BTreeMap<String, f32>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    source: String,
    target: String,
}

/// Contents of a spot file.
#[derive(Debug, Clone)]
pub struct SpotFile {
    pub settings: Settings,
    pub spots: SpotCollection,
    pub links: Vec<TrackLink>,
}

/// Reads and parses a spot file.
pub fn load_from_path(path: &Path) -> Result<SpotFile> {
    let content = fs::read_to_string(path)?;
    let file = parse(&content)?;
    log::info!(
        "Loaded {} spots and {} links from {}",
        file.spots.len(),
        file.links.len(),
        path.display()
    );
    Ok(file)
}

/// Parses spot file content.
pub fn parse(content: &str) -> Result<SpotFile> {
    let raw: RawSpotFile =
        toml::from_str(content).map_err(|e| SpotFileError::Parse(e.to_string()))?;

    let mut spots = SpotCollection::new();
    let mut by_name = HashMap::new();
    for raw_spot in raw.spots {
        let mut spot = Spot::new([raw_spot.x, raw_spot.y, raw_spot.z]);
        for (key, value) in raw_spot.features {
            let feature = Feature::from_key(&key)
                .ok_or_else(|| SpotFileError::Parse(format!("unknown feature {}", key)))?;
            if POSITION_FEATURES.contains(&feature) {
                return Err(SpotFileError::Parse(format!(
                    "feature {} is set by x, y, z and frame",
                    key
                ))
                .into());
            }
            spot.set_feature(feature, value);
        }
        spot.set_feature(Feature::PositionT, raw_spot.frame as f32);
        if let Some(name) = raw_spot.name {
            spot = spot.with_name(name);
        }
        let name = spot.name();
        if raw_spot.frame >= raw.settings.nframes {
            return Err(SpotFileError::FrameOutOfRange {
                spot: name,
                frame: raw_spot.frame,
            }
            .into());
        }
        if by_name.insert(name.clone(), spot.id()).is_some() {
            return Err(SpotFileError::DuplicateName(name).into());
        }
        spots.add(spot, raw_spot.frame);
    }

    let links = raw
        .links
        .into_iter()
        .map(|link| {
            let source = by_name
                .get(&link.source)
                .ok_or_else(|| SpotFileError::UnknownSpot(link.source.clone()))?;
            let target = by_name
                .get(&link.target)
                .ok_or_else(|| SpotFileError::UnknownSpot(link.target.clone()))?;
            Ok(TrackLink::new(*source, *target))
        })
        .collect::<std::result::Result<Vec<_>, SpotFileError>>()?;

    Ok(SpotFile {
        settings: raw.settings,
        spots,
        links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"
[settings]
width = 32
height = 16
nframes = 2
dx = 0.5
dy = 0.5
expected_radius = 1.5

[[spots]]
name = "a0"
frame = 0
x = 1.0
y = 2.0
features = { QUALITY = 4.0 }

[[spots]]
name = "a1"
frame = 1
x = 1.5
y = 2.5

[[links]]
source = "a0"
target = "a1"
"#;

    #[test]
    fn parse_builds_spots_and_links() {
        let file = parse(SAMPLE).expect("valid file");
        assert_eq!(file.settings.width, 32);
        assert!((file.settings.calibration.dx - 0.5).abs() < f32::EPSILON);
        assert_eq!(file.spots.len(), 2);

        let a0 = &file.spots.frame(0)[0];
        assert_eq!(a0.name(), "a0");
        assert_eq!(a0.feature(Feature::Quality), Some(4.0));
        assert_eq!(a0.position(), [1.0, 2.0, 0.0]);

        let a1 = &file.spots.frame(1)[0];
        assert_eq!(a1.feature(Feature::PositionT), Some(1.0));
        assert_eq!(file.links, vec![TrackLink::new(a0.id(), a1.id())]);
    }

    #[test]
    fn unknown_link_target_is_rejected() {
        let content = format!("{}\n[[links]]\nsource = \"a0\"\ntarget = \"ghost\"\n", SAMPLE);
        let err = parse(&content).expect_err("ghost does not exist");
        assert!(matches!(
            err,
            Error::SpotFile(SpotFileError::UnknownSpot(ref name)) if name == "ghost"
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let content = "[[spots]]\nname = \"a\"\nframe = 0\nx = 0.0\ny = 0.0\n\
                       [[spots]]\nname = \"a\"\nframe = 0\nx = 1.0\ny = 1.0\n";
        assert!(matches!(
            parse(content),
            Err(Error::SpotFile(SpotFileError::DuplicateName(_)))
        ));
    }

    #[test]
    fn frame_beyond_settings_is_rejected() {
        let content = "[settings]\nnframes = 1\n[[spots]]\nframe = 3\nx = 0.0\ny = 0.0\n";
        assert!(matches!(
            parse(content),
            Err(Error::SpotFile(SpotFileError::FrameOutOfRange { frame: 3, .. }))
        ));
    }

    #[test]
    fn unknown_feature_is_a_parse_error() {
        let content = "[[spots]]\nframe = 0\nx = 0.0\ny = 0.0\nfeatures = { BRIGHTNESS = 1.0 }\n";
        assert!(matches!(
            parse(content),
            Err(Error::SpotFile(SpotFileError::Parse(ref msg))) if msg.contains("BRIGHTNESS")
        ));
    }

    #[test]
    fn position_features_in_table_are_rejected() {
        for key in ["POSITION_X", "POSITION_T"] {
            let content = format!(
                "[[spots]]\nframe = 0\nx = 1.0\ny = 0.0\nfeatures = {{ {} = 99.0 }}\n",
                key
            );
            assert!(matches!(
                parse(&content),
                Err(Error::SpotFile(SpotFileError::Parse(ref msg))) if msg.contains(key)
            ));
        }
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        assert!(matches!(
            parse("[[spots]\n"),
            Err(Error::SpotFile(SpotFileError::Parse(_)))
        ));
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("spots.toml");
        fs::write(&path, SAMPLE).expect("write");
        let file = load_from_path(&path).expect("load");
        assert_eq!(file.links.len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().expect("temp dir");
        assert!(matches!(
            load_from_path(&dir.path().join("absent.toml")),
            Err(Error::Io(_))
        ));
    }
}
