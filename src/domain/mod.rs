// SPDX-License-Identifier: MPL-2.0
//! Domain layer - spots, tracks and acquisition settings.
//!
//! Pure value types with no dependency on the GUI toolkit. `serde` is the only
//! external crate used here, for the spot file and the settings file.
//!
//! # Modules
//!
//! - [`spot`]: [`Spot`](spot::Spot), its identity and [`Feature`](spot::Feature) values
//! - [`collection`]: [`SpotCollection`](collection::SpotCollection), spots per frame
//!   with nearest-spot lookup
//! - [`settings`]: image dimensions and [`Calibration`](settings::Calibration)
//! - [`selection`]: [`Selection`](selection::Selection) and [`SelectionMode`](selection::SelectionMode)
//! - [`track`]: [`TrackLink`](track::TrackLink) and [`TrackDisplayMode`](track::TrackDisplayMode)
//! - [`color`]: [`Color`](color::Color) and the feature [`Colormap`](color::Colormap)

pub mod collection;
pub mod color;
pub mod selection;
pub mod settings;
pub mod spot;
pub mod track;

pub use collection::SpotCollection;
pub use color::{Color, Colormap};
pub use selection::{Selection, SelectionMode};
pub use settings::{Calibration, Settings};
pub use spot::{Feature, Spot, SpotId};
pub use track::{TrackDisplayMode, TrackLink};
