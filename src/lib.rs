// SPDX-License-Identifier: MPL-2.0
//! `spot_lens` displays detected spots and their tracks over a hyperstack and
//! lets the user select and edit them with the mouse.
//!
//! The interaction core lives in [`display`]: the [`display::SpotEditController`]
//! turns clicks into selection changes and edit-mode transitions, and the
//! [`display::SpotDisplayer`] wires it to the spot and track overlays. The
//! [`app`] and [`ui`] modules provide the Iced front end.

pub mod app;
pub mod config;
pub mod display;
pub mod domain;
pub mod error;
pub mod spot_file;
pub mod ui;
