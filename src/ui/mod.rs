// SPDX-License-Identifier: MPL-2.0
//! User interface widgets.

pub mod spot_canvas;
