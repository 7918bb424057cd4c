// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.

use super::{current_position, Message};
use crate::config::{self, Config};
use crate::display::{Effect, SpotDisplayer};
use crate::domain::{Selection, TrackLink};
use crate::ui::spot_canvas::CanvasMessage;
use iced::Task;
use std::path::PathBuf;

/// Mutable application state handed to the handlers.
pub struct UpdateContext<'a> {
    pub displayer: &'a mut SpotDisplayer,
    pub selection: &'a mut Selection,
    pub config: &'a mut Config,
    pub config_dir: &'a Option<PathBuf>,
    pub status_error: &'a mut Option<String>,
    pub track_depth: usize,
}

/// Dispatches a top-level message.
pub fn handle_message(ctx: &mut UpdateContext<'_>, message: Message) -> Task<Message> {
    match message {
        Message::Canvas(CanvasMessage::Clicked { event, viewport }) => {
            ctx.displayer.set_viewport(viewport);
            let effects = ctx.displayer.mouse_clicked(&event);
            apply_effects(ctx, effects);
        }
        Message::NextFrame => move_by(ctx, 0, 1),
        Message::PreviousFrame => move_by(ctx, 0, -1),
        Message::NextSlice => move_by(ctx, 1, 0),
        Message::PreviousSlice => move_by(ctx, -1, 0),
        Message::SpotsVisible(visible) => {
            ctx.config.display.spot_visible = Some(visible);
            ctx.displayer.set_spot_visible(visible);
        }
        Message::TracksVisible(visible) => {
            ctx.config.display.track_visible = Some(visible);
            ctx.displayer.set_track_visible(visible);
        }
        Message::ColorBy(choice) => {
            ctx.displayer.set_color_by_feature(choice.feature());
        }
        Message::TrackModeSelected(mode) => {
            ctx.config.display.track_display_mode = Some(mode);
            ctx.displayer.set_display_track_mode(mode, ctx.track_depth);
        }
        Message::RadiusRatioChanged(ratio) => {
            let ratio = ratio.clamp(
                config::MIN_RADIUS_DISPLAY_RATIO,
                config::MAX_RADIUS_DISPLAY_RATIO,
            );
            ctx.config.display.radius_display_ratio = Some(ratio);
            ctx.displayer.set_radius_display_ratio(ratio);
        }
        Message::SaveSettings => handle_save_settings(ctx),
    }
    Task::none()
}

/// Moves the view by a slice and frame delta. Out of range positions are clamped.
fn move_by(ctx: &mut UpdateContext<'_>, slice_delta: isize, frame_delta: isize) {
    let (slice, frame) = current_position(ctx.displayer);
    ctx.displayer.set_position(
        slice.saturating_add_signed(slice_delta),
        frame.saturating_add_signed(frame_delta),
    );
}

fn handle_save_settings(ctx: &mut UpdateContext<'_>) {
    match config::save_with_override(ctx.config, ctx.config_dir.clone()) {
        Ok(()) => {
            log::info!("Settings saved");
            *ctx.status_error = None;
        }
        Err(err) => {
            log::error!("Failed to save settings: {}", err);
            *ctx.status_error = Some(err.to_string());
        }
    }
}

/// Folds selection effects into the selection and highlights the result.
fn apply_effects(ctx: &mut UpdateContext<'_>, effects: Vec<Effect>) {
    let mut changed = false;
    for effect in effects {
        if let Effect::SelectionChanged { target, mode, .. } = effect {
            changed |= ctx.selection.apply(target.map(|spot| spot.id()), mode);
        }
    }
    if !changed {
        return;
    }
    let selection = &*ctx.selection;
    let edges: Vec<TrackLink> = ctx
        .displayer
        .track_overlay()
        .links()
        .filter(|link| selection.contains(link.source) || selection.contains(link.target))
        .collect();
    ctx.displayer.highlight_spots(selection.iter());
    ctx.displayer.highlight_edges(edges);
}
