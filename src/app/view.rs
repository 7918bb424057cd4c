// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::{current_position, ColorChoice, Message};
use crate::config;
use crate::display::SpotDisplayer;
use crate::domain::TrackDisplayMode;
use crate::ui::spot_canvas::SpotCanvas;
use iced::alignment::Vertical;
use iced::widget::canvas::Canvas;
use iced::widget::{button, checkbox, pick_list, slider, text, Column, Container, Row};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub displayer: &'a SpotDisplayer,
    pub status: String,
}

/// Renders navigation, overlay controls, the spot canvas and the status line.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let displayer = ctx.displayer;
    let (slice, frame) = current_position(displayer);
    let settings = displayer.settings();

    let canvas = Canvas::new(SpotCanvas {
        spots: displayer.spot_overlay(),
        tracks: displayer.track_overlay(),
        img_width: settings.width,
        img_height: settings.height,
        slice,
        frame: frame - 1,
    })
    .width(Length::Fill)
    .height(Length::Fill);

    let navigation = Row::new()
        .spacing(8)
        .align_y(Vertical::Center)
        .push(button(text("<")).on_press(Message::PreviousFrame))
        .push(text(format!("Frame {}/{}", frame, settings.nframes)))
        .push(button(text(">")).on_press(Message::NextFrame))
        .push(button(text("-")).on_press(Message::PreviousSlice))
        .push(text(format!("Slice {}/{}", slice, settings.nslices)))
        .push(button(text("+")).on_press(Message::NextSlice));

    let overlay_controls = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(
            checkbox(displayer.spot_overlay().is_visible())
                .label("Spots")
                .on_toggle(Message::SpotsVisible),
        )
        .push(
            checkbox(displayer.track_overlay().is_visible())
                .label("Tracks")
                .on_toggle(Message::TracksVisible),
        )
        .push(pick_list(
            ColorChoice::all(),
            Some(ColorChoice::from(displayer.color_feature())),
            Message::ColorBy,
        ))
        .push(pick_list(
            TrackDisplayMode::ALL,
            Some(displayer.track_overlay().display_mode().0),
            Message::TrackModeSelected,
        ))
        .push(text("Radius"))
        .push(
            slider(
                config::MIN_RADIUS_DISPLAY_RATIO..=config::MAX_RADIUS_DISPLAY_RATIO,
                displayer.radius_display_ratio(),
                Message::RadiusRatioChanged,
            )
            .step(0.1)
            .width(Length::Fixed(120.0)),
        )
        .push(button(text("Save")).on_press(Message::SaveSettings));

    let content = Column::new()
        .spacing(8)
        .padding(8)
        .push(navigation)
        .push(overlay_controls)
        .push(canvas)
        .push(text(ctx.status));

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
