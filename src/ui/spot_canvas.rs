// SPDX-License-Identifier: MPL-2.0
//! Spot overlay renderer for the hyperstack view.
//!
//! Draws the current plane area, the track links and the spots of the current
//! frame, and turns left clicks into [`ClickEvent`]s. Presses close in time and
//! space count as one multi-click; the shift modifier becomes the additive flag.

use crate::app::Message;
use crate::display::{ClickEvent, SpotOverlay, TrackOverlay, Viewport};
use crate::domain::Color;
use iced::keyboard;
use iced::mouse;
use iced::widget::canvas::{self, Frame, Path, Stroke};
use iced::{Point, Rectangle, Size};
use std::time::{Duration, Instant};

const MULTI_CLICK_THRESHOLD: Duration = Duration::from_millis(350);
/// Maximum pointer travel, in screen pixels, between presses of a multi-click.
const MULTI_CLICK_DISTANCE: f32 = 4.0;

/// Messages published by the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasMessage {
    /// A click landed on the canvas. The viewport is the one used to draw it.
    Clicked { event: ClickEvent, viewport: Viewport },
}

/// Interaction state kept by iced between events.
#[derive(Debug, Default)]
pub struct CanvasState {
    last_click: Option<PressRecord>,
    modifiers: keyboard::Modifiers,
}

#[derive(Debug, Clone, Copy)]
struct PressRecord {
    at: Instant,
    position: Point,
    count: u32,
}

impl CanvasState {
    /// Records a left press and returns its click count.
    fn register_press(&mut self, position: Point, now: Instant) -> u32 {
        let count = match self.last_click {
            Some(last)
                if now.duration_since(last.at) < MULTI_CLICK_THRESHOLD
                    && last.position.distance(position) <= MULTI_CLICK_DISTANCE =>
            {
                last.count + 1
            }
            _ => 1,
        };
        self.last_click = Some(PressRecord {
            at: now,
            position,
            count,
        });
        count
    }
}

/// Canvas program used to draw and interact with the spot overlay.
pub struct SpotCanvas<'a> {
    pub spots: &'a SpotOverlay,
    pub tracks: &'a TrackOverlay,
    pub img_width: u32,
    pub img_height: u32,
    /// 1-based slice.
    pub slice: usize,
    /// 0-based frame.
    pub frame: usize,
}

const BACKGROUND: iced::Color = iced::Color::BLACK;
const HIGHLIGHT: iced::Color = iced::Color::from_rgb(0.0, 1.0, 0.0);
const EDITED: iced::Color = iced::Color::WHITE;
const EDITED_DASH: [f32; 2] = [4.0, 4.0];

fn to_iced(color: Color) -> iced::Color {
    iced::Color::from_rgb(color.r, color.g, color.b)
}

impl SpotCanvas<'_> {
    fn viewport(&self, bounds: Rectangle) -> Viewport {
        Viewport::fit(self.img_width, self.img_height, bounds.width, bounds.height)
    }

    fn screen_point(viewport: &Viewport, px: f32, py: f32) -> Point {
        let (x, y) = viewport.to_screen(px, py);
        Point::new(x, y)
    }
}

impl canvas::Program<Message> for SpotCanvas<'_> {
    type State = CanvasState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<iced::widget::Action<Message>> {
        use iced::widget::Action;

        match event {
            iced::Event::Keyboard(keyboard::Event::ModifiersChanged(modifiers)) => {
                state.modifiers = *modifiers;
            }
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                let click_count = state.register_press(position, Instant::now());
                let event = ClickEvent {
                    x: position.x,
                    y: position.y,
                    click_count,
                    additive: state.modifiers.shift(),
                };
                return Some(
                    Action::publish(Message::Canvas(CanvasMessage::Clicked {
                        event,
                        viewport: self.viewport(bounds),
                    }))
                    .and_capture(),
                );
            }
            _ => {}
        }

        None
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let viewport = self.viewport(bounds);

        // Plane area
        let origin = Self::screen_point(&viewport, 0.0, 0.0);
        frame.fill_rectangle(
            origin,
            Size::new(
                self.img_width as f32 * viewport.magnification,
                self.img_height as f32 * viewport.magnification,
            ),
            BACKGROUND,
        );

        for segment in self.tracks.visible_segments(self.frame) {
            let line = Path::line(
                Self::screen_point(&viewport, segment.from.0, segment.from.1),
                Self::screen_point(&viewport, segment.to.0, segment.to.1),
            );
            let width = if self.tracks.is_highlighted(&segment.link) {
                3.0
            } else {
                1.0
            };
            frame.stroke(
                &line,
                Stroke::default()
                    .with_color(to_iced(self.tracks.color_of(segment)))
                    .with_width(width),
            );
        }

        for mark in self.spots.marks(self.frame, self.slice) {
            let circle = Path::circle(
                Self::screen_point(&viewport, mark.center.0, mark.center.1),
                mark.radius * viewport.magnification,
            );
            let (color, width) = if mark.highlighted {
                (HIGHLIGHT, 2.0)
            } else {
                (to_iced(mark.color), 1.0)
            };
            frame.stroke(&circle, Stroke::default().with_color(color).with_width(width));
        }

        if let Some(mark) = self.spots.edited_mark(self.slice) {
            let circle = Path::circle(
                Self::screen_point(&viewport, mark.center.0, mark.center.1),
                mark.radius * viewport.magnification,
            );
            frame.stroke(
                &circle,
                Stroke {
                    line_dash: canvas::LineDash {
                        segments: &EDITED_DASH,
                        offset: 0,
                    },
                    ..Stroke::default().with_color(EDITED).with_width(2.0)
                },
            );
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_presses_in_place_count_up() {
        let mut state = CanvasState::default();
        let now = Instant::now();
        let at = Point::new(10.0, 10.0);
        assert_eq!(state.register_press(at, now), 1);
        assert_eq!(state.register_press(at, now + Duration::from_millis(100)), 2);
        assert_eq!(state.register_press(at, now + Duration::from_millis(200)), 3);
    }

    #[test]
    fn slow_or_distant_presses_restart_count() {
        let mut state = CanvasState::default();
        let now = Instant::now();
        let at = Point::new(10.0, 10.0);
        state.register_press(at, now);
        assert_eq!(state.register_press(at, now + Duration::from_millis(500)), 1);
        let later = now + Duration::from_millis(600);
        assert_eq!(state.register_press(Point::new(30.0, 10.0), later), 1);
    }
}
