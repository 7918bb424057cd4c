// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Arrow keys not captured by a widget move through the stack: left/right
//! change frame, up/down change slice.

use super::Message;
use iced::{event, keyboard, Subscription};

/// Creates the keyboard navigation subscription.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _window| {
        if matches!(status, event::Status::Captured) {
            return None;
        }
        match event {
            iced::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(named),
                ..
            }) => navigation_message(named),
            _ => None,
        }
    })
}

fn navigation_message(key: keyboard::key::Named) -> Option<Message> {
    match key {
        keyboard::key::Named::ArrowRight => Some(Message::NextFrame),
        keyboard::key::Named::ArrowLeft => Some(Message::PreviousFrame),
        keyboard::key::Named::ArrowUp => Some(Message::NextSlice),
        keyboard::key::Named::ArrowDown => Some(Message::PreviousSlice),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_map_to_navigation() {
        assert_eq!(
            navigation_message(keyboard::key::Named::ArrowRight),
            Some(Message::NextFrame)
        );
        assert_eq!(
            navigation_message(keyboard::key::Named::ArrowDown),
            Some(Message::PreviousSlice)
        );
        assert_eq!(navigation_message(keyboard::key::Named::Enter), None);
    }
}
