// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Window resize events are tracked at all times so the preview opens with
//! correct geometry. Keyboard and pointer events, by contrast, are only
//! subscribed while a preview session is open: closing the preview drops
//! the subscription, which detaches the listener, so no global key handler
//! is left behind between sessions.

use super::Message;
use crate::ui::preview;
use iced::{event, mouse, window, Event, Subscription};

/// Builds the application's subscription set for the current state.
pub fn create(preview_open: bool) -> Subscription<Message> {
    let resize = event::listen_with(|event, _status, _window| match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        _ => None,
    });

    if preview_open {
        Subscription::batch([resize, preview_events()])
    } else {
        resize
    }
}

/// Raw events the open preview consumes: keys (when no widget captured
/// them) and cursor movement for hover zones and swipe tracking.
fn preview_events() -> Subscription<Message> {
    event::listen_with(|event, status, _window| match &event {
        Event::Keyboard(_) => match status {
            event::Status::Ignored => {
                Some(Message::Preview(preview::Message::RawEvent(event.clone())))
            }
            event::Status::Captured => None,
        },
        Event::Mouse(mouse::Event::CursorMoved { .. } | mouse::Event::CursorLeft) => {
            Some(Message::Preview(preview::Message::RawEvent(event.clone())))
        }
        _ => None,
    })
}
