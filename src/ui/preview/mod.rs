// SPDX-License-Identifier: MPL-2.0
//! Full-screen photo preview component.
//!
//! Renders one photo of an ordered sequence at a time over a darkened
//! backdrop, with wrap-around navigation driven by the keyboard, swipe
//! gestures, hover-revealed chevrons, and explicit click targets. The
//! component is fully controlled: the caller owns the photo list and the
//! focused index, and every transition request is reported back as an
//! [`Effect`] for the caller to apply. Nothing in here survives a close.
//!
//! All photos are laid out side by side in one horizontal strip, each slot
//! exactly one viewport wide; the focused photo is selected by snapping the
//! strip to `index * viewport-width`. Every photo element therefore exists
//! at once, which is fine for the bounded collections a user has open and
//! much simpler than virtualizing.
//!
//! Caller-supplied content can be injected into the top toolbar (`actions`)
//! and as a centered modal over the photo (`overlay`); the component only
//! places these slots and keeps clicks inside them away from the
//! backdrop-close handler.

pub mod gesture;

use crate::image_cache::ImageCache;
use crate::ui::theme::{self, spacing, typography};
use gesture::{HoverSide, SwipeDirection, SwipeTracker};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::scrollable::{Direction, RelativeOffset, Scrollbar};
use iced::widget::{
    button, image, mouse_area, operation, Column, Container, Id, Row, Scrollable, Space, Stack,
    Text,
};
use iced::{keyboard, mouse, window, ContentFit, Element, Event, Length, Point, Size, Task};

/// Identifier of the horizontal photo strip scrollable.
pub const STRIP_ID: &str = "preview-photo-strip";

/// Breathing room between the preview surface and the window edge; this
/// ring is the clickable backdrop.
const BACKDROP_MARGIN: f32 = 48.0;

/// Viewport assumed until the first resize event arrives.
const DEFAULT_VIEWPORT: Size = Size {
    width: 1100.0,
    height: 720.0,
};

/// One photo in the preview sequence: where its bytes live and what to say
/// when they are not on hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRef {
    pub src: String,
    pub alt: String,
}

impl PhotoRef {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

/// Messages emitted by the preview's widgets and routed raw events.
#[derive(Debug, Clone)]
pub enum Message {
    /// A native event forwarded while a session is open.
    RawEvent(Event),
    PreviousPressed,
    NextPressed,
    ClosePressed,
    BackdropPressed,
    /// Pointer down somewhere on the preview surface (starts a swipe).
    SurfacePressed,
    /// Pointer up on the preview surface (may complete a swipe).
    SurfaceReleased,
    /// Press inside a caller-supplied slot; swallowed so it cannot reach
    /// the backdrop.
    SlotPressed,
}

/// Transition requests for the caller, which owns the focused index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Close,
    Previous,
    Next,
}

/// Caller-provided environment for one render of the preview.
pub struct Context<'a, Msg> {
    /// The ordered photo sequence. Never mutated here.
    pub photos: &'a [PhotoRef],
    /// The focused index; `0 <= index < photos.len()`.
    pub index: usize,
    /// Cache the photo bytes are fetched into by the caller.
    pub images: &'a ImageCache,
    /// Toolbar slot (e.g. an actions menu).
    pub actions: Option<Element<'a, Msg>>,
    /// Modal slot rendered over the photo (e.g. an album picker).
    pub overlay: Option<Element<'a, Msg>>,
}

/// Transient per-session pointer state. The focused index deliberately
/// lives with the caller, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    cursor: Option<Point>,
    hover: HoverSide,
    swipe: SwipeTracker,
    viewport: Size,
}

impl Default for State {
    fn default() -> Self {
        Self {
            cursor: None,
            hover: HoverSide::None,
            swipe: SwipeTracker::default(),
            viewport: DEFAULT_VIEWPORT,
        }
    }
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears everything tied to the session that just closed. The viewport
    /// size is environmental and survives.
    pub fn reset(&mut self) {
        self.cursor = None;
        self.hover = HoverSide::None;
        self.swipe.cancel();
    }

    /// Updates the tracked window size (resize events are routed here even
    /// while no session is open, so a reopen starts correct).
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
    }

    pub fn hover_side(&self) -> HoverSide {
        self.hover
    }

    /// Task that snaps the photo strip to the focused index. Issue it when
    /// a session opens, the index changes, or the window resizes.
    pub fn align_strip(&self, index: usize, count: usize) -> Task<Message> {
        let x = if count > 1 {
            index as f32 / (count - 1) as f32
        } else {
            0.0
        };
        operation::snap_to(Id::new(STRIP_ID), RelativeOffset { x, y: 0.0 })
    }

    /// Handles a preview message, returning the transition the caller
    /// should apply.
    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::RawEvent(event) => self.handle_raw_event(&event),
            Message::PreviousPressed => Effect::Previous,
            Message::NextPressed => Effect::Next,
            Message::ClosePressed | Message::BackdropPressed => Effect::Close,
            Message::SurfacePressed => {
                if let Some(cursor) = self.cursor {
                    self.swipe.begin(cursor.x);
                }
                Effect::None
            }
            Message::SurfaceReleased => match self.cursor {
                Some(cursor) => match self.swipe.finish(cursor.x) {
                    Some(SwipeDirection::Next) => Effect::Next,
                    Some(SwipeDirection::Previous) => Effect::Previous,
                    None => Effect::None,
                },
                None => {
                    self.swipe.cancel();
                    Effect::None
                }
            },
            Message::SlotPressed => Effect::None,
        }
    }

    fn handle_raw_event(&mut self, event: &Event) -> Effect {
        match event {
            Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => self.handle_key(key),
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                self.cursor = Some(*position);
                self.hover = HoverSide::from_cursor(position.x, self.viewport.width);
                Effect::None
            }
            Event::Mouse(mouse::Event::CursorLeft) => {
                self.cursor = None;
                self.hover = HoverSide::None;
                self.swipe.cancel();
                Effect::None
            }
            Event::Window(window::Event::Resized(size)) => {
                self.viewport = *size;
                Effect::None
            }
            _ => Effect::None,
        }
    }

    fn handle_key(&mut self, key: &keyboard::Key) -> Effect {
        match key {
            keyboard::Key::Named(keyboard::key::Named::ArrowRight) => Effect::Next,
            keyboard::Key::Named(keyboard::key::Named::ArrowLeft) => Effect::Previous,
            keyboard::Key::Named(keyboard::key::Named::Escape) => Effect::Close,
            _ => Effect::None,
        }
    }

    /// Renders the preview over the whole window.
    ///
    /// `on_message` lifts preview messages into the caller's message type so
    /// the slots can carry caller messages directly.
    pub fn view<'a, Msg: Clone + 'a>(
        &'a self,
        ctx: Context<'a, Msg>,
        on_message: impl Fn(Message) -> Msg + 'a,
    ) -> Element<'a, Msg> {
        if ctx.photos.is_empty() {
            return Space::new().width(Length::Fill).height(Length::Fill).into();
        }

        let surface_width = (self.viewport.width - 2.0 * BACKDROP_MARGIN).max(1.0);
        let surface_height = (self.viewport.height - 2.0 * BACKDROP_MARGIN).max(1.0);

        let backdrop = mouse_area(
            Container::new(Space::new().width(Length::Fill).height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(theme::backdrop),
        )
        .on_press(on_message(Message::BackdropPressed));

        let close = button(Text::new("←").size(typography::TITLE_MD))
            .padding(spacing::XS)
            .style(theme::overlay_button(0.0))
            .on_press(on_message(Message::ClosePressed));

        let mut top_bar = Row::new()
            .spacing(spacing::SM)
            .align_y(Vertical::Center)
            .push(close)
            .push(Space::new().width(Length::Fill).height(Length::Shrink));
        if let Some(actions) = ctx.actions {
            // Swallow presses in the slot so they neither close the preview
            // nor start a swipe.
            top_bar = top_bar.push(
                mouse_area(actions).on_press(on_message(Message::SlotPressed)),
            );
        }

        let strip_row = Row::with_children(
            ctx.photos
                .iter()
                .map(|photo| photo_cell(photo, ctx.images, surface_width)),
        );
        let strip = Scrollable::new(strip_row)
            .id(Id::new(STRIP_ID))
            .width(Length::Fill)
            .height(Length::Fill)
            .direction(Direction::Horizontal(Scrollbar::hidden()));

        let surface = Column::new()
            .push(
                Container::new(top_bar)
                    .width(Length::Fill)
                    .padding(spacing::SM),
            )
            .push(strip)
            .width(Length::Fixed(surface_width))
            .height(Length::Fixed(surface_height));

        let surface = mouse_area(surface)
            .on_press(on_message(Message::SurfacePressed))
            .on_release(on_message(Message::SurfaceReleased));

        let mut stack = Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(backdrop)
            .push(
                Container::new(surface)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(Horizontal::Center)
                    .align_y(Vertical::Center),
            );

        if self.hover == HoverSide::Left {
            stack = stack.push(chevron_layer(
                "‹",
                Horizontal::Left,
                on_message(Message::PreviousPressed),
            ));
        }
        if self.hover == HoverSide::Right {
            stack = stack.push(chevron_layer(
                "›",
                Horizontal::Right,
                on_message(Message::NextPressed),
            ));
        }

        if let Some(overlay) = ctx.overlay {
            let modal = mouse_area(
                Container::new(overlay)
                    .padding(spacing::LG)
                    .style(theme::modal),
            )
            .on_press(on_message(Message::SlotPressed));
            stack = stack.push(
                Container::new(modal)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(Horizontal::Center)
                    .align_y(Vertical::Center),
            );
        }

        stack.into()
    }
}

/// One slot of the strip: the photo when its bytes are cached, else a
/// placeholder carrying the alt text.
fn photo_cell<'a, Msg: 'a>(
    photo: &'a PhotoRef,
    images: &ImageCache,
    width: f32,
) -> Element<'a, Msg> {
    let content: Element<'a, Msg> = match images.peek(&photo.src) {
        Some(handle) => image(handle)
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => Container::new(
            Text::new(photo.alt.as_str()).size(typography::CAPTION),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(theme::placeholder)
        .into(),
    };

    Container::new(content)
        .width(Length::Fixed(width))
        .height(Length::Fill)
        .padding(spacing::MD)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

fn chevron_layer<'a, Msg: Clone + 'a>(
    glyph: &'a str,
    side: Horizontal,
    message: Msg,
) -> Element<'a, Msg> {
    let chevron = button(Text::new(glyph).size(typography::CHEVRON))
        .padding([spacing::XS, spacing::MD])
        .style(theme::overlay_button(0.3))
        .on_press(message);

    Container::new(chevron)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::SM)
        .align_x(side)
        .align_y(Vertical::Center)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor_moved(x: f32, y: f32) -> Message {
        Message::RawEvent(Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(x, y),
        }))
    }

    #[test]
    fn arrow_keys_request_navigation() {
        let mut state = State::new();
        assert_eq!(
            state.handle_key(&keyboard::Key::Named(keyboard::key::Named::ArrowRight)),
            Effect::Next
        );
        assert_eq!(
            state.handle_key(&keyboard::Key::Named(keyboard::key::Named::ArrowLeft)),
            Effect::Previous
        );
    }

    #[test]
    fn escape_requests_close() {
        let mut state = State::new();
        assert_eq!(
            state.handle_key(&keyboard::Key::Named(keyboard::key::Named::Escape)),
            Effect::Close
        );
    }

    #[test]
    fn unrelated_keys_do_nothing() {
        let mut state = State::new();
        assert_eq!(
            state.handle_key(&keyboard::Key::Named(keyboard::key::Named::Enter)),
            Effect::None
        );
    }

    #[test]
    fn backdrop_and_close_button_request_close() {
        let mut state = State::new();
        assert_eq!(state.update(Message::BackdropPressed), Effect::Close);
        assert_eq!(state.update(Message::ClosePressed), Effect::Close);
    }

    #[test]
    fn chevron_presses_request_navigation() {
        let mut state = State::new();
        assert_eq!(state.update(Message::PreviousPressed), Effect::Previous);
        assert_eq!(state.update(Message::NextPressed), Effect::Next);
    }

    #[test]
    fn slot_presses_are_swallowed() {
        let mut state = State::new();
        assert_eq!(state.update(Message::SlotPressed), Effect::None);
    }

    #[test]
    fn short_drag_on_the_surface_is_a_tap() {
        let mut state = State::new();
        assert_eq!(state.update(cursor_moved(300.0, 200.0)), Effect::None);
        assert_eq!(state.update(Message::SurfacePressed), Effect::None);
        assert_eq!(state.update(cursor_moved(349.0, 200.0)), Effect::None);
        assert_eq!(state.update(Message::SurfaceReleased), Effect::None);
    }

    #[test]
    fn leftward_swipe_requests_next() {
        let mut state = State::new();
        state.update(cursor_moved(300.0, 200.0));
        state.update(Message::SurfacePressed);
        state.update(cursor_moved(249.0, 200.0));
        assert_eq!(state.update(Message::SurfaceReleased), Effect::Next);
    }

    #[test]
    fn rightward_swipe_requests_previous() {
        let mut state = State::new();
        state.update(cursor_moved(300.0, 200.0));
        state.update(Message::SurfacePressed);
        state.update(cursor_moved(351.0, 200.0));
        assert_eq!(state.update(Message::SurfaceReleased), Effect::Previous);
    }

    #[test]
    fn cursor_position_drives_the_hover_side() {
        let mut state = State::new();
        state.set_viewport(Size {
            width: 1000.0,
            height: 700.0,
        });

        state.update(cursor_moved(100.0, 350.0));
        assert_eq!(state.hover_side(), HoverSide::Left);

        state.update(cursor_moved(900.0, 350.0));
        assert_eq!(state.hover_side(), HoverSide::Right);

        state.update(Message::RawEvent(Event::Mouse(mouse::Event::CursorLeft)));
        assert_eq!(state.hover_side(), HoverSide::None);
    }

    #[test]
    fn cursor_leaving_cancels_a_swipe_in_progress() {
        let mut state = State::new();
        state.update(cursor_moved(300.0, 200.0));
        state.update(Message::SurfacePressed);
        state.update(Message::RawEvent(Event::Mouse(mouse::Event::CursorLeft)));
        state.update(cursor_moved(600.0, 200.0));
        assert_eq!(state.update(Message::SurfaceReleased), Effect::None);
    }

    #[test]
    fn reset_clears_session_state_but_keeps_viewport() {
        let mut state = State::new();
        state.set_viewport(Size {
            width: 1600.0,
            height: 900.0,
        });
        state.update(cursor_moved(100.0, 100.0));
        state.update(Message::SurfacePressed);

        state.reset();
        assert_eq!(state.hover_side(), HoverSide::None);
        assert_eq!(state.cursor, None);
        assert!(!state.swipe.is_tracking());
        assert_eq!(state.viewport.width, 1600.0);
    }

    #[test]
    fn resize_events_update_the_viewport() {
        let mut state = State::new();
        state.update(Message::RawEvent(Event::Window(window::Event::Resized(
            Size {
                width: 800.0,
                height: 600.0,
            },
        ))));
        assert_eq!(state.viewport.width, 800.0);

        // Hover derivation follows the new width.
        state.update(cursor_moved(500.0, 10.0));
        assert_eq!(state.hover_side(), HoverSide::Right);
    }

    #[test]
    fn strip_alignment_is_proportional_to_the_index() {
        let state = State::new();
        // Smoke check: the task builds for boundary indices without panicking.
        let _ = state.align_strip(0, 4);
        let _ = state.align_strip(3, 4);
        let _ = state.align_strip(0, 1);
    }
}
