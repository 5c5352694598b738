// SPDX-License-Identifier: MPL-2.0
//! Albums tab: album grid and the create-album modal.

use crate::api::albums::Album;
use crate::image_cache::ImageCache;
use crate::ui::theme::{self, palette, spacing, typography};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{
    button, mouse_area, scrollable, text_input, Column, Container, Row, Stack, Text,
};
use iced::{ContentFit, Element, Length};

const GRID_COLUMNS: usize = 4;
const THUMB_WIDTH: f32 = 220.0;
const THUMB_HEIGHT: f32 = 140.0;

/// Modal state for album creation.
#[derive(Debug, Clone, Default)]
pub struct State {
    pub show_create_modal: bool,
    pub title: String,
    /// Whether a create request is in flight.
    pub pending: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    CreateAlbumPressed,
    TitleChanged(String),
    SubmitCreate,
    CancelCreate,
    AlbumOpened(i64),
}

impl State {
    pub fn update(&mut self, message: &Message) {
        match message {
            Message::CreateAlbumPressed => {
                self.title.clear();
                self.show_create_modal = true;
            }
            Message::TitleChanged(title) => self.title = title.clone(),
            Message::CancelCreate => self.show_create_modal = false,
            // Submission and navigation are handled by the app.
            Message::SubmitCreate | Message::AlbumOpened(_) => {}
        }
    }
}

pub struct ViewContext<'a> {
    pub albums: &'a [Album],
    pub images: &'a ImageCache,
    pub state: &'a State,
    pub loading: bool,
    pub error: Option<&'a str>,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    if ctx.loading && ctx.albums.is_empty() {
        return status_line("Loading albums...");
    }
    if let Some(error) = ctx.error {
        return status_line(error);
    }

    let create = button(Text::new("Create album"))
        .padding([spacing::XS, spacing::LG])
        .style(theme::primary_button)
        .on_press(Message::CreateAlbumPressed);

    let mut content = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::MD)
        .push(create);

    if ctx.albums.is_empty() {
        content = content.push(Text::new("No albums yet.").size(typography::BODY));
    } else {
        content = content.push(grid(ctx.albums, ctx.images));
    }

    let base: Element<'a, Message> =
        scrollable(content).width(Length::Fill).height(Length::Fill).into();

    if ctx.state.show_create_modal {
        Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(base)
            .push(create_modal(ctx.state))
            .into()
    } else {
        base
    }
}

fn grid<'a>(albums: &'a [Album], images: &'a ImageCache) -> Element<'a, Message> {
    let mut rows = Column::new().spacing(spacing::SM);
    for chunk in albums.chunks(GRID_COLUMNS) {
        let mut row = Row::new().spacing(spacing::SM);
        for album in chunk {
            row = row.push(card(album, images));
        }
        rows = rows.push(row);
    }
    rows.into()
}

fn card<'a>(album: &'a Album, images: &'a ImageCache) -> Element<'a, Message> {
    let thumb: Element<'a, Message> = match album.thumb.as_deref().and_then(|url| images.peek(url))
    {
        Some(handle) => iced::widget::image(handle)
            .content_fit(ContentFit::Cover)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => Container::new(
            Text::new("No image")
                .size(typography::CAPTION)
                .color(palette::GRAY_200),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(theme::placeholder)
        .into(),
    };

    let info = Row::new()
        .push(Text::new(album.name.as_str()).size(typography::BODY))
        .push(iced::widget::Space::new().width(Length::Fill).height(Length::Shrink))
        .push(
            Text::new(format!("{} photos", album.count))
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        );

    let card = Column::new()
        .spacing(spacing::XS)
        .push(
            Container::new(thumb)
                .width(Length::Fixed(THUMB_WIDTH))
                .height(Length::Fixed(THUMB_HEIGHT)),
        )
        .push(Container::new(info).width(Length::Fixed(THUMB_WIDTH)));

    mouse_area(card)
        .on_press(Message::AlbumOpened(album.id))
        .into()
}

fn create_modal(state: &State) -> Element<'_, Message> {
    let submit_label = if state.pending { "Creating..." } else { "Create" };
    let mut submit = button(Text::new(submit_label))
        .padding([spacing::XS, spacing::LG])
        .style(theme::primary_button);
    if !state.pending && !state.title.trim().is_empty() {
        submit = submit.on_press(Message::SubmitCreate);
    }

    let dialog = Column::new()
        .spacing(spacing::SM)
        .width(Length::Fixed(320.0))
        .push(Text::new("Create album").size(typography::TITLE_MD))
        .push(
            text_input("Album name", &state.title)
                .on_input(Message::TitleChanged)
                .on_submit(Message::SubmitCreate)
                .padding(spacing::XS),
        )
        .push(
            Row::new()
                .spacing(spacing::SM)
                .push(submit)
                .push(
                    button(Text::new("Cancel"))
                        .style(theme::text_button)
                        .on_press(Message::CancelCreate),
                ),
        );

    let surface = Container::new(dialog)
        .padding(spacing::LG)
        .style(theme::modal);

    // Clicking the dimmed area behind the dialog dismisses it.
    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(
            mouse_area(
                Container::new(iced::widget::Space::new().width(Length::Fill).height(Length::Fill))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .style(theme::backdrop),
            )
            .on_press(Message::CancelCreate),
        )
        .push(
            Container::new(surface)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(Horizontal::Center)
                .align_y(Vertical::Center),
        )
        .into()
}

fn status_line<'a>(text: &str) -> Element<'a, Message> {
    Container::new(Text::new(text.to_string()).size(typography::BODY))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}
