// SPDX-License-Identifier: MPL-2.0
//! Single-album screen: the album's photos plus upload-into-album.

use crate::api::albums::AlbumDetail;
use crate::image_cache::ImageCache;
use crate::ui::theme::{self, palette, spacing, typography};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, mouse_area, progress_bar, scrollable, Column, Container, Row, Text};
use iced::{ContentFit, Element, Length};

const GRID_COLUMNS: usize = 4;
const CELL_WIDTH: f32 = 220.0;
const CELL_HEIGHT: f32 = 160.0;

#[derive(Debug, Clone, Copy)]
pub enum Message {
    BackPressed,
    /// Upload a batch straight into this album.
    UploadPressed,
    PhotoClicked(usize),
    DeleteAlbumPressed,
}

pub struct ViewContext<'a> {
    pub album: Option<&'a AlbumDetail>,
    pub images: &'a ImageCache,
    pub upload_progress: Option<u8>,
    pub loading: bool,
    pub error: Option<&'a str>,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    if ctx.loading && ctx.album.is_none() {
        return status_line("Loading album...");
    }
    let Some(album) = ctx.album else {
        return status_line(ctx.error.unwrap_or("Failed to load album"));
    };

    let back = button(Text::new("← Back"))
        .style(theme::text_button)
        .on_press(Message::BackPressed);
    let delete = button(Text::new("Delete album").size(typography::CAPTION))
        .style(theme::text_button)
        .on_press(Message::DeleteAlbumPressed);

    let mut header = Row::new()
        .spacing(spacing::MD)
        .align_y(Vertical::Center)
        .push(back)
        .push(Text::new(album.title.as_str()).size(typography::TITLE_MD))
        .push(iced::widget::Space::new().width(Length::Fill).height(Length::Shrink))
        .push(delete);

    header = header.push(
        button(Text::new("Upload photos"))
            .padding([spacing::XS, spacing::LG])
            .style(theme::primary_button)
            .on_press(Message::UploadPressed),
    );

    let mut content = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::MD)
        .push(header);

    if let Some(percent) = ctx.upload_progress {
        content = content.push(
            Row::new()
                .spacing(spacing::SM)
                .align_y(Vertical::Center)
                .push(
                    progress_bar(0.0..=100.0, f32::from(percent))
                        .length(240.0)
                        .girth(10.0),
                )
                .push(Text::new(format!("{}%", percent)).size(typography::CAPTION)),
        );
    }

    if let Some(error) = ctx.error {
        content = content.push(
            Text::new(error)
                .size(typography::CAPTION)
                .color(palette::DANGER),
        );
    }

    if album.album_photos.is_empty() {
        content = content.push(Text::new("This album is empty.").size(typography::BODY));
    } else {
        let mut rows = Column::new().spacing(spacing::XS);
        for (row_index, chunk) in album.album_photos.chunks(GRID_COLUMNS).enumerate() {
            let mut row = Row::new().spacing(spacing::XS);
            for (column_index, photo) in chunk.iter().enumerate() {
                let index = row_index * GRID_COLUMNS + column_index;
                let cell: Element<'a, Message> = match photo
                    .blob_url
                    .as_deref()
                    .and_then(|url| ctx.images.peek(url))
                {
                    Some(handle) => iced::widget::image(handle)
                        .content_fit(ContentFit::Cover)
                        .width(Length::Fill)
                        .height(Length::Fill)
                        .into(),
                    None => Container::new(
                        Text::new("…")
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
                let framed = Container::new(cell)
                    .width(Length::Fixed(CELL_WIDTH))
                    .height(Length::Fixed(CELL_HEIGHT));
                row = row.push(
                    mouse_area(framed).on_press(Message::PhotoClicked(index)),
                );
            }
            rows = rows.push(row);
        }
        content = content.push(rows);
    }

    scrollable(content)
        .width(Length::Fill)
        .height(Length::Fill)
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
