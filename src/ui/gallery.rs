// SPDX-License-Identifier: MPL-2.0
//! Photo library tab: upload entry point, batch progress, and the photo
//! grid.

use crate::api::photos::Photo;
use crate::image_cache::ImageCache;
use crate::ui::theme::{self, palette, spacing, typography};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{
    button, mouse_area, progress_bar, scrollable, Column, Container, Row, Text,
};
use iced::{ContentFit, Element, Length};

/// Columns in the photo grid.
const GRID_COLUMNS: usize = 4;
/// Grid cell size in logical pixels.
const CELL_WIDTH: f32 = 220.0;
const CELL_HEIGHT: f32 = 160.0;

#[derive(Debug, Clone, Copy)]
pub enum Message {
    /// Open the file picker for a batch upload.
    UploadPressed,
    /// A grid thumbnail was clicked; opens the preview on that index.
    PhotoClicked(usize),
    /// Fetch the next listing page.
    LoadMorePressed,
}

pub struct ViewContext<'a> {
    pub photos: &'a [Photo],
    pub images: &'a ImageCache,
    /// Blended batch percent while an upload is running.
    pub upload_progress: Option<u8>,
    pub loading: bool,
    pub error: Option<&'a str>,
    /// Whether the last page was full, so more photos may exist.
    pub can_load_more: bool,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    if ctx.loading && ctx.photos.is_empty() {
        return status_line("Loading photos...");
    }
    if let Some(error) = ctx.error {
        return status_line(error);
    }

    let upload = button(Text::new("Upload photos"))
        .padding([spacing::XS, spacing::LG])
        .style(theme::primary_button)
        .on_press(Message::UploadPressed);

    let mut header = Row::new()
        .spacing(spacing::MD)
        .align_y(Vertical::Center)
        .push(upload);

    if let Some(percent) = ctx.upload_progress {
        header = header
            .push(
                progress_bar(0.0..=100.0, f32::from(percent))
                    .length(240.0)
                    .girth(10.0),
            )
            .push(Text::new(format!("{}%", percent)).size(typography::CAPTION));
    }

    let mut content = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::MD)
        .push(header);

    if ctx.photos.is_empty() {
        content = content.push(
            Text::new("No photos yet. Upload some!").size(typography::BODY),
        );
    } else {
        content = content.push(grid(ctx.photos, ctx.images));
        if ctx.can_load_more {
            let label = if ctx.loading { "Loading..." } else { "Load more" };
            let mut more = button(Text::new(label)).style(theme::text_button);
            if !ctx.loading {
                more = more.on_press(Message::LoadMorePressed);
            }
            content = content.push(Container::new(more).width(Length::Fill).align_x(Horizontal::Center));
        }
    }

    scrollable(content).width(Length::Fill).height(Length::Fill).into()
}

fn grid<'a>(photos: &'a [Photo], images: &'a ImageCache) -> Element<'a, Message> {
    let mut rows = Column::new().spacing(spacing::XS);
    for (row_index, chunk) in photos.chunks(GRID_COLUMNS).enumerate() {
        let mut row = Row::new().spacing(spacing::XS);
        for (column_index, photo) in chunk.iter().enumerate() {
            let index = row_index * GRID_COLUMNS + column_index;
            row = row.push(cell(photo, images, index));
        }
        rows = rows.push(row);
    }
    rows.into()
}

fn cell<'a>(photo: &'a Photo, images: &'a ImageCache, index: usize) -> Element<'a, Message> {
    let alt = photo.display_file_name.as_deref().unwrap_or("");
    let content: Element<'a, Message> = match photo.grid_url().and_then(|url| images.peek(url)) {
        Some(handle) => iced::widget::image(handle)
            .content_fit(ContentFit::Cover)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => Container::new(Text::new(alt).size(typography::CAPTION).color(palette::GRAY_200))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .style(theme::placeholder)
            .into(),
    };

    let framed = Container::new(content)
        .width(Length::Fixed(CELL_WIDTH))
        .height(Length::Fixed(CELL_HEIGHT));

    mouse_area(framed)
        .on_press(Message::PhotoClicked(index))
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
