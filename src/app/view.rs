// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Renders the active screen, layers the status banner above it, and
//! overlays the photo preview (with its screen-specific toolbar actions
//! and album-picker modal) whenever a session is open.

use super::{App, Message, Screen};
use crate::ui::preview;
use crate::ui::theme::{self, palette, spacing, typography};
use crate::ui::{album_page, albums, gallery, sidebar, welcome};
use iced::alignment::Vertical;
use iced::widget::{button, Column, Container, Row, Space, Stack, Text};
use iced::{Element, Length};

pub fn view(app: &App) -> Element<'_, Message> {
    let screen: Element<'_, Message> = match app.screen {
        Screen::Welcome => welcome::view().map(Message::Welcome),
        Screen::Login => app.login.view().map(Message::Login),
        Screen::Register => app.register.view().map(Message::Register),
        Screen::Library => view_library(app),
        Screen::Album(_) => album_page::view(album_page::ViewContext {
            album: app.album.as_ref(),
            images: &app.images,
            upload_progress: app.upload_progress,
            loading: app.album_loading,
            error: app.album_error.as_deref(),
        })
        .map(Message::AlbumPage),
    };

    let mut column = Column::new();
    if let Some(banner) = &app.banner {
        column = column.push(banner_row(banner));
    }
    column = column.push(
        Container::new(screen)
            .width(Length::Fill)
            .height(Length::Fill),
    );

    let base: Element<'_, Message> = column.width(Length::Fill).height(Length::Fill).into();

    match app.navigator.selected() {
        Some(index) => Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(base)
            .push(view_preview(app, index))
            .into(),
        None => base,
    }
}

fn view_library(app: &App) -> Element<'_, Message> {
    let sidebar =
        sidebar::view(app.library_tab, app.username.as_deref()).map(Message::Sidebar);

    let content: Element<'_, Message> = match app.library_tab {
        sidebar::Tab::Photos => gallery::view(gallery::ViewContext {
            photos: &app.photos,
            images: &app.images,
            upload_progress: app.upload_progress,
            loading: app.photos_loading,
            error: app.photos_error.as_deref(),
            can_load_more: !app.photos_exhausted,
        })
        .map(Message::Gallery),
        sidebar::Tab::Albums => albums::view(albums::ViewContext {
            albums: &app.albums,
            images: &app.images,
            state: &app.albums_ui,
            loading: app.albums_loading,
            error: app.albums_error.as_deref(),
        })
        .map(Message::Albums),
    };

    Row::new()
        .push(sidebar)
        .push(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_preview(app: &App, index: usize) -> Element<'_, Message> {
    let actions = match app.screen {
        Screen::Album(_) => remove_action(),
        _ => actions_menu(app.preview_menu_open),
    };

    let overlay = app.album_picker_open.then(|| album_picker(app));

    app.preview.view(
        preview::Context {
            photos: &app.preview_photos,
            index,
            images: &app.images,
            actions: Some(actions),
            overlay,
        },
        Message::Preview,
    )
}

/// Library preview toolbar: the "more actions" menu.
fn actions_menu<'a>(open: bool) -> Element<'a, Message> {
    let toggle = button(Text::new("⋮").size(typography::TITLE_MD))
        .padding([spacing::XS, spacing::SM])
        .style(theme::overlay_button(0.0))
        .on_press(Message::PreviewMenuToggled);

    let mut menu = Column::new().align_x(iced::alignment::Horizontal::Right).push(toggle);
    if open {
        menu = menu.push(
            button(Text::new("Add to album").size(typography::CAPTION))
                .padding(spacing::XS)
                .style(theme::overlay_button(0.6))
                .on_press(Message::AddToAlbumPressed),
        );
    }
    menu.into()
}

/// Album-screen preview toolbar: remove the focused photo from the album.
fn remove_action<'a>() -> Element<'a, Message> {
    button(Text::new("Remove from album").size(typography::CAPTION))
        .padding(spacing::XS)
        .style(theme::overlay_button(0.6))
        .on_press(Message::RemoveFromAlbumPressed)
        .into()
}

/// The album-picker modal rendered in the preview's overlay slot.
fn album_picker(app: &App) -> Element<'_, Message> {
    let mut column = Column::new()
        .spacing(spacing::SM)
        .width(Length::Fixed(280.0))
        .push(Text::new("Select album").size(typography::TITLE_MD));

    if app.albums_loading && app.albums.is_empty() {
        column = column.push(Text::new("Loading albums...").size(typography::CAPTION));
    } else if app.albums.is_empty() {
        column = column.push(Text::new("No albums yet.").size(typography::CAPTION));
    } else {
        for album in &app.albums {
            column = column.push(
                button(
                    Row::new()
                        .spacing(spacing::SM)
                        .align_y(Vertical::Center)
                        .push(Text::new(album.name.as_str()).size(typography::BODY))
                        .push(Space::new(Length::Fill, Length::Shrink))
                        .push(
                            Text::new(format!("{}", album.count))
                                .size(typography::CAPTION)
                                .color(palette::GRAY_400),
                        ),
                )
                .width(Length::Fill)
                .style(theme::text_button)
                .on_press(Message::AlbumPicked(album.id)),
            );
        }
    }

    column = column.push(
        button(Text::new("Cancel").size(typography::CAPTION))
            .style(theme::text_button)
            .on_press(Message::AlbumPickerDismissed),
    );

    column.into()
}

fn banner_row(banner: &str) -> Element<'_, Message> {
    Container::new(
        Row::new()
            .spacing(spacing::MD)
            .align_y(Vertical::Center)
            .push(Text::new(banner).size(typography::CAPTION).color(palette::DANGER))
            .push(Space::new(Length::Fill, Length::Shrink))
            .push(
                button(Text::new("✕").size(typography::CAPTION))
                    .style(theme::text_button)
                    .on_press(Message::BannerDismissed),
            ),
    )
    .width(Length::Fill)
    .padding([spacing::XS, spacing::MD])
    .into()
}
