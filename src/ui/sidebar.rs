// SPDX-License-Identifier: MPL-2.0
//! Library sidebar: app name, tab switcher, signed-in user, logout.

use crate::ui::theme::{self, palette, spacing, typography};
use iced::widget::{button, Column, Container, Space, Text};
use iced::{Element, Length};

/// Which library tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Photos,
    Albums,
}

#[derive(Debug, Clone, Copy)]
pub enum Message {
    TabSelected(Tab),
    LogoutPressed,
}

pub fn view<'a>(active: Tab, username: Option<&'a str>) -> Element<'a, Message> {
    let tab = |label: &'static str, tab: Tab| {
        let text = if active == tab {
            Text::new(label).size(typography::BODY).color(palette::PRIMARY_500)
        } else {
            Text::new(label).size(typography::BODY)
        };
        button(text)
            .width(Length::Fill)
            .style(theme::text_button)
            .on_press(Message::TabSelected(tab))
    };

    let mut column = Column::new()
        .spacing(spacing::SM)
        .padding(spacing::MD)
        .width(Length::Fixed(180.0))
        .push(Text::new("Lazy Photos").size(typography::TITLE_MD))
        .push(Space::new().width(Length::Shrink).height(Length::Fixed(spacing::MD)))
        .push(tab("Photos", Tab::Photos))
        .push(tab("Albums", Tab::Albums))
        .push(Space::new().width(Length::Shrink).height(Length::Fill));

    if let Some(username) = username {
        column = column.push(
            Text::new(username.to_string())
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        );
    }
    column = column.push(
        button(Text::new("Logout").size(typography::CAPTION))
            .style(theme::text_button)
            .on_press(Message::LogoutPressed),
    );

    Container::new(column).height(Length::Fill).into()
}
