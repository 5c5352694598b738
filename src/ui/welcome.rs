// SPDX-License-Identifier: MPL-2.0
//! Logged-out landing screen.

use crate::ui::theme::{self, spacing, typography};
use iced::alignment::Horizontal;
use iced::widget::{button, Column, Container, Row, Text};
use iced::{Element, Length};

#[derive(Debug, Clone, Copy)]
pub enum Message {
    LoginPressed,
    RegisterPressed,
}

pub fn view<'a>() -> Element<'a, Message> {
    let title = Text::new("Lazy Photos").size(typography::TITLE_LG);
    let tagline = Text::new("Store your memories like a true geek.").size(typography::BODY);

    let actions = Row::new()
        .spacing(spacing::MD)
        .push(
            button(Text::new("Login"))
                .padding([spacing::XS, spacing::LG])
                .style(theme::primary_button)
                .on_press(Message::LoginPressed),
        )
        .push(
            button(Text::new("Register"))
                .padding([spacing::XS, spacing::LG])
                .style(theme::text_button)
                .on_press(Message::RegisterPressed),
        );

    let hero = Column::new()
        .spacing(spacing::MD)
        .align_x(Horizontal::Center)
        .push(title)
        .push(tagline)
        .push(actions);

    Container::new(hero)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(iced::alignment::Vertical::Center)
        .into()
}
