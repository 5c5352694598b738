// SPDX-License-Identifier: MPL-2.0
//! Login form.

use crate::ui::theme::{self, palette, spacing, typography};
use iced::alignment::Horizontal;
use iced::widget::{button, text_input, Column, Container, Text};
use iced::{Element, Length};

/// Form state; credentials never outlive the screen.
#[derive(Debug, Clone, Default)]
pub struct State {
    pub email: String,
    pub password: String,
    /// Error from the last attempt, shown under the form.
    pub error: Option<String>,
    /// Whether a login request is in flight.
    pub pending: bool,
    /// One-shot notice (e.g. after a successful registration).
    pub notice: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    EmailChanged(String),
    PasswordChanged(String),
    Submit,
    GoToRegister,
}

impl State {
    pub fn update(&mut self, message: &Message) {
        match message {
            Message::EmailChanged(email) => self.email = email.clone(),
            Message::PasswordChanged(password) => self.password = password.clone(),
            // Submit and navigation are handled by the app.
            Message::Submit | Message::GoToRegister => {}
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let submit_label = if self.pending { "Logging in..." } else { "Login" };
        let mut submit = button(Text::new(submit_label))
            .padding([spacing::XS, spacing::LG])
            .style(theme::primary_button);
        if !self.pending {
            submit = submit.on_press(Message::Submit);
        }

        let mut form = Column::new()
            .spacing(spacing::SM)
            .max_width(360.0)
            .push(Text::new("Login").size(typography::TITLE_MD))
            .push(
                text_input("Email", &self.email)
                    .on_input(Message::EmailChanged)
                    .padding(spacing::XS),
            )
            .push(
                text_input("Password", &self.password)
                    .on_input(Message::PasswordChanged)
                    .on_submit(Message::Submit)
                    .secure(true)
                    .padding(spacing::XS),
            );

        if let Some(notice) = &self.notice {
            form = form.push(
                Text::new(notice.as_str())
                    .size(typography::CAPTION)
                    .color(palette::PRIMARY_600),
            );
        }
        if let Some(error) = &self.error {
            form = form.push(
                Text::new(error.as_str())
                    .size(typography::CAPTION)
                    .color(palette::DANGER),
            );
        }

        form = form.push(submit).push(
            button(Text::new("Don't have an account? Register").size(typography::CAPTION))
                .style(theme::text_button)
                .on_press(Message::GoToRegister),
        );

        Container::new(form)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(iced::alignment::Vertical::Center)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_updates_the_fields() {
        let mut state = State::default();
        state.update(&Message::EmailChanged("ada@example.com".into()));
        state.update(&Message::PasswordChanged("hunter2".into()));
        assert_eq!(state.email, "ada@example.com");
        assert_eq!(state.password, "hunter2");
    }

    #[test]
    fn submit_is_left_to_the_app() {
        let mut state = State::default();
        state.update(&Message::Submit);
        assert!(!state.pending);
    }
}
