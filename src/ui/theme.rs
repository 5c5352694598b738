// SPDX-License-Identifier: MPL-2.0
//! Design tokens and shared widget styles.
//!
//! Centralizes the palette, spacing scale, and the handful of button and
//! container styles the screens share, so the app reads consistently in
//! both light and dark themes.

use iced::widget::{button, container};
use iced::{Background, Border, Color, Shadow, Theme};

pub mod palette {
    use iced::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.1);
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);

    // Brand colors (blue scale)
    pub const PRIMARY_400: Color = Color::from_rgb(0.4, 0.7, 1.0);
    pub const PRIMARY_500: Color = Color::from_rgb(0.3, 0.6, 0.9);
    pub const PRIMARY_600: Color = Color::from_rgb(0.2, 0.5, 0.8);

    pub const DANGER: Color = Color::from_rgb(0.85, 0.25, 0.25);
}

pub mod opacity {
    /// Preview backdrop.
    pub const OVERLAY_STRONG: f32 = 0.85;
    /// Hovered overlay controls.
    pub const OVERLAY_HOVER: f32 = 0.5;
    /// Pressed overlay controls.
    pub const OVERLAY_PRESSED: f32 = 0.7;
}

/// Spacing scale (8px grid).
pub mod spacing {
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
}

/// Font size scale.
pub mod typography {
    pub const BODY: f32 = 16.0;
    pub const CAPTION: f32 = 13.0;
    pub const TITLE_MD: f32 = 22.0;
    pub const TITLE_LG: f32 = 30.0;
    /// Oversized glyphs for the preview chevrons.
    pub const CHEVRON: f32 = 40.0;
}

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const LG: f32 = 10.0;
}

/// Primary action button (login, create album, upload).
pub fn primary_button(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => palette::PRIMARY_400,
        _ => palette::PRIMARY_500,
    };
    match status {
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(palette::GRAY_200)),
            text_color: palette::GRAY_400,
            border: Border {
                radius: radius::SM.into(),
                ..Border::default()
            },
            shadow: Shadow::default(),
            snap: true,
        },
        _ => button::Style {
            background: Some(Background::Color(background)),
            text_color: palette::WHITE,
            border: Border {
                color: palette::PRIMARY_600,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: Shadow::default(),
            snap: true,
        },
    }
}

/// Quiet text-like button (tabs, links, menu entries).
pub fn text_button(theme: &Theme, status: button::Status) -> button::Style {
    let text_color = match status {
        button::Status::Hovered | button::Status::Pressed => palette::PRIMARY_500,
        _ => theme.extended_palette().background.base.text,
    };
    button::Style {
        background: None,
        text_color,
        border: Border::default(),
        shadow: Shadow::default(),
        snap: true,
    }
}

/// Overlay controls drawn on top of photos (chevrons, close, menu).
pub fn overlay_button(
    alpha_normal: f32,
) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let alpha = match status {
            button::Status::Hovered => opacity::OVERLAY_HOVER,
            button::Status::Pressed => opacity::OVERLAY_PRESSED,
            _ => alpha_normal,
        };
        button::Style {
            background: Some(Background::Color(Color {
                a: alpha,
                ..palette::BLACK
            })),
            text_color: palette::WHITE,
            border: Border::default(),
            shadow: Shadow::default(),
            snap: true,
        }
    }
}

/// The darkened full-screen backdrop behind the preview.
pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..palette::BLACK
        })),
        ..container::Style::default()
    }
}

/// Modal dialog surface (create album, album picker).
pub fn modal(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.base.color;
    container::Style {
        background: Some(Background::Color(base)),
        border: Border {
            color: palette::GRAY_700,
            width: 1.0,
            radius: radius::LG.into(),
        },
        ..container::Style::default()
    }
}

/// Placeholder cell shown while an image is still being fetched.
pub fn placeholder(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::GRAY_700)),
        border: Border {
            radius: radius::SM.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

const _: () = {
    assert!(opacity::OVERLAY_STRONG > 0.0);
    assert!(opacity::OVERLAY_STRONG < 1.0);
    assert!(typography::CHEVRON > typography::TITLE_LG);
};
