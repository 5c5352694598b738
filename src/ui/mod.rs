// SPDX-License-Identifier: MPL-2.0
//! UI screens and shared widgets.

pub mod album_page;
pub mod albums;
pub mod gallery;
pub mod login;
pub mod preview;
pub mod register;
pub mod sidebar;
pub mod theme;
pub mod welcome;
