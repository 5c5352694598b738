// SPDX-License-Identifier: MPL-2.0
//! `lazy_photos` is a desktop client for the Lazy Photos photo-storage
//! service, built with the Iced GUI framework.
//!
//! It provides account sign-in, batch photo upload with blended progress
//! reporting, album organization, and a full-screen photo preview with
//! keyboard and gesture navigation.

#![doc(html_root_url = "https://docs.rs/lazy_photos/0.1.0")]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod image_cache;
pub mod photo_navigation;
pub mod session;
pub mod ui;
pub mod upload;
