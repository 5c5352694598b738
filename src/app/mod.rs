// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between screens.
//!
//! The `App` struct wires together the API client, the authentication
//! session, the screen states, and the preview session. Policy decisions
//! (where uploads land, what a preview effect does to the focused index,
//! when lists reload) live in the update loop so user-facing behavior is
//! easy to audit in one place.

mod message;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::api::photos::Photo;
use crate::api::albums::{Album, AlbumDetail};
use crate::api::{self, ApiClient};
use crate::config::{self, Config};
use crate::image_cache::ImageCache;
use crate::photo_navigation::PhotoNavigator;
use crate::session;
use crate::ui::preview::PhotoRef;
use crate::ui::{albums, login, preview, register, sidebar};
use iced::{window, Element, Size, Subscription, Task, Theme};
use std::collections::HashSet;
use std::fmt;

pub const WINDOW_DEFAULT_WIDTH: u32 = 1100;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const MIN_WINDOW_WIDTH: u32 = 800;
pub const MIN_WINDOW_HEIGHT: u32 = 600;

/// Root Iced application state.
pub struct App {
    config: Config,
    api: ApiClient,
    theme: Theme,

    screen: Screen,
    library_tab: sidebar::Tab,
    /// Signed-in username, mirrored out of the session for the sidebar.
    username: Option<String>,
    /// Transient status line for errors that should not replace a screen.
    banner: Option<String>,

    login: login::State,
    register: register::State,
    albums_ui: albums::State,

    photos: Vec<Photo>,
    photos_loading: bool,
    photos_error: Option<String>,
    /// Set when the last listing page came back short.
    photos_exhausted: bool,

    albums: Vec<Album>,
    albums_loading: bool,
    albums_error: Option<String>,

    album: Option<AlbumDetail>,
    album_loading: bool,
    album_error: Option<String>,

    images: ImageCache,
    /// URLs with a fetch in flight, to avoid duplicate requests.
    pending_fetches: HashSet<String>,

    /// Owner of the focused-photo index; the preview component reads it.
    navigator: PhotoNavigator,
    preview: preview::State,
    /// The sequence the preview renders, rebuilt from the active screen.
    preview_photos: Vec<PhotoRef>,
    preview_menu_open: bool,
    album_picker_open: bool,

    /// Blended batch percent while an upload runs.
    upload_progress: Option<u8>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("photos", &self.photos.len())
            .field("preview_open", &self.navigator.is_open())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH as f32, MIN_WINDOW_HEIGHT as f32)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Resolves the theme from config, falling back to the system preference.
fn resolve_theme(config: &Config) -> Theme {
    match config.theme.as_deref() {
        Some("dark") => Theme::Dark,
        Some("light") => Theme::Light,
        _ => match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => Theme::Dark,
            _ => Theme::Light,
        },
    }
}

impl App {
    /// Initializes application state and, for a still-valid session, kicks
    /// off the first photo listing.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_else(|error| {
            eprintln!("Failed to load config: {:?}", error);
            Config::default()
        });

        let stored = session::load();
        let username = stored.username().map(str::to_string);
        let shared = api::shared_session(stored);

        let server_url = flags
            .server_url
            .as_deref()
            .unwrap_or_else(|| config.server_url())
            .to_string();
        let api = ApiClient::new(&server_url, shared).expect("failed to initialize HTTP client");

        let theme = resolve_theme(&config);
        let screen = if username.is_some() {
            Screen::Library
        } else {
            Screen::Welcome
        };

        let mut app = App {
            config,
            api,
            theme,
            screen,
            library_tab: sidebar::Tab::Photos,
            username,
            banner: None,
            login: login::State::default(),
            register: register::State::default(),
            albums_ui: albums::State::default(),
            photos: Vec::new(),
            photos_loading: false,
            photos_error: None,
            photos_exhausted: false,
            albums: Vec::new(),
            albums_loading: false,
            albums_error: None,
            album: None,
            album_loading: false,
            album_error: None,
            images: ImageCache::new(),
            pending_fetches: HashSet::new(),
            navigator: PhotoNavigator::new(),
            preview: preview::State::new(),
            preview_photos: Vec::new(),
            preview_menu_open: false,
            album_picker_open: false,
            upload_progress: None,
        };

        let task = if app.username.is_some() {
            app.load_photos(0)
        } else {
            Task::none()
        };
        (app, task)
    }

    fn title(&self) -> String {
        "Lazy Photos".to_string()
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create(self.navigator.is_open())
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }
}
