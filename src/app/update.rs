// SPDX-License-Identifier: MPL-2.0
//! Message handling for the application.

use super::{App, Message, Screen};
use crate::api::auth::{self, LoginRequest, RegisterRequest};
use crate::api::photos::{self, UploadFile};
use crate::api::albums as albums_api;
use crate::error::Error;
use crate::photo_navigation::PhotoNavigator;
use crate::session;
use crate::ui::preview::PhotoRef;
use crate::ui::{album_page, albums, gallery, login, preview, register, sidebar, welcome};
use iced::Task;
use std::path::PathBuf;

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Welcome(message) => self.handle_welcome(message),
            Message::Login(message) => self.handle_login(message),
            Message::Register(message) => self.handle_register(message),
            Message::Sidebar(message) => self.handle_sidebar(message),
            Message::Gallery(message) => self.handle_gallery(message),
            Message::Albums(message) => self.handle_albums(message),
            Message::AlbumPage(message) => self.handle_album_page(message),
            Message::Preview(message) => {
                let effect = self.preview.update(message);
                self.apply_preview_effect(effect)
            }

            Message::LoginCompleted(result) => self.handle_login_completed(result),
            Message::RegisterCompleted(result) => {
                self.register.pending = false;
                match result {
                    Ok(()) => {
                        self.register = register::State::default();
                        self.login = login::State {
                            notice: Some("Account created. Please log in.".to_string()),
                            ..login::State::default()
                        };
                        self.screen = Screen::Login;
                    }
                    Err(error) => self.register.error = Some(error.to_string()),
                }
                Task::none()
            }

            Message::PhotosLoaded { offset, result } => {
                self.photos_loading = false;
                match result {
                    Ok(page) => {
                        self.photos_exhausted = (page.len() as u32) < self.config.page_size();
                        if offset == 0 {
                            self.photos = page;
                        } else {
                            self.photos.extend(page);
                        }
                        self.photos_error = None;
                        if !matches!(self.screen, Screen::Album(_)) {
                            self.navigator.set_count(self.photos.len());
                            self.refresh_preview_photos();
                        }
                        let thumbs: Vec<String> = self
                            .photos
                            .iter()
                            .filter_map(|p| p.grid_url().map(str::to_string))
                            .collect();
                        self.fetch_images(thumbs)
                    }
                    Err(error) => {
                        self.photos_error = Some(error.to_string());
                        Task::none()
                    }
                }
            }
            Message::AlbumsLoaded(result) => {
                self.albums_loading = false;
                match result {
                    Ok(albums) => {
                        self.albums = albums;
                        self.albums_error = None;
                        let thumbs: Vec<String> = self
                            .albums
                            .iter()
                            .filter_map(|a| a.thumb.clone())
                            .collect();
                        self.fetch_images(thumbs)
                    }
                    Err(error) => {
                        self.albums_error = Some(error.to_string());
                        Task::none()
                    }
                }
            }
            Message::AlbumLoaded(result) => {
                self.album_loading = false;
                match result {
                    Ok(album) => {
                        let urls: Vec<String> = album
                            .album_photos
                            .iter()
                            .filter_map(|p| p.blob_url.clone())
                            .collect();
                        if matches!(self.screen, Screen::Album(id) if id == album.id) {
                            self.navigator.set_count(album.album_photos.len());
                        }
                        self.album = Some(album);
                        self.album_error = None;
                        self.refresh_preview_photos();
                        self.fetch_images(urls)
                    }
                    Err(error) => {
                        self.album_error = Some(error.to_string());
                        Task::none()
                    }
                }
            }
            Message::AlbumCreated(result) => {
                self.albums_ui.pending = false;
                match result {
                    Ok(()) => {
                        self.albums_ui.show_create_modal = false;
                        self.load_albums()
                    }
                    Err(error) => {
                        self.banner = Some(error.to_string());
                        Task::none()
                    }
                }
            }
            Message::AlbumDeleted(result) => match result {
                Ok(()) => {
                    self.close_preview();
                    self.album = None;
                    self.screen = Screen::Library;
                    self.library_tab = sidebar::Tab::Albums;
                    self.load_albums()
                }
                Err(error) => {
                    self.banner = Some(error.to_string());
                    Task::none()
                }
            },
            Message::PhotosAddedToAlbum(result) => {
                match result {
                    Ok(()) => {
                        self.album_picker_open = false;
                        if let Screen::Album(id) = self.screen {
                            return self.load_album(id);
                        }
                    }
                    Err(error) => self.banner = Some(error.to_string()),
                }
                Task::none()
            }
            Message::PhotoRemovedFromAlbum(result) => match result {
                Ok(()) => {
                    self.close_preview();
                    if let Screen::Album(id) = self.screen {
                        self.load_album(id)
                    } else {
                        Task::none()
                    }
                }
                Err(error) => {
                    self.banner = Some(error.to_string());
                    Task::none()
                }
            },

            Message::FilesPicked(paths) => match paths {
                Some(paths) if !paths.is_empty() => Task::perform(
                    read_files(paths),
                    Message::FilesRead,
                ),
                _ => Task::none(),
            },
            Message::FilesRead(result) => match result {
                Ok(files) if !files.is_empty() => self.start_upload(files),
                Ok(_) => Task::none(),
                Err(error) => {
                    self.banner = Some(error.to_string());
                    Task::none()
                }
            },
            Message::UploadProgress(percent) => {
                self.upload_progress = Some(percent);
                Task::none()
            }
            Message::UploadCompleted(result) => {
                self.upload_progress = None;
                match result {
                    Ok(ids) => match self.screen {
                        Screen::Album(album_id) if !ids.is_empty() => {
                            let api = self.api.clone();
                            Task::perform(
                                async move {
                                    albums_api::add_photos_to_album(&api, album_id, &ids).await
                                },
                                Message::PhotosAddedToAlbum,
                            )
                        }
                        _ => self.load_photos(0),
                    },
                    Err(message) => {
                        self.banner = Some(message);
                        Task::none()
                    }
                }
            }

            Message::ImageFetched { url, result } => {
                self.pending_fetches.remove(&url);
                match result {
                    Ok(bytes) => self.images.insert(url, bytes),
                    Err(error) => eprintln!("Failed to fetch image {}: {}", url, error),
                }
                Task::none()
            }
            Message::WindowResized(size) => {
                self.preview.set_viewport(size);
                if let Some(index) = self.navigator.selected() {
                    self.preview
                        .align_strip(index, self.navigator.count())
                        .map(Message::Preview)
                } else {
                    Task::none()
                }
            }

            Message::PreviewMenuToggled => {
                self.preview_menu_open = !self.preview_menu_open;
                Task::none()
            }
            Message::AddToAlbumPressed => {
                self.preview_menu_open = false;
                self.album_picker_open = true;
                if self.albums.is_empty() {
                    self.load_albums()
                } else {
                    Task::none()
                }
            }
            Message::AlbumPicked(album_id) => {
                let Some(photo_id) = self.focused_photo_id() else {
                    self.album_picker_open = false;
                    return Task::none();
                };
                let api = self.api.clone();
                Task::perform(
                    async move { albums_api::add_photo_to_album(&api, album_id, photo_id).await },
                    Message::PhotosAddedToAlbum,
                )
            }
            Message::AlbumPickerDismissed => {
                self.album_picker_open = false;
                Task::none()
            }
            Message::RemoveFromAlbumPressed => {
                let (Screen::Album(album_id), Some(photo_id)) =
                    (self.screen, self.focused_photo_id())
                else {
                    return Task::none();
                };
                let api = self.api.clone();
                Task::perform(
                    async move {
                        albums_api::remove_photo_from_album(&api, album_id, photo_id).await
                    },
                    Message::PhotoRemovedFromAlbum,
                )
            }

            Message::BannerDismissed => {
                self.banner = None;
                Task::none()
            }
        }
    }

    fn handle_welcome(&mut self, message: welcome::Message) -> Task<Message> {
        match message {
            welcome::Message::LoginPressed => {
                self.login = login::State::default();
                self.screen = Screen::Login;
            }
            welcome::Message::RegisterPressed => {
                self.register = register::State::default();
                self.screen = Screen::Register;
            }
        }
        Task::none()
    }

    fn handle_login(&mut self, message: login::Message) -> Task<Message> {
        self.login.update(&message);
        match message {
            login::Message::Submit => {
                if self.login.pending {
                    return Task::none();
                }
                self.login.pending = true;
                self.login.error = None;
                let api = self.api.clone();
                let request = LoginRequest {
                    email: self.login.email.clone(),
                    password: self.login.password.clone(),
                };
                Task::perform(
                    async move { auth::login_user(&api, &request).await },
                    Message::LoginCompleted,
                )
            }
            login::Message::GoToRegister => {
                self.register = register::State::default();
                self.screen = Screen::Register;
                Task::none()
            }
            _ => Task::none(),
        }
    }

    fn handle_login_completed(
        &mut self,
        result: Result<auth::AccessTokenResponse, Error>,
    ) -> Task<Message> {
        self.login.pending = false;
        match result {
            Ok(tokens) => match tokens.refresh_token {
                Some(refresh_token) => {
                    let username = self.login.email.clone();
                    {
                        let mut stored =
                            self.api.session().write().expect("session lock poisoned");
                        stored.set(tokens.access_token, refresh_token, username.clone());
                        session::save(&stored);
                    }
                    self.username = Some(username);
                    self.login = login::State::default();
                    self.screen = Screen::Library;
                    self.library_tab = sidebar::Tab::Photos;
                    self.load_photos(0)
                }
                None => {
                    self.login.error = Some("Failed to login".to_string());
                    Task::none()
                }
            },
            Err(error) => {
                self.login.error = Some(error.to_string());
                Task::none()
            }
        }
    }

    fn handle_register(&mut self, message: register::Message) -> Task<Message> {
        self.register.update(&message);
        match message {
            register::Message::Submit => {
                if self.register.pending {
                    return Task::none();
                }
                self.register.pending = true;
                self.register.error = None;
                let api = self.api.clone();
                let request = RegisterRequest {
                    email: self.register.email.clone(),
                    password: self.register.password.clone(),
                };
                Task::perform(
                    async move { auth::register_user(&api, &request).await },
                    Message::RegisterCompleted,
                )
            }
            register::Message::GoToLogin => {
                self.login = login::State::default();
                self.screen = Screen::Login;
                Task::none()
            }
            _ => Task::none(),
        }
    }

    fn handle_sidebar(&mut self, message: sidebar::Message) -> Task<Message> {
        match message {
            sidebar::Message::TabSelected(tab) => {
                self.library_tab = tab;
                self.close_preview();
                match tab {
                    sidebar::Tab::Photos if self.photos.is_empty() => self.load_photos(0),
                    sidebar::Tab::Albums => self.load_albums(),
                    _ => Task::none(),
                }
            }
            sidebar::Message::LogoutPressed => self.logout(),
        }
    }

    fn handle_gallery(&mut self, message: gallery::Message) -> Task<Message> {
        match message {
            gallery::Message::UploadPressed => pick_files_task(),
            gallery::Message::PhotoClicked(index) => self.open_preview(index),
            gallery::Message::LoadMorePressed => {
                let offset = self.photos.len() as u32;
                self.load_photos(offset)
            }
        }
    }

    fn handle_albums(&mut self, message: albums::Message) -> Task<Message> {
        self.albums_ui.update(&message);
        match message {
            albums::Message::SubmitCreate => {
                let name = self.albums_ui.title.trim().to_string();
                if name.is_empty() || self.albums_ui.pending {
                    return Task::none();
                }
                self.albums_ui.pending = true;
                let api = self.api.clone();
                Task::perform(
                    async move { albums_api::create_album(&api, &name, &[]).await },
                    Message::AlbumCreated,
                )
            }
            albums::Message::AlbumOpened(album_id) => {
                self.close_preview();
                self.screen = Screen::Album(album_id);
                self.album = None;
                self.album_error = None;
                self.load_album(album_id)
            }
            _ => Task::none(),
        }
    }

    fn handle_album_page(&mut self, message: album_page::Message) -> Task<Message> {
        match message {
            album_page::Message::BackPressed => {
                self.close_preview();
                self.album = None;
                self.screen = Screen::Library;
                self.library_tab = sidebar::Tab::Albums;
                self.refresh_preview_photos();
                self.load_albums()
            }
            album_page::Message::UploadPressed => pick_files_task(),
            album_page::Message::PhotoClicked(index) => self.open_preview(index),
            album_page::Message::DeleteAlbumPressed => {
                let Screen::Album(album_id) = self.screen else {
                    return Task::none();
                };
                let api = self.api.clone();
                Task::perform(
                    async move { albums_api::delete_album(&api, album_id).await },
                    Message::AlbumDeleted,
                )
            }
        }
    }

    /// Applies a transition requested by the preview component.
    fn apply_preview_effect(&mut self, effect: preview::Effect) -> Task<Message> {
        match effect {
            preview::Effect::None => Task::none(),
            preview::Effect::Close => {
                self.close_preview();
                Task::none()
            }
            preview::Effect::Previous => match self.navigator.previous() {
                Some(index) => self.focus_preview(index),
                None => Task::none(),
            },
            preview::Effect::Next => match self.navigator.next() {
                Some(index) => self.focus_preview(index),
                None => Task::none(),
            },
        }
    }

    fn open_preview(&mut self, index: usize) -> Task<Message> {
        self.refresh_preview_photos();
        self.navigator.set_count(self.preview_photos.len());
        if !self.navigator.open(index) {
            return Task::none();
        }
        self.preview.reset();
        self.preview_menu_open = false;
        self.album_picker_open = false;
        self.focus_preview(index)
    }

    /// Strip alignment plus prefetch for a newly focused index.
    fn focus_preview(&mut self, index: usize) -> Task<Message> {
        let align = self
            .preview
            .align_strip(index, self.navigator.count())
            .map(Message::Preview);
        let prefetch = self.ensure_preview_images();
        Task::batch([align, prefetch])
    }

    fn close_preview(&mut self) {
        self.navigator.close();
        self.preview.reset();
        self.preview_menu_open = false;
        self.album_picker_open = false;
    }

    /// Rebuilds the preview sequence from the active screen's collection.
    fn refresh_preview_photos(&mut self) {
        self.preview_photos = match self.screen {
            Screen::Album(_) => self
                .album
                .as_ref()
                .map(|album| {
                    album
                        .album_photos
                        .iter()
                        .map(|photo| {
                            PhotoRef::new(
                                photo.blob_url.clone().unwrap_or_default(),
                                format!("Photo {}", photo.photo_id),
                            )
                        })
                        .collect()
                })
                .unwrap_or_default(),
            _ => self
                .photos
                .iter()
                .map(|photo| {
                    PhotoRef::new(
                        photo.photo_url.clone().unwrap_or_default(),
                        photo.display_file_name.clone().unwrap_or_default(),
                    )
                })
                .collect(),
        };
    }

    /// The id of the photo the preview currently focuses.
    fn focused_photo_id(&self) -> Option<i64> {
        let index = self.navigator.selected()?;
        match self.screen {
            Screen::Album(_) => self
                .album
                .as_ref()?
                .album_photos
                .get(index)
                .map(|p| p.photo_id),
            _ => self.photos.get(index).map(|p| p.id),
        }
    }

    pub(super) fn load_photos(&mut self, offset: u32) -> Task<Message> {
        self.photos_loading = true;
        if offset == 0 {
            self.photos_error = None;
        }
        let api = self.api.clone();
        let page_size = self.config.page_size();
        Task::perform(
            async move { photos::latest_photos(&api, offset, page_size).await },
            move |result| Message::PhotosLoaded { offset, result },
        )
    }

    fn load_albums(&mut self) -> Task<Message> {
        self.albums_loading = true;
        self.albums_error = None;
        let api = self.api.clone();
        Task::perform(
            async move { albums_api::get_albums(&api).await },
            Message::AlbumsLoaded,
        )
    }

    fn load_album(&mut self, album_id: i64) -> Task<Message> {
        self.album_loading = true;
        self.album_error = None;
        let api = self.api.clone();
        Task::perform(
            async move { albums_api::get_album(&api, album_id).await },
            Message::AlbumLoaded,
        )
    }

    /// Starts fetches for the given URLs, skipping cached and in-flight
    /// ones.
    fn fetch_images<I>(&mut self, urls: I) -> Task<Message>
    where
        I: IntoIterator<Item = String>,
    {
        let mut tasks = Vec::new();
        for url in urls {
            if url.is_empty()
                || self.images.contains(&url)
                || self.pending_fetches.contains(&url)
            {
                continue;
            }
            self.pending_fetches.insert(url.clone());
            let api = self.api.clone();
            tasks.push(Task::perform(
                async move {
                    let result = api.fetch_bytes(&url).await;
                    (url, result)
                },
                |(url, result)| Message::ImageFetched { url, result },
            ));
        }
        Task::batch(tasks)
    }

    /// Prefetches the focused photo and its two neighbors.
    fn ensure_preview_images(&mut self) -> Task<Message> {
        let Some(index) = self.navigator.selected() else {
            return Task::none();
        };
        let count = self.preview_photos.len();
        if count == 0 || index >= count {
            return Task::none();
        }
        let mut wanted = vec![self.preview_photos[index].src.clone()];
        if count > 1 {
            wanted.push(self.preview_photos[(index + 1) % count].src.clone());
            wanted.push(self.preview_photos[(index + count - 1) % count].src.clone());
        }
        self.fetch_images(wanted)
    }

    /// Spawns the sequential batch upload and bridges its progress callback
    /// into the message stream.
    fn start_upload(&mut self, files: Vec<UploadFile>) -> Task<Message> {
        use iced::futures::channel::{mpsc, oneshot};
        use iced::futures::stream;
        use iced::futures::StreamExt;

        self.upload_progress = Some(0);
        self.banner = None;

        // Channels for progress and result
        let (progress_tx, progress_rx) = mpsc::channel::<u8>(100);
        let (result_tx, result_rx) = oneshot::channel::<Result<Vec<i64>, String>>();

        let api = self.api.clone();
        tokio::spawn(async move {
            let mut progress_tx = progress_tx;
            let result = crate::upload::upload_photos(&api, &files, |percent| {
                let _ = progress_tx.try_send(percent);
            })
            .await;

            // Send the result through the oneshot channel; progress_tx is
            // dropped here, closing the channel.
            let _ = result_tx.send(result.map_err(|e| e.to_string()));
        });

        // State for the stream
        #[allow(clippy::items_after_statements)]
        enum UploadPhase {
            ReceivingProgress {
                progress_rx: mpsc::Receiver<u8>,
                result_rx: oneshot::Receiver<Result<Vec<i64>, String>>,
            },
            WaitingForResult {
                result_rx: oneshot::Receiver<Result<Vec<i64>, String>>,
            },
            Completed,
        }

        let upload_stream = stream::unfold(
            UploadPhase::ReceivingProgress {
                progress_rx,
                result_rx,
            },
            |phase| async move {
                match phase {
                    UploadPhase::ReceivingProgress {
                        mut progress_rx,
                        result_rx,
                    } => match progress_rx.next().await {
                        Some(percent) => Some((
                            Message::UploadProgress(percent),
                            UploadPhase::ReceivingProgress {
                                progress_rx,
                                result_rx,
                            },
                        )),
                        None => {
                            // Progress channel closed; a dropped final event
                            // must not leave the bar short of 100.
                            Some((
                                Message::UploadProgress(100),
                                UploadPhase::WaitingForResult { result_rx },
                            ))
                        }
                    },
                    UploadPhase::WaitingForResult { result_rx } => match result_rx.await {
                        Ok(result) => {
                            Some((Message::UploadCompleted(result), UploadPhase::Completed))
                        }
                        Err(_) => Some((
                            Message::UploadCompleted(Err(
                                "Upload task cancelled".to_string()
                            )),
                            UploadPhase::Completed,
                        )),
                    },
                    UploadPhase::Completed => None, // Terminate the stream
                }
            },
        );

        Task::stream(upload_stream)
    }

    fn logout(&mut self) -> Task<Message> {
        {
            let mut stored = self.api.session().write().expect("session lock poisoned");
            stored.clear();
            session::save(&stored);
        }
        self.username = None;
        self.banner = None;
        self.screen = Screen::Welcome;
        self.library_tab = sidebar::Tab::Photos;
        self.photos.clear();
        self.photos_error = None;
        self.photos_exhausted = false;
        self.albums.clear();
        self.albums_error = None;
        self.album = None;
        self.album_error = None;
        self.albums_ui = albums::State::default();
        self.navigator = PhotoNavigator::new();
        self.preview.reset();
        self.preview_photos.clear();
        self.preview_menu_open = false;
        self.album_picker_open = false;
        self.upload_progress = None;
        Task::none()
    }
}

/// Opens the native multi-file picker.
fn pick_files_task() -> Task<Message> {
    Task::perform(
        async {
            rfd::AsyncFileDialog::new()
                .set_title("Upload photos")
                .add_filter("Images", &["jpg", "jpeg", "png", "gif", "webp", "bmp"])
                .pick_files()
                .await
                .map(|handles| {
                    handles
                        .into_iter()
                        .map(|handle| handle.path().to_path_buf())
                        .collect()
                })
        },
        Message::FilesPicked,
    )
}

/// Reads the picked files into memory off the UI executor.
async fn read_files(paths: Vec<PathBuf>) -> Result<Vec<UploadFile>, Error> {
    tokio::task::spawn_blocking(move || {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "photo".to_string());
            let bytes = std::fs::read(&path)?;
            files.push(UploadFile::new(name, bytes));
        }
        Ok(files)
    })
    .await
    .map_err(|e| Error::Io(e.to_string()))?
}
