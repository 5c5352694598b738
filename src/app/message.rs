// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::api::albums::{Album, AlbumDetail};
use crate::api::auth::AccessTokenResponse;
use crate::api::photos::{Photo, UploadFile};
use crate::error::Error;
use crate::ui::{album_page, albums, gallery, login, preview, register, sidebar, welcome};
use iced::Size;
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Welcome(welcome::Message),
    Login(login::Message),
    Register(register::Message),
    Sidebar(sidebar::Message),
    Gallery(gallery::Message),
    Albums(albums::Message),
    AlbumPage(album_page::Message),
    Preview(preview::Message),

    /// Result of a login request.
    LoginCompleted(Result<AccessTokenResponse, Error>),
    /// Result of a registration request.
    RegisterCompleted(Result<(), Error>),
    /// One page of the photo listing arrived.
    PhotosLoaded {
        offset: u32,
        result: Result<Vec<Photo>, Error>,
    },
    AlbumsLoaded(Result<Vec<Album>, Error>),
    AlbumLoaded(Result<AlbumDetail, Error>),
    AlbumCreated(Result<(), Error>),
    AlbumDeleted(Result<(), Error>),
    /// A photo (or an uploaded batch) was added to an album.
    PhotosAddedToAlbum(Result<(), Error>),
    PhotoRemovedFromAlbum(Result<(), Error>),

    /// Result from the native multi-file picker.
    FilesPicked(Option<Vec<PathBuf>>),
    /// Picked files were read into memory.
    FilesRead(Result<Vec<UploadFile>, Error>),
    /// Blended batch progress while an upload runs (0-100).
    UploadProgress(u8),
    /// The upload batch settled.
    UploadCompleted(Result<Vec<i64>, String>),

    /// Bytes for a remote image arrived (or failed).
    ImageFetched {
        url: String,
        result: Result<Vec<u8>, Error>,
    },
    WindowResized(Size),

    /// Preview toolbar: the actions menu was toggled.
    PreviewMenuToggled,
    /// Preview action: open the album picker for the focused photo.
    AddToAlbumPressed,
    /// An album was chosen in the picker.
    AlbumPicked(i64),
    AlbumPickerDismissed,
    /// Preview action on the album screen: remove the focused photo.
    RemoveFromAlbumPressed,

    /// Dismiss the transient status banner.
    BannerDismissed,
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional API base-URL override (`--server`).
    pub server_url: Option<String>,
}
