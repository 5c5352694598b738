// SPDX-License-Identifier: MPL-2.0
//! Album endpoints: listing, creation, deletion, and album membership.

use super::ApiClient;
use crate::error::{Error, Result};
use serde::Deserialize;

/// An album as it appears in the album grid.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: i64,
    pub name: String,
    /// Number of photos in the album.
    pub count: i64,
    /// Cover thumbnail, when the album has one.
    #[serde(default)]
    pub thumb: Option<String>,
}

/// A member photo of an album.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlbumPhoto {
    pub photo_id: i64,
    pub blob_url: Option<String>,
}

/// A single album with its member photos.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDetail {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub album_photos: Vec<AlbumPhoto>,
}

/// Lists all albums.
pub async fn get_albums(client: &ApiClient) -> Result<Vec<Album>> {
    let response = client
        .send_authorized(|http, token| {
            http.get(client.endpoint("/Album")).bearer_auth(token)
        })
        .await
        .map_err(|f| f.into_error("Failed to load albums"))?;

    response
        .json::<Vec<Album>>()
        .await
        .map_err(|e| Error::Api(format!("Unexpected albums response: {}", e)))
}

/// Creates an album, optionally seeding it with photos.
pub async fn create_album(client: &ApiClient, name: &str, photo_ids: &[i64]) -> Result<()> {
    client
        .send_authorized(|http, token| {
            http.post(client.endpoint("/Album"))
                .query(&[("albumName", name)])
                .json(&photo_ids)
                .bearer_auth(token)
        })
        .await
        .map_err(|f| f.into_error("Failed to create album"))?;
    Ok(())
}

/// Deletes an album. Idempotent on the server side.
pub async fn delete_album(client: &ApiClient, album_id: i64) -> Result<()> {
    client
        .send_authorized(|http, token| {
            http.delete(client.endpoint(&format!("/Album/{}", album_id)))
                .bearer_auth(token)
        })
        .await
        .map_err(|f| f.into_error("Failed to delete album"))?;
    Ok(())
}

/// Fetches one album with its member photos.
pub async fn get_album(client: &ApiClient, album_id: i64) -> Result<AlbumDetail> {
    let response = client
        .send_authorized(|http, token| {
            http.get(client.endpoint(&format!("/AlbumPhotos/{}/photos", album_id)))
                .bearer_auth(token)
        })
        .await
        .map_err(|f| f.into_error("Failed to load album"))?;

    response
        .json::<AlbumDetail>()
        .await
        .map_err(|e| Error::Api(format!("Unexpected album response: {}", e)))
}

/// Adds one photo to an album.
pub async fn add_photo_to_album(client: &ApiClient, album_id: i64, photo_id: i64) -> Result<()> {
    client
        .send_authorized(|http, token| {
            http.post(client.endpoint(&format!(
                "/AlbumPhotos/{}/photos/{}",
                album_id, photo_id
            )))
            .bearer_auth(token)
        })
        .await
        .map_err(|f| f.into_error("Failed to add photo"))?;
    Ok(())
}

/// Adds a batch of photos to an album in one request.
pub async fn add_photos_to_album(
    client: &ApiClient,
    album_id: i64,
    photo_ids: &[i64],
) -> Result<()> {
    client
        .send_authorized(|http, token| {
            http.post(client.endpoint(&format!("/AlbumPhotos/{}/photos", album_id)))
                .json(&photo_ids)
                .bearer_auth(token)
        })
        .await
        .map_err(|f| f.into_error("Failed to add photos"))?;
    Ok(())
}

/// Removes one photo from an album.
pub async fn remove_photo_from_album(
    client: &ApiClient,
    album_id: i64,
    photo_id: i64,
) -> Result<()> {
    client
        .send_authorized(|http, token| {
            http.delete(client.endpoint(&format!(
                "/AlbumPhotos/{}/photos/{}",
                album_id, photo_id
            )))
            .bearer_auth(token)
        })
        .await
        .map_err(|f| f.into_error("Failed to remove photo"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_parses_with_and_without_thumb() {
        let with: Album = serde_json::from_str(
            r#"{"id":1,"name":"Trips","count":12,"thumb":"https://blobs.example.com/t.png"}"#,
        )
        .expect("parse");
        assert_eq!(with.thumb.as_deref(), Some("https://blobs.example.com/t.png"));

        let without: Album =
            serde_json::from_str(r#"{"id":2,"name":"Empty","count":0}"#).expect("parse");
        assert_eq!(without.thumb, None);
    }

    #[test]
    fn album_detail_parses_member_photos() {
        let detail: AlbumDetail = serde_json::from_str(
            r#"{"id":3,"title":"Trips","albumPhotos":[
                {"photoId":5,"blobUrl":"https://blobs.example.com/5.png"},
                {"photoId":6,"blobUrl":null}
            ]}"#,
        )
        .expect("parse");
        assert_eq!(detail.album_photos.len(), 2);
        assert_eq!(detail.album_photos[0].photo_id, 5);
        assert_eq!(detail.album_photos[1].blob_url, None);
    }

    #[test]
    fn album_detail_tolerates_missing_photo_list() {
        let detail: AlbumDetail =
            serde_json::from_str(r#"{"id":3,"title":"Trips"}"#).expect("parse");
        assert!(detail.album_photos.is_empty());
    }
}
