// SPDX-License-Identifier: MPL-2.0
//! Photo endpoints: listing and single-file upload.
//!
//! A photo upload is a multipart `POST /Photo` whose body is streamed in
//! chunks; each chunk handed to the transport reports the cumulative byte
//! count through a channel, which this module converts into 0-100 percent
//! callbacks. The service has answered uploads with more than one response
//! shape over time, so the uploaded-photo identifier is normalized through
//! a single tagged union, trying each known shape in order.

use super::{check_status, is_expired_token, ApiClient, ApiFailure};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use futures_util::stream;
use serde::Deserialize;
use tokio::sync::mpsc;

const UPLOAD_FALLBACK: &str = "Failed to upload photo";

/// Bytes handed to the transport per body chunk.
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Capture metadata the service stores alongside each photo.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoMetadata {
    pub camera_model: String,
    pub aperture: String,
    pub shutter_time: String,
    pub focus_range: f64,
    pub iso_count: i64,
}

/// A stored photo as returned by the listing endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: i64,
    pub display_file_name: Option<String>,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub blob_id: String,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub photo_metadata: PhotoMetadata,
}

impl Photo {
    /// URL to show in grid cells: the thumbnail when the service produced
    /// one, else the full photo.
    pub fn grid_url(&self) -> Option<&str> {
        self.thumbnail_url
            .as_deref()
            .or(self.photo_url.as_deref())
    }
}

/// A file selected for upload, fully read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    fn mime(&self) -> &'static str {
        match self.name.rsplit('.').next().map(str::to_ascii_lowercase) {
            Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
            Some(ext) if ext == "png" => "image/png",
            Some(ext) if ext == "gif" => "image/gif",
            Some(ext) if ext == "webp" => "image/webp",
            Some(ext) if ext == "bmp" => "image/bmp",
            _ => "application/octet-stream",
        }
    }
}

/// The known response shapes for an uploaded-photo identifier, tried in
/// declaration order. Numeric strings coerce to numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UploadResponse {
    Id {
        #[serde(deserialize_with = "coerce_i64")]
        id: i64,
    },
    PhotoId {
        #[serde(rename = "photoId", deserialize_with = "coerce_i64")]
        photo_id: i64,
    },
    Bare(#[serde(deserialize_with = "coerce_i64")] i64),
}

impl UploadResponse {
    fn into_id(self) -> i64 {
        match self {
            UploadResponse::Id { id } => id,
            UploadResponse::PhotoId { photo_id } => photo_id,
            UploadResponse::Bare(id) => id,
        }
    }
}

fn coerce_i64<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error as _;

    let value = serde_json::Value::deserialize(deserializer)?;
    match &value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| D::Error::custom("identifier is not an integer")),
        serde_json::Value::String(s) => s
            .parse::<i64>()
            .map_err(|_| D::Error::custom("identifier string is not numeric")),
        _ => Err(D::Error::custom("identifier has an unsupported type")),
    }
}

/// Normalizes an upload response payload to the photo identifier.
pub fn photo_id_from_response(value: serde_json::Value) -> Result<i64> {
    serde_json::from_value::<UploadResponse>(value)
        .map(UploadResponse::into_id)
        .map_err(|_| Error::Api("Unrecognized upload response".to_string()))
}

/// Converts a cumulative byte count into a whole percent.
fn transfer_percent(loaded: u64, total: u64) -> u8 {
    ((loaded as f64 / total as f64) * 100.0).round() as u8
}

/// Lists the newest photos, `page_size` at a time.
pub async fn latest_photos(client: &ApiClient, offset: u32, page_size: u32) -> Result<Vec<Photo>> {
    let response = client
        .send_authorized(|http, token| {
            http.get(client.endpoint("/Photo"))
                .query(&[("offset", offset), ("pageSize", page_size)])
                .bearer_auth(token)
        })
        .await
        .map_err(|f| f.into_error("Failed to load photos"))?;

    response
        .json::<Vec<Photo>>()
        .await
        .map_err(|e| Error::Api(format!("Unexpected photos response: {}", e)))
}

/// Uploads one photo, reporting its own 0-100 percent as bytes go out.
///
/// Progress events only fire while the body size is known (it always is for
/// an in-memory file, except the degenerate empty file, which reports
/// nothing and jumps straight to completion).
pub async fn upload_photo(
    client: &ApiClient,
    file: &UploadFile,
    mut on_progress: impl FnMut(u8) + Send,
) -> Result<i64> {
    let token = client.access_token();
    match upload_attempt(client, file, &token, &mut on_progress).await {
        Ok(id) => Ok(id),
        Err(failure) if is_expired_token(&failure) => {
            client.refresh_session().await?;
            let token = client.access_token();
            upload_attempt(client, file, &token, &mut on_progress)
                .await
                .map_err(|f| f.into_error(UPLOAD_FALLBACK))
        }
        Err(failure) => Err(failure.into_error(UPLOAD_FALLBACK)),
    }
}

/// One multipart POST of the file, with progress bridged from the body
/// stream. The whole attempt is retried by the caller on an expired token,
/// rebuilding the form from the in-memory bytes.
async fn upload_attempt(
    client: &ApiClient,
    file: &UploadFile,
    token: &str,
    on_progress: &mut (impl FnMut(u8) + Send),
) -> std::result::Result<i64, ApiFailure> {
    let total = file.bytes.len() as u64;
    let (tx, mut rx) = mpsc::unbounded_channel::<u64>();

    let part = reqwest::multipart::Part::stream_with_length(progress_body(file.bytes.clone(), tx), total)
        .file_name(file.name.clone())
        .mime_str(file.mime())
        .map_err(|e| ApiFailure::Network(e.to_string()))?;
    let form = reqwest::multipart::Form::new().part("file", part);

    let request = client
        .http()
        .post(client.endpoint("/Photo"))
        .bearer_auth(token)
        .multipart(form)
        .send();
    tokio::pin!(request);

    // Drive the request while draining byte counts as the transport pulls
    // body chunks.
    let response = loop {
        tokio::select! {
            sent = rx.recv() => match sent {
                Some(loaded) if total > 0 => on_progress(transfer_percent(loaded, total)),
                Some(_) => {}
                None => break (&mut request).await,
            },
            result = &mut request => break result,
        }
    };
    let response = response.map_err(|e| ApiFailure::Network(e.to_string()))?;

    // Counts that raced with the response still belong to this file.
    while let Ok(loaded) = rx.try_recv() {
        if total > 0 {
            on_progress(transfer_percent(loaded, total));
        }
    }

    let response = check_status(response).await?;
    let value = response
        .json::<serde_json::Value>()
        .await
        .map_err(|e| ApiFailure::Network(e.to_string()))?;
    photo_id_from_response(value).map_err(|e| ApiFailure::Network(e.to_string()))
}

/// Wraps the file bytes as a chunked request body that reports the
/// cumulative byte count after each chunk is handed to the transport.
fn progress_body(bytes: Vec<u8>, tx: mpsc::UnboundedSender<u64>) -> reqwest::Body {
    reqwest::Body::wrap_stream(chunk_stream(bytes, tx))
}

fn chunk_stream(
    bytes: Vec<u8>,
    tx: mpsc::UnboundedSender<u64>,
) -> impl futures_util::Stream<Item = std::result::Result<Vec<u8>, std::io::Error>> + Send {
    stream::unfold((bytes, 0usize, tx), |(bytes, offset, tx)| async move {
        if offset >= bytes.len() {
            return None;
        }
        let end = (offset + UPLOAD_CHUNK_SIZE).min(bytes.len());
        let chunk = bytes[offset..end].to_vec();
        let _ = tx.send(end as u64);
        Some((Ok(chunk), (bytes, end, tx)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[test]
    fn photo_parses_listing_payload() {
        let payload = serde_json::json!({
            "id": 7,
            "displayFileName": "no-signal.png",
            "photoUrl": "https://blobs.example.com/photos/a/b.png",
            "blobId": "0ae3bc43-bbf7-402c-a0bd-a08037fe821e",
            "userId": "46ebce29-7465-4967-b2c6-07963943ca3e",
            "createdAt": "2024-09-18T14:02:53.1166667+00:00",
            "photoMetadata": {
                "cameraModel": "Camera Model Here",
                "aperture": "f/1.8",
                "shutterTime": "1/50",
                "focusRange": 28,
                "isoCount": 400
            }
        });
        let photo: Photo = serde_json::from_value(payload).expect("parse");
        assert_eq!(photo.id, 7);
        assert_eq!(photo.display_file_name.as_deref(), Some("no-signal.png"));
        assert_eq!(photo.thumbnail_url, None);
        assert_eq!(photo.photo_metadata.iso_count, 400);
    }

    #[test]
    fn grid_url_prefers_thumbnail() {
        let payload = serde_json::json!({
            "id": 1,
            "displayFileName": null,
            "photoUrl": "https://blobs.example.com/full.png",
            "thumbnailUrl": "https://blobs.example.com/thumb.png",
            "blobId": "b",
            "userId": null,
            "createdAt": "2024-01-01T00:00:00+00:00",
            "photoMetadata": {
                "cameraModel": "", "aperture": "", "shutterTime": "",
                "focusRange": 0, "isoCount": 0
            }
        });
        let photo: Photo = serde_json::from_value(payload).expect("parse");
        assert_eq!(photo.grid_url(), Some("https://blobs.example.com/thumb.png"));
    }

    #[test]
    fn upload_response_normalizes_id_field() {
        let id = photo_id_from_response(serde_json::json!({"id": 5})).expect("normalize");
        assert_eq!(id, 5);
    }

    #[test]
    fn upload_response_normalizes_photo_id_field() {
        let id = photo_id_from_response(serde_json::json!({"photoId": 7})).expect("normalize");
        assert_eq!(id, 7);
    }

    #[test]
    fn upload_response_normalizes_bare_number() {
        let id = photo_id_from_response(serde_json::json!(3)).expect("normalize");
        assert_eq!(id, 3);
    }

    #[test]
    fn upload_response_coerces_numeric_strings() {
        let id = photo_id_from_response(serde_json::json!({"id": "12"})).expect("normalize");
        assert_eq!(id, 12);
    }

    #[test]
    fn upload_response_rejects_unknown_shapes() {
        let err = photo_id_from_response(serde_json::json!({"uuid": "abc"})).unwrap_err();
        assert_eq!(
            err,
            crate::error::Error::Api("Unrecognized upload response".to_string())
        );
        assert!(photo_id_from_response(serde_json::json!({"id": "abc"})).is_err());
        assert!(photo_id_from_response(serde_json::json!(["nope"])).is_err());
    }

    #[test]
    fn transfer_percent_rounds_to_whole_numbers() {
        assert_eq!(transfer_percent(0, 200), 0);
        assert_eq!(transfer_percent(1, 200), 1); // 0.5% rounds up
        assert_eq!(transfer_percent(100, 200), 50);
        assert_eq!(transfer_percent(200, 200), 100);
    }

    #[test]
    fn mime_guessed_from_extension() {
        assert_eq!(UploadFile::new("a.JPG", vec![]).mime(), "image/jpeg");
        assert_eq!(UploadFile::new("b.png", vec![]).mime(), "image/png");
        assert_eq!(UploadFile::new("weird", vec![]).mime(), "application/octet-stream");
    }

    #[tokio::test]
    async fn chunk_stream_reports_cumulative_counts() {
        let bytes = vec![0u8; UPLOAD_CHUNK_SIZE + 10];
        let (tx, mut rx) = mpsc::unbounded_channel();

        let collected: Vec<_> = chunk_stream(bytes, tx).collect().await;
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].as_ref().map(Vec::len).ok(), Some(UPLOAD_CHUNK_SIZE));
        assert_eq!(collected[1].as_ref().map(Vec::len).ok(), Some(10));

        assert_eq!(rx.try_recv().ok(), Some(UPLOAD_CHUNK_SIZE as u64));
        assert_eq!(rx.try_recv().ok(), Some((UPLOAD_CHUNK_SIZE + 10) as u64));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn chunk_stream_of_empty_file_yields_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let collected: Vec<_> = chunk_stream(Vec::new(), tx).collect().await;
        assert!(collected.is_empty());
        assert!(rx.try_recv().is_err());
    }
}
