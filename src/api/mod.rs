// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the Lazy Photos API.
//!
//! `ApiClient` wraps a `reqwest::Client`, the configured base URL, and the
//! shared authentication session. Endpoint groups live in submodules
//! (`auth`, `photos`, `albums`); this module owns the request plumbing they
//! share: bearer-token injection, expired-token refresh-and-retry, and the
//! mapping of error response bodies to user-facing messages.

pub mod albums;
pub mod auth;
pub mod photos;

use crate::error::{Error, Result};
use crate::session::{self, Session};
use reqwest::StatusCode;
use std::sync::{Arc, RwLock};

const USER_AGENT: &str = "LazyPhotos/0.1.0";

/// Shared handle to the authentication session.
///
/// Guarded by a synchronous lock; guards are only held for field access,
/// never across an await point.
pub type SharedSession = Arc<RwLock<Session>>;

/// Creates a session handle for the application and its API client.
pub fn shared_session(session: Session) -> SharedSession {
    Arc::new(RwLock::new(session))
}

/// Client for the Lazy Photos API.
///
/// Cheap to clone; clones share the HTTP connection pool and session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SharedSession,
}

/// A failed request, before a per-operation fallback message is applied.
#[derive(Debug)]
pub(crate) enum ApiFailure {
    /// The server answered with a non-success status.
    Status { status: StatusCode, body: Vec<u8> },
    /// The request never produced a response.
    Network(String),
}

impl ApiFailure {
    /// Resolves the failure to a user-facing error, preferring the
    /// server-provided message over the operation's fallback.
    pub(crate) fn into_error(self, fallback: &str) -> Error {
        match self {
            ApiFailure::Status { body, .. } => Error::Api(error_message(&body, fallback)),
            ApiFailure::Network(detail) => Error::Api(detail),
        }
    }
}

/// Extracts the most specific message from an error response body.
///
/// Tries the ASP.NET validation shape `{"errors": {field: [messages]}}`
/// first (first message of the first field), then `{"message": ...}`, then
/// falls back to the supplied default.
pub(crate) fn error_message(body: &[u8], fallback: &str) -> String {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
        return fallback.to_string();
    };

    if let Some(errors) = value.get("errors").and_then(|e| e.as_object()) {
        let first = errors
            .values()
            .next()
            .and_then(|msgs| msgs.as_array())
            .and_then(|msgs| msgs.first())
            .and_then(|msg| msg.as_str());
        if let Some(message) = first {
            return message.to_string();
        }
    }

    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

/// Whether a failure is the service's expired-access-token answer.
pub(crate) fn is_expired_token(failure: &ApiFailure) -> bool {
    match failure {
        ApiFailure::Status { status, body } => {
            *status == StatusCode::UNAUTHORIZED
                && serde_json::from_slice::<serde_json::Value>(body)
                    .ok()
                    .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
                    .as_deref()
                    == Some("expired")
        }
        ApiFailure::Network(_) => false,
    }
}

impl ApiClient {
    /// Builds a client for the given API base URL.
    pub fn new(base_url: &str, session: SharedSession) -> Result<Self> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Api(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn access_token(&self) -> String {
        self.session
            .read()
            .expect("session lock poisoned")
            .access_token()
            .unwrap_or_default()
            .to_string()
    }

    /// Sends an authorized request, refreshing the access token and retrying
    /// once when the service reports it as expired.
    ///
    /// `build` is called with the current access token for every attempt so
    /// the retry carries the refreshed credentials.
    pub(crate) async fn send_authorized(
        &self,
        build: impl Fn(&reqwest::Client, &str) -> reqwest::RequestBuilder,
    ) -> std::result::Result<reqwest::Response, ApiFailure> {
        let token = self.access_token();
        match self.send_checked(build(&self.http, &token)).await {
            Ok(response) => Ok(response),
            Err(failure) if is_expired_token(&failure) => {
                self.refresh_session().await.map_err(|e| match e {
                    Error::Api(message) => ApiFailure::Network(message),
                    other => ApiFailure::Network(other.to_string()),
                })?;
                let token = self.access_token();
                self.send_checked(build(&self.http, &token)).await
            }
            Err(failure) => Err(failure),
        }
    }

    /// Sends a request and folds non-success statuses into `ApiFailure`.
    pub(crate) async fn send_checked(
        &self,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<reqwest::Response, ApiFailure> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiFailure::Network(e.to_string()))?;
        check_status(response).await
    }

    /// Exchanges the refresh token for a new token pair and stores it.
    pub(crate) async fn refresh_session(&self) -> Result<()> {
        let refresh_token = self
            .session
            .read()
            .expect("session lock poisoned")
            .refresh_token()
            .map(str::to_string)
            .ok_or_else(|| Error::Api("Failed to refresh token".to_string()))?;

        let tokens = auth::refresh_access_token(self, &refresh_token).await?;

        let mut session = self.session.write().expect("session lock poisoned");
        session.set_tokens(
            tokens.access_token,
            tokens.refresh_token.unwrap_or(refresh_token),
        );
        session::save(&session);
        Ok(())
    }

    /// Fetches raw bytes from an absolute URL (photo and thumbnail blobs).
    ///
    /// Blob URLs are pre-authorized by the service, so no bearer token is
    /// attached.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .send_checked(self.http.get(url))
            .await
            .map_err(|f| f.into_error("Failed to load photo"))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Api(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Folds a non-success response into `ApiFailure`, reading its body for the
/// error-message extraction.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> std::result::Result<reqwest::Response, ApiFailure> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.bytes().await.unwrap_or_default().to_vec();
        Err(ApiFailure::Status { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_first_validation_error() {
        let body = br#"{"errors":{"Email":["Email is invalid","Email too long"],"Password":["Too short"]},"message":"Validation failed"}"#;
        assert_eq!(error_message(body, "Failed to register"), "Email is invalid");
    }

    #[test]
    fn error_message_falls_back_to_message_field() {
        let body = br#"{"message":"boom"}"#;
        assert_eq!(error_message(body, "Failed to load photos"), "boom");
    }

    #[test]
    fn error_message_uses_fallback_for_opaque_bodies() {
        assert_eq!(
            error_message(b"<html>502</html>", "Failed to load photos"),
            "Failed to load photos"
        );
        assert_eq!(error_message(b"", "Failed to upload photo"), "Failed to upload photo");
    }

    #[test]
    fn expired_token_requires_401_and_expired_message() {
        let expired = ApiFailure::Status {
            status: StatusCode::UNAUTHORIZED,
            body: br#"{"message":"expired"}"#.to_vec(),
        };
        assert!(is_expired_token(&expired));

        let plain_unauthorized = ApiFailure::Status {
            status: StatusCode::UNAUTHORIZED,
            body: br#"{"message":"bad credentials"}"#.to_vec(),
        };
        assert!(!is_expired_token(&plain_unauthorized));

        let wrong_status = ApiFailure::Status {
            status: StatusCode::FORBIDDEN,
            body: br#"{"message":"expired"}"#.to_vec(),
        };
        assert!(!is_expired_token(&wrong_status));

        assert!(!is_expired_token(&ApiFailure::Network("offline".into())));
    }

    #[test]
    fn status_failure_resolves_to_server_message() {
        let failure = ApiFailure::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: br#"{"message":"quota exceeded"}"#.to_vec(),
        };
        assert_eq!(
            failure.into_error("Failed to upload photo"),
            Error::Api("quota exceeded".to_string())
        );
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let session = shared_session(Session::default());
        let client = ApiClient::new("https://api.example.com/", session).expect("client");
        assert_eq!(client.endpoint("/Photo"), "https://api.example.com/Photo");
    }
}
