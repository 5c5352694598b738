// SPDX-License-Identifier: MPL-2.0
//! Authentication session storage.
//!
//! Holds the access/refresh token pair and the signed-in username with the
//! same lifetimes the service hands out: a short-lived access token and a
//! week-long refresh token. The session is persisted to a `session.toml`
//! state file in the data directory so a restart within the refresh window
//! keeps the user signed in. Expired entries read back as absent.

use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = "session.toml";
const APP_NAME: &str = "LazyPhotos";

/// Lifetime of an access token (~15 minutes).
const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 15;
/// Lifetime of the refresh token and remembered username (~7 days).
const REFRESH_TOKEN_TTL_SECS: i64 = 60 * 60 * 24 * 7;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn new(value: String, ttl_secs: i64) -> Self {
        Self {
            value,
            expires_at: Utc::now() + Duration::seconds(ttl_secs),
        }
    }

    fn value_at(&self, now: DateTime<Utc>) -> Option<&str> {
        (now < self.expires_at).then_some(self.value.as_str())
    }
}

/// The stored authentication session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    access_token: Option<Entry>,
    refresh_token: Option<Entry>,
    username: Option<Entry>,
}

impl Session {
    /// Replaces the session after a successful login or token refresh.
    pub fn set(&mut self, access_token: String, refresh_token: String, username: String) {
        self.access_token = Some(Entry::new(access_token, ACCESS_TOKEN_TTL_SECS));
        self.refresh_token = Some(Entry::new(refresh_token, REFRESH_TOKEN_TTL_SECS));
        self.username = Some(Entry::new(username, REFRESH_TOKEN_TTL_SECS));
    }

    /// Replaces only the token pair, keeping the remembered username.
    pub fn set_tokens(&mut self, access_token: String, refresh_token: String) {
        self.access_token = Some(Entry::new(access_token, ACCESS_TOKEN_TTL_SECS));
        self.refresh_token = Some(Entry::new(refresh_token, REFRESH_TOKEN_TTL_SECS));
    }

    /// Clears everything (logout).
    pub fn clear(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
        self.username = None;
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token_at(Utc::now())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token
            .as_ref()
            .and_then(|e| e.value_at(Utc::now()))
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_ref().and_then(|e| e.value_at(Utc::now()))
    }

    /// Whether a user is signed in (a live username entry exists).
    pub fn is_authenticated(&self) -> bool {
        self.username().is_some()
    }

    fn access_token_at(&self, now: DateTime<Utc>) -> Option<&str> {
        self.access_token.as_ref().and_then(|e| e.value_at(now))
    }
}

fn get_default_session_path() -> Option<PathBuf> {
    dirs::data_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(SESSION_FILE);
        path
    })
}

/// Loads the persisted session, or an empty one when none exists.
pub fn load() -> Session {
    if let Some(path) = get_default_session_path() {
        if path.exists() {
            return load_from_path(&path).unwrap_or_default();
        }
    }
    Session::default()
}

/// Persists the session. Failures are reported but not fatal.
pub fn save(session: &Session) {
    if let Some(path) = get_default_session_path() {
        if let Err(error) = save_to_path(session, &path) {
            eprintln!("Failed to save session: {:?}", error);
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<Session> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(session: &Session, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(session)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_session_is_not_authenticated() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert_eq!(session.access_token(), None);
        assert_eq!(session.refresh_token(), None);
    }

    #[test]
    fn set_stores_all_entries() {
        let mut session = Session::default();
        session.set("access".into(), "refresh".into(), "ada".into());

        assert_eq!(session.access_token(), Some("access"));
        assert_eq!(session.refresh_token(), Some("refresh"));
        assert_eq!(session.username(), Some("ada"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn clear_removes_everything() {
        let mut session = Session::default();
        session.set("access".into(), "refresh".into(), "ada".into());
        session.clear();

        assert!(!session.is_authenticated());
        assert_eq!(session.access_token(), None);
    }

    #[test]
    fn expired_access_token_reads_back_as_absent() {
        let mut session = Session::default();
        session.set("access".into(), "refresh".into(), "ada".into());

        let past_access_expiry = Utc::now() + Duration::seconds(ACCESS_TOKEN_TTL_SECS + 1);
        assert_eq!(session.access_token_at(past_access_expiry), None);
        // The week-long refresh token is still live at that point.
        assert_eq!(session.refresh_token(), Some("refresh"));
    }

    #[test]
    fn set_tokens_keeps_username() {
        let mut session = Session::default();
        session.set("access".into(), "refresh".into(), "ada".into());
        session.set_tokens("access2".into(), "refresh2".into());

        assert_eq!(session.access_token(), Some("access2"));
        assert_eq!(session.refresh_token(), Some("refresh2"));
        assert_eq!(session.username(), Some("ada"));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("session.toml");

        let mut session = Session::default();
        session.set("access".into(), "refresh".into(), "ada".into());
        save_to_path(&session, &path).expect("save failed");

        let loaded = load_from_path(&path).expect("load failed");
        assert_eq!(loaded, session);
    }

    #[test]
    fn malformed_file_loads_as_empty_session() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("session.toml");
        fs::write(&path, "not = [valid").expect("write failed");

        let loaded = load_from_path(&path).expect("load failed");
        assert!(!loaded.is_authenticated());
    }
}
