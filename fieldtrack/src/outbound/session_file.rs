//! File-backed durable session record.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde_json::Value;
use tracing::warn;

use crate::domain::{SessionStore, SessionStoreError, User};

/// Key the session record is stored under inside the JSON document.
pub const SESSION_KEY: &str = "currentUser";

/// Session record persisted as a JSON file.
///
/// The document is an object with a single `"currentUser"` key holding the
/// serialized user. Malformed content is treated as absent and the file is
/// cleared, so a corrupted record can never wedge sign-in.
#[derive(Debug, Clone)]
pub struct JsonFileSessionStore {
    path: PathBuf,
}

impl JsonFileSessionStore {
    /// Create a store over the given file path; the file need not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &std::path::Path {
        self.path.as_path()
    }

    fn parse_record(&self, raw: &str) -> Option<User> {
        let document: Value = serde_json::from_str(raw).ok()?;
        let record = document.get(SESSION_KEY)?.clone();
        serde_json::from_value(record).ok()
    }
}

impl SessionStore for JsonFileSessionStore {
    fn load(&self) -> Result<Option<User>, SessionStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(SessionStoreError::read(err.to_string())),
        };
        match self.parse_record(&raw) {
            Some(user) => Ok(Some(user)),
            None => {
                warn!(path = %self.path.display(), "malformed session record, clearing");
                self.clear()?;
                Ok(None)
            }
        }
    }

    fn save(&self, user: &User) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|err| SessionStoreError::write(err.to_string()))?;
            }
        }
        let document = serde_json::json!({ SESSION_KEY: user });
        let raw = serde_json::to_string_pretty(&document)
            .map_err(|err| SessionStoreError::write(err.to_string()))?;
        fs::write(&self.path, raw).map_err(|err| SessionStoreError::write(err.to_string()))
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionStoreError::write(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Role, UserId};
    use chrono::TimeZone;

    fn fixture_user() -> User {
        User::try_new(
            UserId::new("test-admin-id").expect("valid id"),
            "wh135@whies.com",
            "wh135",
            "Admin User",
            "A001",
            Role::Admin,
            chrono::Utc
                .with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
                .single()
                .expect("valid fixture timestamp"),
        )
        .expect("valid fixture user")
    }

    fn store_in(dir: &tempfile::TempDir) -> JsonFileSessionStore {
        JsonFileSessionStore::new(dir.path().join("session.json"))
    }

    #[test]
    fn missing_file_means_no_session() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = store_in(&dir);
        assert_eq!(store.load().expect("load succeeds"), None);
    }

    #[test]
    fn record_round_trips_under_the_current_user_key() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = store_in(&dir);
        let user = fixture_user();
        store.save(&user).expect("save succeeds");

        let raw = fs::read_to_string(store.path()).expect("file exists");
        assert!(raw.contains("\"currentUser\""));
        assert!(raw.contains("\"badgeNumber\": \"A001\""));

        assert_eq!(store.load().expect("load succeeds"), Some(user));
    }

    #[test]
    fn malformed_record_is_treated_as_absent_and_cleared() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").expect("write succeeds");

        assert_eq!(store.load().expect("load succeeds"), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn record_without_the_key_is_treated_as_absent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = store_in(&dir);
        fs::write(store.path(), "{\"somethingElse\": 1}").expect("write succeeds");

        assert_eq!(store.load().expect("load succeeds"), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = store_in(&dir);
        store.clear().expect("clearing nothing succeeds");
        store.save(&fixture_user()).expect("save succeeds");
        store.clear().expect("clear succeeds");
        store.clear().expect("second clear succeeds");
        assert_eq!(store.load().expect("load succeeds"), None);
    }
}
