//! Ports the domain store drives.
//!
//! Ports describe how the store expects to interact with driven adapters
//! (the durable session record and the user-facing notification sink).
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants. Durable session access is synchronous and
//! local; the store never awaits while a record is being read or written.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use super::user::User;

/// Errors surfaced by durable session record adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionStoreError {
    /// The record could not be read from its backing store.
    #[error("session record read failed: {message}")]
    Read { message: String },
    /// The record could not be written or cleared.
    #[error("session record write failed: {message}")]
    Write { message: String },
}

impl SessionStoreError {
    /// Helper for read failures.
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read {
            message: message.into(),
        }
    }

    /// Helper for write failures.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }
}

/// Durable storage for the single session record.
///
/// Presence of a record is the sole authentication signal across restarts.
/// Adapters must treat malformed content as absent and clear it rather than
/// erroring.
pub trait SessionStore: Send + Sync {
    /// Load the persisted session user, if any.
    fn load(&self) -> Result<Option<User>, SessionStoreError>;

    /// Persist the session user, replacing any previous record.
    fn save(&self, user: &User) -> Result<(), SessionStoreError>;

    /// Remove the record; succeeds when no record exists.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// Weight of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational outcome.
    Info,
    /// Failure the user should notice.
    Alert,
}

/// A user-facing notification describing an operation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    severity: Severity,
    title: String,
    body: String,
}

impl Notice {
    /// Informational notice for a successful operation.
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Alerting notice for a failed or refused operation.
    pub fn alert(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            severity: Severity::Alert,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Notification weight.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Short headline.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Descriptive body.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }
}

/// Sink for user-facing notifications emitted by store operations.
pub trait Notifier: Send + Sync {
    /// Deliver one notification.
    fn notify(&self, notice: Notice);
}

/// In-memory session record used by tests and examples.
#[derive(Debug, Default)]
pub struct FixtureSessionStore {
    record: Mutex<Option<User>>,
}

impl FixtureSessionStore {
    /// Current record contents.
    pub fn stored(&self) -> Option<User> {
        self.lock_record().clone()
    }

    fn lock_record(&self) -> std::sync::MutexGuard<'_, Option<User>> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for FixtureSessionStore {
    fn load(&self) -> Result<Option<User>, SessionStoreError> {
        Ok(self.lock_record().clone())
    }

    fn save(&self, user: &User) -> Result<(), SessionStoreError> {
        *self.lock_record() = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.lock_record() = None;
        Ok(())
    }
}

/// Notifier that records every notice for later assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Snapshot of every delivered notice, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.lock_notices().clone()
    }

    /// The most recent notice, if any.
    pub fn last(&self) -> Option<Notice> {
        self.lock_notices().last().cloned()
    }

    fn lock_notices(&self) -> std::sync::MutexGuard<'_, Vec<Notice>> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.lock_notices().push(notice);
    }
}
