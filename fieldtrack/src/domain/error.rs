//! Domain-level error types.
//!
//! These errors are transport agnostic: the demo CLI, the notification
//! adapters, and the tests all branch on the stable [`ErrorCode`] rather
//! than on message text.

use std::fmt;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// A payload failed domain validation.
    InvalidRequest,
    /// Credentials did not match a known account.
    Unauthorized,
    /// The mutation target does not exist in its collection.
    NotFound,
    /// An unexpected failure inside a store operation.
    InternalError,
}

/// Domain error payload carried by every failing store operation.
///
/// Business-rule refusals (deleting your own account, removing a location
/// that reports still reference) are deliberately *not* errors; the store
/// reports those as `Ok(false)` so callers can branch without handling an
/// error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    /// Create a new error with an explicit code.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message suitable for a notification body.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

/// Convenient result alias for store operations.
pub type DomainResult<T> = Result<T, Error>;
