//! User directory entities: identifiers, roles, and account records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Validation errors returned by user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier was empty or surrounded by whitespace.
    #[error("user id must be a non-empty trimmed string")]
    InvalidId,
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Login name was missing or blank once trimmed.
    #[error("login name must not be empty")]
    EmptyName,
    /// Display full name was missing or blank once trimmed.
    #[error("full name must not be empty")]
    EmptyFullName,
    /// Badge number was missing or blank once trimmed.
    #[error("badge number must not be empty")]
    EmptyBadgeNumber,
}

/// Stable user identifier.
///
/// Seed fixtures carry human-readable ids, so the identifier is a validated
/// string rather than a raw UUID; generated ids use UUID v4 text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = id.into();
        if raw.is_empty() || raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(raw))
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Authorization role attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages users, locations, and all submitted reports.
    Admin,
    /// Submits and reviews their own reports.
    Technician,
}

/// Error returned when parsing a [`Role`] from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseRoleError;

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("admin"),
            Self::Technician => f.write_str("technician"),
        }
    }
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid role")
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "technician" => Ok(Self::Technician),
            _ => Err(ParseRoleError),
        }
    }
}

/// A directory account.
///
/// ## Invariants
/// - `id` is unique within the store and immutable after creation.
/// - `email`, `name`, `full_name`, and `badge_number` are non-empty.
/// - `role` decides the authorization scope applied by the access guards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    email: String,
    name: String,
    full_name: String,
    badge_number: String,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Fallible constructor enforcing the field invariants.
    pub fn try_new(
        id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
        full_name: impl Into<String>,
        badge_number: impl Into<String>,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        let full_name = full_name.into();
        if full_name.trim().is_empty() {
            return Err(UserValidationError::EmptyFullName);
        }
        let badge_number = badge_number.into();
        if badge_number.trim().is_empty() {
            return Err(UserValidationError::EmptyBadgeNumber);
        }
        Ok(Self {
            id,
            email,
            name,
            full_name,
            badge_number,
            role,
            created_at: now,
            updated_at: now,
        })
    }

    /// Build a user from a creation payload with a freshly generated id.
    ///
    /// The optional password is dropped here: the mock store never persists
    /// credentials for accounts created at runtime.
    pub fn from_draft(draft: NewUser, now: DateTime<Utc>) -> Result<Self, UserValidationError> {
        let NewUser {
            email,
            name,
            full_name,
            badge_number,
            role,
            password: _,
        } = draft;
        Self::try_new(
            UserId::random(),
            email,
            name,
            full_name,
            badge_number,
            role,
            now,
        )
    }

    /// Merge a partial update and refresh the update timestamp.
    pub fn apply(&mut self, patch: UserPatch, now: DateTime<Utc>) {
        let UserPatch {
            email,
            name,
            full_name,
            badge_number,
            role,
        } = patch;
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(full_name) = full_name {
            self.full_name = full_name;
        }
        if let Some(badge_number) = badge_number {
            self.badge_number = badge_number;
        }
        if let Some(role) = role {
            self.role = role;
        }
        self.updated_at = now;
    }

    /// Stable account identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Email address used for sign-in.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Short login name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Display full name.
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Badge number shown alongside the name.
    pub fn badge_number(&self) -> &str {
        self.badge_number.as_str()
    }

    /// Authorization role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the most recent mutation.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Creation payload for [`User`].
///
/// Carries the sign-up password only in flight; the store strips it before
/// the record is kept.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address used for sign-in.
    pub email: String,
    /// Short login name.
    pub name: String,
    /// Display full name.
    pub full_name: String,
    /// Badge number shown alongside the name.
    pub badge_number: String,
    /// Authorization role.
    pub role: Role,
    /// Optional sign-up password, zeroized on drop.
    pub password: Option<Zeroizing<String>>,
}

/// Partial update for [`User`]; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    /// Replacement email address.
    pub email: Option<String>,
    /// Replacement login name.
    pub name: Option<String>,
    /// Replacement full name.
    pub full_name: Option<String>,
    /// Replacement badge number.
    pub badge_number: Option<String>,
    /// Replacement role.
    pub role: Option<Role>,
}
