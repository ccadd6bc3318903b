//! Maintenance location entities.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by location constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationValidationError {
    /// Identifier was empty or surrounded by whitespace.
    #[error("location id must be a non-empty trimmed string")]
    InvalidId,
    /// Name was missing or blank once trimmed.
    #[error("location name must not be empty")]
    EmptyName,
}

/// Stable location identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationId(String);

impl LocationId {
    /// Validate and construct a [`LocationId`].
    pub fn new(id: impl Into<String>) -> Result<Self, LocationValidationError> {
        let raw = id.into();
        if raw.is_empty() || raw.trim() != raw {
            return Err(LocationValidationError::InvalidId);
        }
        Ok(Self(raw))
    }

    /// Generate a new random [`LocationId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for LocationId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LocationId> for String {
    fn from(value: LocationId) -> Self {
        value.0
    }
}

impl TryFrom<String> for LocationId {
    type Error = LocationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A maintenance site reports can reference.
///
/// ## Invariants
/// - `id` is unique within the store.
/// - `name` is non-empty.
/// - Deletion is refused while any report references the location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    id: LocationId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Location {
    /// Fallible constructor enforcing the field invariants.
    pub fn try_new(
        id: LocationId,
        name: impl Into<String>,
        description: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, LocationValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LocationValidationError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            description,
            created_at: now,
            updated_at: now,
        })
    }

    /// Build a location from a creation payload with a freshly generated id.
    pub fn from_draft(
        draft: NewLocation,
        now: DateTime<Utc>,
    ) -> Result<Self, LocationValidationError> {
        Self::try_new(LocationId::random(), draft.name, draft.description, now)
    }

    /// Merge a partial update and refresh the update timestamp.
    pub fn apply(&mut self, patch: LocationPatch, now: DateTime<Utc>) {
        let LocationPatch { name, description } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = Some(description);
        }
        self.updated_at = now;
    }

    /// Stable location identifier.
    pub fn id(&self) -> &LocationId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Optional free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
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

/// Creation payload for [`Location`].
#[derive(Debug, Clone)]
pub struct NewLocation {
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
}

/// Partial update for [`Location`]; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct LocationPatch {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
}
