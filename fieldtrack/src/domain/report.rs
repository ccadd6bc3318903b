//! Field maintenance report entities.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::location::LocationId;
use super::user::UserId;

/// Validation errors returned by report constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportValidationError {
    /// Identifier was empty or surrounded by whitespace.
    #[error("report id must be a non-empty trimmed string")]
    InvalidId,
    /// Unit identifier was missing or blank once trimmed.
    #[error("unit id must not be empty")]
    EmptyUnitId,
    /// Device identifier was missing or blank once trimmed.
    #[error("device id must not be empty")]
    EmptyDeviceId,
    /// Card number was missing or blank once trimmed.
    #[error("card number must not be empty")]
    EmptyCardNumber,
}

/// Stable report identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportId(String);

impl ReportId {
    /// Validate and construct a [`ReportId`].
    pub fn new(id: impl Into<String>) -> Result<Self, ReportValidationError> {
        let raw = id.into();
        if raw.is_empty() || raw.trim() != raw {
            return Err(ReportValidationError::InvalidId);
        }
        Ok(Self(raw))
    }

    /// Generate a new random [`ReportId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Leading eight characters, used by notification bodies.
    pub fn short(&self) -> String {
        self.0.chars().take(8).collect()
    }
}

impl AsRef<str> for ReportId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ReportId> for String {
    fn from(value: ReportId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ReportId {
    type Error = ReportValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Review status of a submitted report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Submitted and awaiting admin review.
    Pending,
    /// Accepted by an admin.
    Completed,
    /// Refused by an admin.
    Rejected,
}

impl ReportStatus {
    /// Canonical lowercase form, matching the serialized representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }
}

/// Error returned when parsing a [`ReportStatus`] from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseReportStatusError;

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ParseReportStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid report status")
    }
}

impl std::error::Error for ParseReportStatusError {}

impl FromStr for ReportStatus {
    type Err = ParseReportStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseReportStatusError),
        }
    }
}

/// A submitted field maintenance report.
///
/// ## Invariants
/// - `id` is unique within the store.
/// - `technician_name`, `badge_number`, and `location_name` are snapshots
///   taken at submission time; later directory edits do not rewrite them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    id: ReportId,
    technician_id: UserId,
    technician_name: String,
    badge_number: String,
    unit_id: String,
    location_id: LocationId,
    location_name: String,
    device_id: String,
    card_number: String,
    status: ReportStatus,
    date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Report {
    /// Build a report from a submission payload with a freshly generated id.
    pub fn from_draft(draft: NewReport, now: DateTime<Utc>) -> Result<Self, ReportValidationError> {
        Self::try_new(ReportId::random(), draft, now)
    }

    /// Fallible constructor with an explicit id, used when seeding.
    pub fn try_new(
        id: ReportId,
        draft: NewReport,
        now: DateTime<Utc>,
    ) -> Result<Self, ReportValidationError> {
        if draft.unit_id.trim().is_empty() {
            return Err(ReportValidationError::EmptyUnitId);
        }
        if draft.device_id.trim().is_empty() {
            return Err(ReportValidationError::EmptyDeviceId);
        }
        if draft.card_number.trim().is_empty() {
            return Err(ReportValidationError::EmptyCardNumber);
        }
        Ok(Self {
            id,
            technician_id: draft.technician_id,
            technician_name: draft.technician_name,
            badge_number: draft.badge_number,
            unit_id: draft.unit_id,
            location_id: draft.location_id,
            location_name: draft.location_name,
            device_id: draft.device_id,
            card_number: draft.card_number,
            status: draft.status,
            date: draft.date,
            description: draft.description,
            images: draft.images,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge a partial update and refresh the update timestamp.
    pub fn apply(&mut self, patch: ReportPatch, now: DateTime<Utc>) {
        let ReportPatch {
            unit_id,
            location_id,
            location_name,
            device_id,
            card_number,
            status,
            date,
            description,
            images,
            notes,
        } = patch;
        if let Some(unit_id) = unit_id {
            self.unit_id = unit_id;
        }
        if let Some(location_id) = location_id {
            self.location_id = location_id;
        }
        if let Some(location_name) = location_name {
            self.location_name = location_name;
        }
        if let Some(device_id) = device_id {
            self.device_id = device_id;
        }
        if let Some(card_number) = card_number {
            self.card_number = card_number;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(date) = date {
            self.date = date;
        }
        if let Some(description) = description {
            self.description = Some(description);
        }
        if let Some(images) = images {
            self.images = Some(images);
        }
        if let Some(notes) = notes {
            self.notes = Some(notes);
        }
        self.updated_at = now;
    }

    /// Overwrite the review status and refresh the update timestamp.
    pub fn set_status(&mut self, status: ReportStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }

    /// Stable report identifier.
    pub fn id(&self) -> &ReportId {
        &self.id
    }

    /// Submitting technician's account id.
    pub fn technician_id(&self) -> &UserId {
        &self.technician_id
    }

    /// Technician display name, snapshot from submission time.
    pub fn technician_name(&self) -> &str {
        self.technician_name.as_str()
    }

    /// Technician badge number, snapshot from submission time.
    pub fn badge_number(&self) -> &str {
        self.badge_number.as_str()
    }

    /// Serviced unit identifier.
    pub fn unit_id(&self) -> &str {
        self.unit_id.as_str()
    }

    /// Referenced location id.
    pub fn location_id(&self) -> &LocationId {
        &self.location_id
    }

    /// Location display name, snapshot from submission time.
    pub fn location_name(&self) -> &str {
        self.location_name.as_str()
    }

    /// Serviced device identifier.
    pub fn device_id(&self) -> &str {
        self.device_id.as_str()
    }

    /// Access card number recorded with the visit.
    pub fn card_number(&self) -> &str {
        self.card_number.as_str()
    }

    /// Current review status.
    pub fn status(&self) -> ReportStatus {
        self.status
    }

    /// Occurrence date of the reported work.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Optional work description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Optional image references.
    pub fn images(&self) -> Option<&[String]> {
        self.images.as_deref()
    }

    /// Optional reviewer-facing notes.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
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

/// Submission payload for [`Report`].
///
/// The technician submission flow always supplies
/// [`ReportStatus::Pending`]; the field is caller-controlled so seeding can
/// install reports in any state.
#[derive(Debug, Clone)]
pub struct NewReport {
    /// Submitting technician's account id.
    pub technician_id: UserId,
    /// Technician display name snapshot.
    pub technician_name: String,
    /// Technician badge number snapshot.
    pub badge_number: String,
    /// Serviced unit identifier.
    pub unit_id: String,
    /// Referenced location id.
    pub location_id: LocationId,
    /// Location display name snapshot.
    pub location_name: String,
    /// Serviced device identifier.
    pub device_id: String,
    /// Access card number recorded with the visit.
    pub card_number: String,
    /// Initial review status.
    pub status: ReportStatus,
    /// Occurrence date of the reported work.
    pub date: DateTime<Utc>,
    /// Optional work description.
    pub description: Option<String>,
    /// Optional image references.
    pub images: Option<Vec<String>>,
    /// Optional reviewer-facing notes.
    pub notes: Option<String>,
}

/// Partial update for [`Report`]; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ReportPatch {
    /// Replacement unit identifier.
    pub unit_id: Option<String>,
    /// Replacement location id.
    pub location_id: Option<LocationId>,
    /// Replacement location name snapshot.
    pub location_name: Option<String>,
    /// Replacement device identifier.
    pub device_id: Option<String>,
    /// Replacement card number.
    pub card_number: Option<String>,
    /// Replacement review status.
    pub status: Option<ReportStatus>,
    /// Replacement occurrence date.
    pub date: Option<DateTime<Utc>>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement image references.
    pub images: Option<Vec<String>>,
    /// Replacement notes.
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn fixture_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    pub(crate) fn fixture_draft() -> NewReport {
        NewReport {
            technician_id: UserId::new("test-tech-id").expect("valid id"),
            technician_name: "Hendra Abdi".to_owned(),
            badge_number: "T001".to_owned(),
            unit_id: "UNIT-001".to_owned(),
            location_id: LocationId::new("loc-jakarta").expect("valid id"),
            location_name: "Jakarta HQ".to_owned(),
            device_id: "DEV-001".to_owned(),
            card_number: "CARD-001".to_owned(),
            status: ReportStatus::Pending,
            date: fixture_now(),
            description: Some("Regular maintenance check completed".to_owned()),
            images: None,
            notes: Some("No issues found during inspection".to_owned()),
        }
    }

    #[rstest]
    #[case("pending", ReportStatus::Pending)]
    #[case("completed", ReportStatus::Completed)]
    #[case("rejected", ReportStatus::Rejected)]
    fn parses_statuses(#[case] raw: &str, #[case] expected: ReportStatus) {
        assert_eq!(raw.parse::<ReportStatus>().expect("valid status"), expected);
        assert_eq!(expected.as_str(), raw);
    }

    #[test]
    fn rejects_unknown_status() {
        assert!("archived".parse::<ReportStatus>().is_err());
    }

    #[test]
    fn rejects_blank_unit_id() {
        let mut draft = fixture_draft();
        draft.unit_id = " ".to_owned();
        let err = Report::from_draft(draft, fixture_now()).expect_err("blank unit must fail");
        assert_eq!(err, ReportValidationError::EmptyUnitId);
    }

    #[test]
    fn set_status_refreshes_update_timestamp() {
        let mut report =
            Report::from_draft(fixture_draft(), fixture_now()).expect("valid draft");
        let before = report.updated_at();
        let later = fixture_now() + chrono::TimeDelta::seconds(90);
        report.set_status(ReportStatus::Completed, later);
        assert_eq!(report.status(), ReportStatus::Completed);
        assert!(report.updated_at() > before);
    }

    #[test]
    fn short_id_is_eight_characters() {
        let id = ReportId::new("abcdefghij").expect("valid id");
        assert_eq!(id.short(), "abcdefgh");
    }
}
