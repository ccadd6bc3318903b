//! Conversion of seed records into validated domain entities.
//!
//! The seed crate stays independent of domain types, so every record is
//! parsed and validated here before it reaches the store.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    Credential, CredentialSet, Location, LocationId, LocationValidationError, NewReport, Report,
    ReportId, ReportValidationError, Role, TrackerSeed, User, UserId, UserValidationError,
};

/// Errors raised while converting seed records.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A seed user failed domain validation.
    #[error("invalid seed user {id}: {source}")]
    User {
        /// Offending record id.
        id: String,
        /// Underlying validation failure.
        source: UserValidationError,
    },
    /// A seed location failed domain validation.
    #[error("invalid seed location {id}: {source}")]
    Location {
        /// Offending record id.
        id: String,
        /// Underlying validation failure.
        source: LocationValidationError,
    },
    /// A seed report failed domain validation.
    #[error("invalid seed report {id}: {source}")]
    Report {
        /// Offending record id.
        id: String,
        /// Underlying validation failure.
        source: ReportValidationError,
    },
    /// A seed user carried an unknown role name.
    #[error("seed user {id} has unknown role {role:?}")]
    UnknownRole {
        /// Offending record id.
        id: String,
        /// Unparseable role name.
        role: String,
    },
    /// A seed report carried an unknown status name.
    #[error("seed report {id} has unknown status {status:?}")]
    UnknownStatus {
        /// Offending record id.
        id: String,
        /// Unparseable status name.
        status: String,
    },
}

/// Build the default seeded collections anchored at `now`.
///
/// Directory timestamps use `now`; report timestamps use each report's
/// occurrence date, matching the snapshot the records describe.
pub fn tracker_seed(now: DateTime<Utc>) -> Result<TrackerSeed, SeedError> {
    convert(seed_data::seed_data(now), now)
}

fn convert(data: seed_data::SeedData, now: DateTime<Utc>) -> Result<TrackerSeed, SeedError> {
    let mut users = Vec::with_capacity(data.users.len());
    let mut credentials = Vec::new();
    for seed in data.users {
        let role: Role = seed.role.parse().map_err(|_| SeedError::UnknownRole {
            id: seed.id.to_owned(),
            role: seed.role.to_owned(),
        })?;
        let user = UserId::new(seed.id)
            .and_then(|id| {
                User::try_new(
                    id,
                    seed.email,
                    seed.name,
                    seed.full_name,
                    seed.badge_number,
                    role,
                    now,
                )
            })
            .map_err(|source| SeedError::User {
                id: seed.id.to_owned(),
                source,
            })?;
        if let Some(password) = seed.password {
            credentials.push(Credential::new(seed.email, password));
        }
        users.push(user);
    }

    let mut locations = Vec::with_capacity(data.locations.len());
    for seed in data.locations {
        let location = LocationId::new(seed.id)
            .and_then(|id| {
                Location::try_new(id, seed.name, seed.description.map(str::to_owned), now)
            })
            .map_err(|source| SeedError::Location {
                id: seed.id.to_owned(),
                source,
            })?;
        locations.push(location);
    }

    let mut reports = Vec::with_capacity(data.reports.len());
    for seed in data.reports {
        reports.push(convert_report(seed)?);
    }

    Ok(TrackerSeed {
        users,
        locations,
        reports,
        credentials: CredentialSet::new(credentials),
    })
}

fn convert_report(seed: seed_data::SeedReport) -> Result<Report, SeedError> {
    let record_id = seed.id.clone();
    let status = seed
        .status
        .parse()
        .map_err(|_| SeedError::UnknownStatus {
            id: record_id.clone(),
            status: seed.status.clone(),
        })?;
    let technician_id = UserId::new(seed.technician_id).map_err(|source| SeedError::User {
        id: record_id.clone(),
        source,
    })?;
    let location_id = LocationId::new(seed.location_id).map_err(|source| SeedError::Location {
        id: record_id.clone(),
        source,
    })?;
    let date = seed.date;
    let draft = NewReport {
        technician_id,
        technician_name: seed.technician_name,
        badge_number: seed.badge_number,
        unit_id: seed.unit_id,
        location_id,
        location_name: seed.location_name,
        device_id: seed.device_id,
        card_number: seed.card_number,
        status,
        date,
        description: seed.description,
        images: seed.images,
        notes: seed.notes,
    };
    ReportId::new(seed.id)
        .and_then(|id| Report::try_new(id, draft, date))
        .map_err(|source| SeedError::Report {
            id: record_id,
            source,
        })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;

    fn fixture_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    #[test]
    fn full_seed_converts_cleanly() {
        let seed = tracker_seed(fixture_now()).expect("seed converts");
        assert_eq!(seed.users.len(), 5);
        assert_eq!(seed.locations.len(), 3);
        assert_eq!(
            seed.reports.len(),
            seed_data::FIXTURE_REPORT_COUNT + seed_data::GENERATED_REPORT_COUNT
        );
    }

    #[test]
    fn every_report_references_a_seeded_location_and_technician() {
        let seed = tracker_seed(fixture_now()).expect("seed converts");
        for report in &seed.reports {
            assert!(
                seed.locations
                    .iter()
                    .any(|location| location.id() == report.location_id())
            );
            assert!(
                seed.users
                    .iter()
                    .any(|user| user.id() == report.technician_id())
            );
        }
    }

    #[test]
    fn seeded_credentials_authenticate_the_documented_accounts() {
        use crate::domain::LoginCredentials;
        let seed = tracker_seed(fixture_now()).expect("seed converts");
        let admin = LoginCredentials::try_from_parts("wh135@whies.com", "sembarangsaja")
            .expect("credentials shape");
        let technician = LoginCredentials::try_from_parts("hendra@whies.com", "whies2025")
            .expect("credentials shape");
        assert!(seed.credentials.verify(&admin));
        assert!(seed.credentials.verify(&technician));
    }
}
