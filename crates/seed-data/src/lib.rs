//! Deterministic mock directory, location, and report data for
//! demonstration purposes.
//!
//! This crate provides the fixture records the tracker is seeded with plus
//! a reproducible generated tail of reports. It is independent of the core
//! crate's domain types to avoid circular dependencies; records are plain
//! structs the core converts and validates.
//!
//! Generation is deterministic: the same RNG seed and anchor time always
//! produce the same reports.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//!
//! let data = seed_data::seed_data(Utc::now());
//! assert_eq!(data.users.len(), 5);
//! assert_eq!(
//!     data.reports.len(),
//!     seed_data::FIXTURE_REPORT_COUNT + seed_data::GENERATED_REPORT_COUNT
//! );
//! ```

use chrono::{DateTime, TimeDelta, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// RNG seed used by [`seed_data`].
pub const DEFAULT_RNG_SEED: u64 = 0x77_68_69_65_73;

/// Hand-written reports in the fixture set.
pub const FIXTURE_REPORT_COUNT: usize = 3;

/// Reports appended by the deterministic generator.
pub const GENERATED_REPORT_COUNT: usize = 15;

/// Image placeholder carried by seeded reports.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// A directory account record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUser {
    /// Stable account id.
    pub id: &'static str,
    /// Sign-in email address.
    pub email: &'static str,
    /// Short login name.
    pub name: &'static str,
    /// Display full name.
    pub full_name: &'static str,
    /// Badge number.
    pub badge_number: &'static str,
    /// Role name: `admin` or `technician`.
    pub role: &'static str,
    /// Password for login-capable accounts; mock value, not a secret store.
    pub password: Option<&'static str>,
}

/// A maintenance location record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedLocation {
    /// Stable location id.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Optional free-text description.
    pub description: Option<&'static str>,
}

/// A submitted report record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Stable report id.
    pub id: String,
    /// Submitting technician's account id.
    pub technician_id: String,
    /// Technician display name snapshot.
    pub technician_name: String,
    /// Technician badge number snapshot.
    pub badge_number: String,
    /// Serviced unit identifier.
    pub unit_id: String,
    /// Referenced location id.
    pub location_id: String,
    /// Location display name snapshot.
    pub location_name: String,
    /// Serviced device identifier.
    pub device_id: String,
    /// Access card number recorded with the visit.
    pub card_number: String,
    /// Status name: `pending`, `completed`, or `rejected`.
    pub status: String,
    /// Occurrence date of the reported work.
    pub date: DateTime<Utc>,
    /// Optional work description.
    pub description: Option<String>,
    /// Optional image references.
    pub images: Option<Vec<String>>,
    /// Optional reviewer-facing notes.
    pub notes: Option<String>,
}

/// The complete seed set for one tracker instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedData {
    /// Directory accounts.
    pub users: Vec<SeedUser>,
    /// Maintenance locations.
    pub locations: Vec<SeedLocation>,
    /// Submitted reports, fixtures first.
    pub reports: Vec<SeedReport>,
}

/// Build the full seed set anchored at `now`, using [`DEFAULT_RNG_SEED`]
/// for the generated tail.
pub fn seed_data(now: DateTime<Utc>) -> SeedData {
    let mut reports = fixture_reports(now);
    reports.extend(generated_reports(now, GENERATED_REPORT_COUNT, DEFAULT_RNG_SEED));
    SeedData {
        users: fixture_users(),
        locations: fixture_locations(),
        reports,
    }
}

/// The five directory accounts, two of them login-capable.
pub fn fixture_users() -> Vec<SeedUser> {
    vec![
        SeedUser {
            id: "user-admin",
            email: "admin@whiesindustri.com",
            name: "admin",
            full_name: "Admin User",
            badge_number: "A001",
            role: "admin",
            password: None,
        },
        SeedUser {
            id: "user-tech1",
            email: "tech1@whiesindustri.com",
            name: "tech1",
            full_name: "Technician One",
            badge_number: "T001",
            role: "technician",
            password: None,
        },
        SeedUser {
            id: "user-tech2",
            email: "tech2@whiesindustri.com",
            name: "tech2",
            full_name: "Technician Two",
            badge_number: "T002",
            role: "technician",
            password: None,
        },
        SeedUser {
            id: "test-admin-id",
            email: "wh135@whies.com",
            name: "wh135",
            full_name: "Admin User",
            badge_number: "A001",
            role: "admin",
            password: Some("sembarangsaja"),
        },
        SeedUser {
            id: "test-tech-id",
            email: "hendra@whies.com",
            name: "hendra",
            full_name: "Hendra Abdi",
            badge_number: "T001",
            role: "technician",
            password: Some("whies2025"),
        },
    ]
}

/// The three maintenance locations.
pub fn fixture_locations() -> Vec<SeedLocation> {
    vec![
        SeedLocation {
            id: "loc-jakarta",
            name: "Jakarta HQ",
            description: Some("Main headquarters in Jakarta"),
        },
        SeedLocation {
            id: "loc-bandung",
            name: "Bandung Office",
            description: Some("Branch office in Bandung"),
        },
        SeedLocation {
            id: "loc-surabaya",
            name: "Surabaya Plant",
            description: Some("Production plant in Surabaya"),
        },
    ]
}

/// The three hand-written reports, one per status, anchored at `now`.
pub fn fixture_reports(now: DateTime<Utc>) -> Vec<SeedReport> {
    vec![
        SeedReport {
            id: "report-001".to_owned(),
            technician_id: "user-tech1".to_owned(),
            technician_name: "Technician One".to_owned(),
            badge_number: "T001".to_owned(),
            unit_id: "UNIT-001".to_owned(),
            location_id: "loc-jakarta".to_owned(),
            location_name: "Jakarta HQ".to_owned(),
            device_id: "DEV-001".to_owned(),
            card_number: "CARD-001".to_owned(),
            status: "pending".to_owned(),
            date: now,
            description: Some("Regular maintenance check completed".to_owned()),
            images: Some(vec![
                PLACEHOLDER_IMAGE.to_owned(),
                PLACEHOLDER_IMAGE.to_owned(),
            ]),
            notes: Some("No issues found during inspection".to_owned()),
        },
        SeedReport {
            id: "report-002".to_owned(),
            technician_id: "user-tech2".to_owned(),
            technician_name: "Technician Two".to_owned(),
            badge_number: "T002".to_owned(),
            unit_id: "UNIT-002".to_owned(),
            location_id: "loc-bandung".to_owned(),
            location_name: "Bandung Office".to_owned(),
            device_id: "DEV-002".to_owned(),
            card_number: "CARD-002".to_owned(),
            status: "completed".to_owned(),
            date: now - TimeDelta::days(1),
            description: Some("Replaced faulty component".to_owned()),
            images: Some(vec![
                PLACEHOLDER_IMAGE.to_owned(),
                PLACEHOLDER_IMAGE.to_owned(),
            ]),
            notes: Some("Component was showing signs of wear".to_owned()),
        },
        SeedReport {
            id: "report-003".to_owned(),
            technician_id: "user-tech1".to_owned(),
            technician_name: "Technician One".to_owned(),
            badge_number: "T001".to_owned(),
            unit_id: "UNIT-003".to_owned(),
            location_id: "loc-surabaya".to_owned(),
            location_name: "Surabaya Plant".to_owned(),
            device_id: "DEV-003".to_owned(),
            card_number: "CARD-003".to_owned(),
            status: "rejected".to_owned(),
            date: now - TimeDelta::days(2),
            description: Some("Emergency repair".to_owned()),
            images: Some(vec![PLACEHOLDER_IMAGE.to_owned()]),
            notes: Some("Insufficient details provided".to_owned()),
        },
    ]
}

/// Generate `count` reports spread over the last month, reproducible for a
/// given `rng_seed` and anchor time.
pub fn generated_reports(now: DateTime<Utc>, count: usize, rng_seed: u64) -> Vec<SeedReport> {
    const TECHNICIANS: [(&str, &str, &str); 2] = [
        ("user-tech1", "Technician One", "T001"),
        ("user-tech2", "Technician Two", "T002"),
    ];
    const LOCATIONS: [(&str, &str); 3] = [
        ("loc-jakarta", "Jakarta HQ"),
        ("loc-bandung", "Bandung Office"),
        ("loc-surabaya", "Surabaya Plant"),
    ];
    const STATUSES: [&str; 3] = ["pending", "completed", "rejected"];

    let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
    (0..count)
        .map(|index| {
            let (technician_id, technician_name, badge_number) = match rng.random_range(0..2_u8) {
                0 => TECHNICIANS[0],
                _ => TECHNICIANS[1],
            };
            let (location_id, location_name) = match rng.random_range(0..3_u8) {
                0 => LOCATIONS[0],
                1 => LOCATIONS[1],
                _ => LOCATIONS[2],
            };
            let status = match rng.random_range(0..3_u8) {
                0 => STATUSES[0],
                1 => STATUSES[1],
                _ => STATUSES[2],
            };
            let days_ago = rng.random_range(0..30_i64);
            SeedReport {
                id: format!("report-{:012x}", rng.random::<u64>()),
                technician_id: technician_id.to_owned(),
                technician_name: technician_name.to_owned(),
                badge_number: badge_number.to_owned(),
                unit_id: format!("UNIT-{:03}", index + 10),
                location_id: location_id.to_owned(),
                location_name: location_name.to_owned(),
                device_id: format!("DEV-{:03}", index + 10),
                card_number: format!("CARD-{:03}", index + 10),
                status: status.to_owned(),
                date: now - TimeDelta::days(days_ago),
                description: Some(format!("Routine check {}", index + 1)),
                images: Some(vec![PLACEHOLDER_IMAGE.to_owned()]),
                notes: Some(format!("Notes for report {}", index + 1)),
            }
        })
        .collect()
}
