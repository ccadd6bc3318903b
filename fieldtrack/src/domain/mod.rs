//! Domain primitives, the store service, and pure query logic.
//!
//! Entities are strongly typed and validate their invariants in
//! constructors; the store service owns every collection and is the only
//! component that mutates them. Query and aggregation functions are pure
//! and recomputed on demand from snapshots.

pub mod auth;
pub mod error;
pub mod guard;
pub mod location;
pub mod ports;
pub mod query;
pub mod report;
pub mod stats;
pub mod store;
pub mod user;

pub use self::auth::{Credential, CredentialSet, LoginCredentials, LoginValidationError};
pub use self::error::{DomainResult, Error, ErrorCode};
pub use self::guard::{
    AccessDecision, Route, RouteScope, admin_only, can_access, public_only, technician_only,
};
pub use self::location::{
    Location, LocationId, LocationPatch, LocationValidationError, NewLocation,
};
pub use self::ports::{
    FixtureSessionStore, Notice, Notifier, RecordingNotifier, SessionStore, SessionStoreError,
    Severity,
};
pub use self::query::{DateRange, Period, ReportFilter, sort_newest_first};
pub use self::report::{
    NewReport, ParseReportStatusError, Report, ReportId, ReportPatch, ReportStatus,
    ReportValidationError,
};
pub use self::stats::{
    MonthlyTally, StatusTally, TOP_UNIT_LIMIT, TRAILING_MONTHS, TechnicianTally, UnitTally,
    monthly_tallies, technician_tallies, top_unit_tallies, unit_tallies,
};
pub use self::store::{DEFAULT_LATENCY, TrackerSeed, TrackerService};
pub use self::user::{
    NewUser, ParseRoleError, Role, User, UserId, UserPatch, UserValidationError,
};
