//! The domain store: single source of truth for users, locations, reports,
//! and the session.
//!
//! All mutations funnel through [`TrackerService`]. Operations simulate a
//! network round-trip, hold a transient busy flag for their duration, and
//! emit a user-facing [`Notice`] describing the outcome. Collections are
//! only handed out as cloned snapshots; consumers re-derive views after
//! every mutation instead of caching.
//!
//! Mutations lock the collections for a synchronous critical section only;
//! the service never awaits while holding the lock, so operations cannot
//! interleave inside each other's read-modify-write.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use mockable::Clock;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::auth::{CredentialSet, LoginCredentials};
use super::error::{DomainResult, Error};
use super::location::{Location, LocationId, LocationPatch, NewLocation};
use super::ports::{Notice, Notifier, SessionStore};
use super::query::sort_newest_first;
use super::report::{NewReport, Report, ReportId, ReportPatch, ReportStatus};
use super::user::{NewUser, Role, User, UserId, UserPatch};

/// Simulated network round-trip applied by every operation by default.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// Initial collections and credential directory for a service instance.
#[derive(Debug, Clone, Default)]
pub struct TrackerSeed {
    /// Directory accounts.
    pub users: Vec<User>,
    /// Maintenance locations.
    pub locations: Vec<Location>,
    /// Submitted reports.
    pub reports: Vec<Report>,
    /// Login-capable email/password pairs.
    pub credentials: CredentialSet,
}

struct TrackerState {
    users: Vec<User>,
    locations: Vec<Location>,
    reports: Vec<Report>,
    current_user: Option<User>,
}

/// Dependency-injected domain store owning the four collections.
///
/// Generic over its driven ports so tests substitute in-memory doubles;
/// timestamps come from the injected [`Clock`].
pub struct TrackerService<S, N> {
    sessions: Arc<S>,
    notifier: Arc<N>,
    clock: Arc<dyn Clock>,
    credentials: CredentialSet,
    latency: Duration,
    busy: AtomicUsize,
    state: Mutex<TrackerState>,
}

/// Raises the busy counter until dropped, releasing it on every exit path.
struct BusyGuard<'a> {
    flag: &'a AtomicUsize,
}

impl<'a> BusyGuard<'a> {
    fn raise(flag: &'a AtomicUsize) -> Self {
        flag.fetch_add(1, Ordering::SeqCst);
        Self { flag }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<S, N> TrackerService<S, N>
where
    S: SessionStore,
    N: Notifier,
{
    /// Create a service over seeded collections and adapter ports.
    pub fn new(seed: TrackerSeed, sessions: Arc<S>, notifier: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions,
            notifier,
            clock,
            credentials: seed.credentials,
            latency: DEFAULT_LATENCY,
            busy: AtomicUsize::new(0),
            state: Mutex::new(TrackerState {
                users: seed.users,
                locations: seed.locations,
                reports: seed.reports,
                current_user: None,
            }),
        }
    }

    /// Override the simulated round-trip; tests pass [`Duration::ZERO`].
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// True while any operation is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst) > 0
    }

    /// Snapshot of the directory accounts.
    pub fn users(&self) -> Vec<User> {
        self.lock_state().users.clone()
    }

    /// Snapshot of the maintenance locations.
    pub fn locations(&self) -> Vec<Location> {
        self.lock_state().locations.clone()
    }

    /// Snapshot of the submitted reports.
    pub fn reports(&self) -> Vec<Report> {
        self.lock_state().reports.clone()
    }

    /// Snapshot of the session user.
    pub fn current_user(&self) -> Option<User> {
        self.lock_state().current_user.clone()
    }

    /// Role of the session user, for the access guards.
    pub fn session_role(&self) -> Option<Role> {
        self.lock_state().current_user.as_ref().map(User::role)
    }

    /// True while a session user is set.
    pub fn is_authenticated(&self) -> bool {
        self.lock_state().current_user.is_some()
    }

    /// Check credentials against the seeded directory and open a session.
    ///
    /// Email matching is case-insensitive, password matching exact. On
    /// success the session is persisted to the durable record.
    pub async fn login(&self, credentials: &LoginCredentials) -> DomainResult<User> {
        let _busy = BusyGuard::raise(&self.busy);
        self.simulate_latency().await;
        let result = self.login_inner(credentials);
        match &result {
            Ok(user) => {
                debug!(user = %user.id(), "session opened");
                self.notify(Notice::info(
                    "Login successful",
                    format!("Welcome back, {}", user.full_name()),
                ));
            }
            Err(err) => self.notify(Notice::alert("Login failed", err.message())),
        }
        result
    }

    fn login_inner(&self, credentials: &LoginCredentials) -> DomainResult<User> {
        if !self.credentials.verify(credentials) {
            return Err(Error::unauthorized("Invalid email or password"));
        }
        let mut state = self.lock_state();
        let user = state
            .users
            .iter()
            .find(|user| user.email().eq_ignore_ascii_case(credentials.email()))
            .cloned()
            .ok_or_else(|| Error::internal("credential entry has no directory record"))?;
        self.sessions
            .save(&user)
            .map_err(|err| Error::internal(err.to_string()))?;
        state.current_user = Some(user.clone());
        Ok(user)
    }

    /// Close the session and clear the durable record; no-op when already
    /// signed out.
    pub async fn logout(&self) {
        let _busy = BusyGuard::raise(&self.busy);
        self.simulate_latency().await;
        self.lock_state().current_user = None;
        if let Err(err) = self.sessions.clear() {
            warn!(error = %err, "failed to clear durable session record");
        }
        self.notify(Notice::info(
            "Logged out",
            "You have been successfully logged out",
        ));
    }

    /// Reopen a session from the durable record, if one survives.
    ///
    /// Malformed records are handled by the adapter (treated as absent and
    /// cleared); only real storage failures surface as errors.
    pub fn restore_session(&self) -> DomainResult<Option<User>> {
        let restored = self
            .sessions
            .load()
            .map_err(|err| Error::internal(err.to_string()))?;
        if let Some(user) = &restored {
            debug!(user = %user.id(), "session restored from durable record");
            self.lock_state().current_user = Some(user.clone());
        }
        Ok(restored)
    }

    /// Add a directory account; the draft's password is stripped before the
    /// record is kept.
    pub async fn add_user(&self, draft: NewUser) -> DomainResult<User> {
        let _busy = BusyGuard::raise(&self.busy);
        self.simulate_latency().await;
        let now = self.clock.utc();
        let result = User::from_draft(draft, now)
            .map_err(|err| Error::invalid_request(err.to_string()))
            .map(|user| {
                self.lock_state().users.push(user.clone());
                user
            });
        match &result {
            Ok(user) => {
                debug!(user = %user.id(), "user added");
                self.notify(Notice::info(
                    "User added",
                    format!("{} has been added successfully", user.full_name()),
                ));
            }
            Err(err) => self.notify(Notice::alert("Error adding user", err.message())),
        }
        result
    }

    /// Merge a partial update into an account.
    ///
    /// When the target is the session user, the session copy and the
    /// durable record are refreshed with the same fields.
    pub async fn update_user(&self, id: &UserId, patch: UserPatch) -> DomainResult<User> {
        let _busy = BusyGuard::raise(&self.busy);
        self.simulate_latency().await;
        let now = self.clock.utc();
        let result = self.update_user_inner(id, patch, now);
        match &result {
            Ok(user) => self.notify(Notice::info(
                "User updated",
                format!("{}'s information has been updated", user.full_name()),
            )),
            Err(err) => self.notify(Notice::alert("Error updating user", err.message())),
        }
        result
    }

    fn update_user_inner(
        &self,
        id: &UserId,
        patch: UserPatch,
        now: chrono::DateTime<chrono::Utc>,
    ) -> DomainResult<User> {
        let mut state = self.lock_state();
        let updated = {
            let Some(user) = state.users.iter_mut().find(|user| user.id() == id) else {
                return Err(Error::not_found(format!("user {id} not found")));
            };
            user.apply(patch, now);
            user.clone()
        };
        if state
            .current_user
            .as_ref()
            .is_some_and(|current| current.id() == id)
        {
            state.current_user = Some(updated.clone());
            if let Err(err) = self.sessions.save(&updated) {
                warn!(error = %err, "failed to refresh durable session record");
            }
        }
        Ok(updated)
    }

    /// Remove a directory account.
    ///
    /// Returns `Ok(false)` without touching the collection when the target
    /// is the session user; deleting your own account while signed in is a
    /// business-rule refusal, not an error.
    pub async fn delete_user(&self, id: &UserId) -> DomainResult<bool> {
        let _busy = BusyGuard::raise(&self.busy);
        self.simulate_latency().await;
        let result = self.delete_user_inner(id);
        match &result {
            Ok(Some(user)) => self.notify(Notice::info(
                "User deleted",
                format!("{} has been removed", user.full_name()),
            )),
            Ok(None) => self.notify(Notice::alert(
                "Cannot delete",
                "You cannot delete your own account while logged in",
            )),
            Err(err) => self.notify(Notice::alert("Error deleting user", err.message())),
        }
        result.map(|removed| removed.is_some())
    }

    fn delete_user_inner(&self, id: &UserId) -> DomainResult<Option<User>> {
        let mut state = self.lock_state();
        if state
            .current_user
            .as_ref()
            .is_some_and(|current| current.id() == id)
        {
            return Ok(None);
        }
        let Some(index) = state.users.iter().position(|user| user.id() == id) else {
            return Err(Error::not_found(format!("user {id} not found")));
        };
        Ok(Some(state.users.remove(index)))
    }

    /// Add a maintenance location.
    pub async fn add_location(&self, draft: NewLocation) -> DomainResult<Location> {
        let _busy = BusyGuard::raise(&self.busy);
        self.simulate_latency().await;
        let now = self.clock.utc();
        let result = Location::from_draft(draft, now)
            .map_err(|err| Error::invalid_request(err.to_string()))
            .map(|location| {
                self.lock_state().locations.push(location.clone());
                location
            });
        match &result {
            Ok(location) => self.notify(Notice::info(
                "Location added",
                format!("{} has been added successfully", location.name()),
            )),
            Err(err) => self.notify(Notice::alert("Error adding location", err.message())),
        }
        result
    }

    /// Merge a partial update into a location.
    pub async fn update_location(
        &self,
        id: &LocationId,
        patch: LocationPatch,
    ) -> DomainResult<Location> {
        let _busy = BusyGuard::raise(&self.busy);
        self.simulate_latency().await;
        let now = self.clock.utc();
        let result = {
            let mut state = self.lock_state();
            match state.locations.iter_mut().find(|location| location.id() == id) {
                Some(location) => {
                    location.apply(patch, now);
                    Ok(location.clone())
                }
                None => Err(Error::not_found(format!("location {id} not found"))),
            }
        };
        match &result {
            Ok(location) => self.notify(Notice::info(
                "Location updated",
                format!("{} has been updated", location.name()),
            )),
            Err(err) => self.notify(Notice::alert("Error updating location", err.message())),
        }
        result
    }

    /// Remove a location.
    ///
    /// Returns `Ok(false)` while any report still references the location;
    /// referential integrity is a business-rule refusal, not an error.
    pub async fn delete_location(&self, id: &LocationId) -> DomainResult<bool> {
        let _busy = BusyGuard::raise(&self.busy);
        self.simulate_latency().await;
        let result = self.delete_location_inner(id);
        match &result {
            Ok(Some(location)) => self.notify(Notice::info(
                "Location deleted",
                format!("{} has been removed", location.name()),
            )),
            Ok(None) => self.notify(Notice::alert(
                "Cannot delete location",
                "This location is used in existing reports",
            )),
            Err(err) => self.notify(Notice::alert("Error deleting location", err.message())),
        }
        result.map(|removed| removed.is_some())
    }

    fn delete_location_inner(&self, id: &LocationId) -> DomainResult<Option<Location>> {
        let mut state = self.lock_state();
        let Some(index) = state
            .locations
            .iter()
            .position(|location| location.id() == id)
        else {
            return Err(Error::not_found(format!("location {id} not found")));
        };
        if state.reports.iter().any(|report| report.location_id() == id) {
            return Ok(None);
        }
        Ok(Some(state.locations.remove(index)))
    }

    /// Append a submitted report.
    ///
    /// The status is whatever the draft carries; the technician submission
    /// flow always supplies [`ReportStatus::Pending`].
    pub async fn add_report(&self, draft: NewReport) -> DomainResult<Report> {
        let _busy = BusyGuard::raise(&self.busy);
        self.simulate_latency().await;
        let now = self.clock.utc();
        let result = Report::from_draft(draft, now)
            .map_err(|err| Error::invalid_request(err.to_string()))
            .map(|report| {
                self.lock_state().reports.push(report.clone());
                report
            });
        match &result {
            Ok(report) => {
                debug!(report = %report.id(), "report submitted");
                self.notify(Notice::info(
                    "Report added",
                    "New report has been submitted successfully",
                ));
            }
            Err(err) => self.notify(Notice::alert("Error adding report", err.message())),
        }
        result
    }

    /// Merge a partial update into a report.
    pub async fn update_report(&self, id: &ReportId, patch: ReportPatch) -> DomainResult<Report> {
        let _busy = BusyGuard::raise(&self.busy);
        self.simulate_latency().await;
        let now = self.clock.utc();
        let result = {
            let mut state = self.lock_state();
            match state.reports.iter_mut().find(|report| report.id() == id) {
                Some(report) => {
                    report.apply(patch, now);
                    Ok(report.clone())
                }
                None => Err(Error::not_found(format!("report {id} not found"))),
            }
        };
        match &result {
            Ok(report) => self.notify(Notice::info(
                "Report updated",
                format!("Report #{} has been updated", report.id().short()),
            )),
            Err(err) => self.notify(Notice::alert("Error updating report", err.message())),
        }
        result
    }

    /// Remove a report.
    pub async fn delete_report(&self, id: &ReportId) -> DomainResult<()> {
        let _busy = BusyGuard::raise(&self.busy);
        self.simulate_latency().await;
        let result = {
            let mut state = self.lock_state();
            match state.reports.iter().position(|report| report.id() == id) {
                Some(index) => Ok(state.reports.remove(index)),
                None => Err(Error::not_found(format!("report {id} not found"))),
            }
        };
        match &result {
            Ok(report) => self.notify(Notice::info(
                "Report deleted",
                format!("Report #{} has been removed", report.id().short()),
            )),
            Err(err) => self.notify(Notice::alert("Error deleting report", err.message())),
        }
        result.map(|_| ())
    }

    /// Transition a report's review status and refresh its update
    /// timestamp.
    pub async fn update_report_status(
        &self,
        id: &ReportId,
        status: ReportStatus,
    ) -> DomainResult<Report> {
        let _busy = BusyGuard::raise(&self.busy);
        self.simulate_latency().await;
        let now = self.clock.utc();
        let result = {
            let mut state = self.lock_state();
            match state.reports.iter_mut().find(|report| report.id() == id) {
                Some(report) => {
                    report.set_status(status, now);
                    Ok(report.clone())
                }
                None => Err(Error::not_found(format!("report {id} not found"))),
            }
        };
        match &result {
            Ok(_) => self.notify(Notice::info(
                "Status updated",
                format!("Report has been {}", status_phrase(status)),
            )),
            Err(err) => self.notify(Notice::alert("Error updating status", err.message())),
        }
        result
    }

    /// Stubbed password change: validates the target account and reports
    /// success, but the mock never stores credentials.
    pub async fn change_password(
        &self,
        id: &UserId,
        new_password: Zeroizing<String>,
    ) -> DomainResult<()> {
        let _busy = BusyGuard::raise(&self.busy);
        self.simulate_latency().await;
        drop(new_password);
        let exists = self.lock_state().users.iter().any(|user| user.id() == id);
        if exists {
            self.notify(Notice::info(
                "Password updated",
                "Your password has been changed successfully",
            ));
            Ok(())
        } else {
            let err = Error::not_found(format!("user {id} not found"));
            self.notify(Notice::alert("Error updating password", err.message()));
            Err(err)
        }
    }

    /// Reports owned by the session technician, newest first.
    ///
    /// This is the authorization boundary for technician-facing views: the
    /// scope comes from the session, never from a caller-supplied id.
    pub fn technician_reports(&self) -> DomainResult<Vec<Report>> {
        let state = self.lock_state();
        let Some(current) = &state.current_user else {
            return Err(Error::unauthorized("sign in to list your reports"));
        };
        if current.role() != Role::Technician {
            return Err(Error::unauthorized(
                "only technicians have a personal report list",
            ));
        }
        let mut own: Vec<Report> = state
            .reports
            .iter()
            .filter(|report| report.technician_id() == current.id())
            .cloned()
            .collect();
        sort_newest_first(&mut own);
        Ok(own)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    fn lock_state(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn status_phrase(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::Pending => "marked as pending",
        ReportStatus::Completed => "marked as completed",
        ReportStatus::Rejected => "rejected",
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for service plumbing; operation behaviour is covered
    //! by the integration tests.
    use super::*;
    use crate::domain::ports::{FixtureSessionStore, RecordingNotifier, Severity};
    use mockable::DefaultClock;

    fn empty_service() -> TrackerService<FixtureSessionStore, RecordingNotifier> {
        TrackerService::new(
            TrackerSeed::default(),
            Arc::new(FixtureSessionStore::default()),
            Arc::new(RecordingNotifier::default()),
            Arc::new(DefaultClock),
        )
        .with_latency(Duration::ZERO)
    }

    #[tokio::test]
    async fn busy_flag_is_released_after_a_failing_operation() {
        let service = empty_service();
        let missing = UserId::new("nobody").expect("valid id");
        let err = service
            .update_user(&missing, UserPatch::default())
            .await
            .expect_err("missing target must fail");
        assert_eq!(err.code(), crate::domain::ErrorCode::NotFound);
        assert!(!service.is_busy());
    }

    #[tokio::test]
    async fn invalid_draft_is_refused_with_an_alert() {
        let service = empty_service();
        let draft = NewUser {
            email: "  ".to_owned(),
            name: "tech9".to_owned(),
            full_name: "Technician Nine".to_owned(),
            badge_number: "T009".to_owned(),
            role: Role::Technician,
            password: None,
        };
        let err = service.add_user(draft).await.expect_err("blank email");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
        assert!(service.users().is_empty());
        let notifier_severity = service.notifier.last().map(|notice| notice.severity());
        assert_eq!(notifier_severity, Some(Severity::Alert));
    }

    #[test]
    fn snapshots_start_from_the_seed() {
        let service = empty_service();
        assert!(service.users().is_empty());
        assert!(service.locations().is_empty());
        assert!(service.reports().is_empty());
        assert_eq!(service.current_user(), None);
        assert!(!service.is_authenticated());
    }
}
