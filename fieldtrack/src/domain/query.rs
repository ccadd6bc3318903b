//! Report filtering and sorting.
//!
//! Pure functions over report snapshots, recomputed on demand by callers.
//! A [`ReportFilter`] combines any number of predicates with AND semantics
//! and applies them in one pass, so predicate order never changes the
//! result set.

use std::cmp::Reverse;

use chrono::{DateTime, Days, NaiveDate, Utc};

use super::location::LocationId;
use super::report::{Report, ReportStatus};
use super::user::UserId;

/// Relative time window, evaluated against the wall clock at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// Reports dated on the evaluation day.
    Today,
    /// Reports dated within the last seven calendar days, today included.
    Last7Days,
    /// Reports dated within the last thirty calendar days, today included.
    Last30Days,
}

impl Period {
    /// True when `date` falls inside the window anchored at `today`.
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::Today => date == today,
            Self::Last7Days => date >= Self::window_start(today, 6),
            Self::Last30Days => date >= Self::window_start(today, 29),
        }
    }

    fn window_start(today: NaiveDate, days_back: u64) -> NaiveDate {
        today
            .checked_sub_days(Days::new(days_back))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Inclusive date range at day granularity.
///
/// Either bound may be open; a report matches a lower-only or upper-only
/// bound with an inclusive comparison at the boundary day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// Build a range from optional bounds.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// True when both bounds are open.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// True when `date` falls inside the range, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start)
            && self.end.is_none_or(|end| date <= end)
    }
}

/// AND-composed report predicates plus the default newest-first sort.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    status: Option<ReportStatus>,
    technician: Option<UserId>,
    location: Option<LocationId>,
    unit: Option<String>,
    search: Option<String>,
    range: DateRange,
    period: Option<Period>,
}

impl ReportFilter {
    /// A filter that matches every report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only reports with the given status.
    pub fn with_status(mut self, status: ReportStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Keep only reports submitted by the given technician.
    ///
    /// This is the authorization boundary for technician-facing views, not
    /// just a display convenience.
    pub fn for_technician(mut self, technician: UserId) -> Self {
        self.technician = Some(technician);
        self
    }

    /// Keep only reports referencing the given location.
    pub fn at_location(mut self, location: LocationId) -> Self {
        self.location = Some(location);
        self
    }

    /// Keep only reports for the given unit id.
    pub fn for_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Keep only reports where any searched field contains `term`
    /// case-insensitively. A blank term matches everything.
    pub fn matching(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let trimmed = term.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        };
        self
    }

    /// Keep only reports dated inside the range.
    pub fn between(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    /// Keep only reports dated inside the relative window.
    pub fn within(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    /// True when `report` passes every active predicate.
    ///
    /// `today` anchors the date-granular predicates; pass the current wall
    /// clock date at evaluation time.
    pub fn matches(&self, report: &Report, today: NaiveDate) -> bool {
        if self.status.is_some_and(|status| report.status() != status) {
            return false;
        }
        if self
            .technician
            .as_ref()
            .is_some_and(|technician| report.technician_id() != technician)
        {
            return false;
        }
        if self
            .location
            .as_ref()
            .is_some_and(|location| report.location_id() != location)
        {
            return false;
        }
        if self
            .unit
            .as_deref()
            .is_some_and(|unit| report.unit_id() != unit)
        {
            return false;
        }
        if let Some(term) = &self.search {
            if !search_matches(report, term) {
                return false;
            }
        }
        let date = report.date().date_naive();
        if !self.range.contains(date) {
            return false;
        }
        if self
            .period
            .is_some_and(|period| !period.contains(date, today))
        {
            return false;
        }
        true
    }

    /// Filter a snapshot and sort the survivors newest first.
    pub fn apply(&self, reports: &[Report], now: DateTime<Utc>) -> Vec<Report> {
        let today = now.date_naive();
        let mut matched: Vec<Report> = reports
            .iter()
            .filter(|report| self.matches(report, today))
            .cloned()
            .collect();
        sort_newest_first(&mut matched);
        matched
    }
}

/// Sort reports by occurrence date, newest first.
pub fn sort_newest_first(reports: &mut [Report]) {
    reports.sort_by_key(|report| Reverse(report.date()));
}

/// Case-insensitive substring match across every searched field; `term`
/// must already be lowercase.
fn search_matches(report: &Report, term: &str) -> bool {
    let haystacks = [
        Some(report.technician_name()),
        Some(report.badge_number()),
        Some(report.unit_id()),
        Some(report.location_name()),
        Some(report.device_id()),
        Some(report.card_number()),
        report.description(),
        report.notes(),
    ];
    haystacks
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::report::NewReport;
    use chrono::{TimeDelta, TimeZone};
    use rstest::rstest;

    fn fixture_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn report(
        technician: &str,
        unit: &str,
        status: ReportStatus,
        date: DateTime<Utc>,
        notes: Option<&str>,
    ) -> Report {
        let draft = NewReport {
            technician_id: UserId::new(technician).expect("valid id"),
            technician_name: format!("Technician {technician}"),
            badge_number: "T001".to_owned(),
            unit_id: unit.to_owned(),
            location_id: LocationId::new("loc-jakarta").expect("valid id"),
            location_name: "Jakarta HQ".to_owned(),
            device_id: "DEV-001".to_owned(),
            card_number: "CARD-001".to_owned(),
            status,
            date,
            description: None,
            images: None,
            notes: notes.map(str::to_owned),
        };
        Report::from_draft(draft, date).expect("valid fixture report")
    }

    #[test]
    fn filters_compose_with_and_semantics() {
        let now = fixture_now();
        let reports = vec![
            report("tech-1", "UNIT-001", ReportStatus::Pending, now, None),
            report("tech-1", "UNIT-002", ReportStatus::Completed, now, None),
            report("tech-2", "UNIT-001", ReportStatus::Pending, now, None),
        ];
        let filtered = ReportFilter::new()
            .for_technician(UserId::new("tech-1").expect("valid id"))
            .with_status(ReportStatus::Pending)
            .apply(&reports, now);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.first().map(Report::unit_id), Some("UNIT-001"));
    }

    #[test]
    fn filter_order_is_commutative() {
        let now = fixture_now();
        let reports = vec![
            report("tech-1", "UNIT-001", ReportStatus::Pending, now, None),
            report(
                "tech-1",
                "UNIT-002",
                ReportStatus::Pending,
                now - TimeDelta::days(1),
                None,
            ),
            report("tech-2", "UNIT-003", ReportStatus::Pending, now, None),
            report("tech-1", "UNIT-004", ReportStatus::Rejected, now, None),
        ];
        let technician = UserId::new("tech-1").expect("valid id");
        let first = ReportFilter::new()
            .for_technician(technician.clone())
            .with_status(ReportStatus::Pending)
            .apply(&reports, now);
        let second = ReportFilter::new()
            .with_status(ReportStatus::Pending)
            .for_technician(technician)
            .apply(&reports, now);
        assert_eq!(first, second);
    }

    #[test]
    fn search_hits_any_field_case_insensitively() {
        let now = fixture_now();
        let reports = vec![
            report(
                "tech-1",
                "UNIT-001",
                ReportStatus::Pending,
                now,
                Some("Component was showing signs of wear"),
            ),
            report("tech-2", "UNIT-002", ReportStatus::Pending, now, None),
        ];
        let hits = ReportFilter::new().matching("SIGNS OF WEAR").apply(&reports, now);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().map(Report::unit_id), Some("UNIT-001"));
    }

    #[test]
    fn blank_search_matches_everything() {
        let now = fixture_now();
        let reports = vec![report(
            "tech-1",
            "UNIT-001",
            ReportStatus::Pending,
            now,
            None,
        )];
        assert_eq!(ReportFilter::new().matching("   ").apply(&reports, now).len(), 1);
    }

    #[rstest]
    #[case(Period::Today, 0, true)]
    #[case(Period::Today, 1, false)]
    #[case(Period::Last7Days, 1, true)]
    #[case(Period::Last7Days, 6, true)]
    #[case(Period::Last7Days, 7, false)]
    #[case(Period::Last30Days, 29, true)]
    #[case(Period::Last30Days, 40, false)]
    fn period_windows_are_day_granular(
        #[case] period: Period,
        #[case] days_ago: i64,
        #[case] expected: bool,
    ) {
        let today = fixture_now().date_naive();
        let date = today - TimeDelta::days(days_ago);
        assert_eq!(period.contains(date, today), expected);
    }

    #[rstest]
    #[case(Some(0), Some(0), 0, true)]
    #[case(Some(1), None, 0, true)]
    #[case(Some(1), None, 2, false)]
    #[case(None, Some(1), 1, true)]
    #[case(None, Some(1), 0, false)]
    fn date_range_bounds_are_inclusive(
        #[case] start_days_ago: Option<i64>,
        #[case] end_days_ago: Option<i64>,
        #[case] report_days_ago: i64,
        #[case] expected: bool,
    ) {
        let today = fixture_now().date_naive();
        let range = DateRange::new(
            start_days_ago.map(|days| today - TimeDelta::days(days)),
            end_days_ago.map(|days| today - TimeDelta::days(days)),
        );
        assert_eq!(range.contains(today - TimeDelta::days(report_days_ago)), expected);
    }

    #[test]
    fn location_and_date_range_filters_combine() {
        let now = fixture_now();
        let today = now.date_naive();
        let in_range = report("tech-1", "UNIT-001", ReportStatus::Pending, now, None);
        let too_old = report(
            "tech-1",
            "UNIT-002",
            ReportStatus::Pending,
            now - TimeDelta::days(10),
            None,
        );
        let reports = vec![in_range, too_old];
        let filtered = ReportFilter::new()
            .at_location(LocationId::new("loc-jakarta").expect("valid id"))
            .between(DateRange::new(Some(today - TimeDelta::days(5)), Some(today)))
            .apply(&reports, now);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.first().map(Report::unit_id), Some("UNIT-001"));

        let elsewhere = ReportFilter::new()
            .at_location(LocationId::new("loc-bandung").expect("valid id"))
            .apply(&reports, now);
        assert!(elsewhere.is_empty());
    }

    #[test]
    fn apply_sorts_newest_first() {
        let now = fixture_now();
        let reports = vec![
            report(
                "tech-1",
                "UNIT-OLD",
                ReportStatus::Pending,
                now - TimeDelta::days(3),
                None,
            ),
            report("tech-1", "UNIT-NEW", ReportStatus::Pending, now, None),
            report(
                "tech-1",
                "UNIT-MID",
                ReportStatus::Pending,
                now - TimeDelta::days(1),
                None,
            ),
        ];
        let sorted = ReportFilter::new().apply(&reports, now);
        let units: Vec<&str> = sorted.iter().map(Report::unit_id).collect();
        assert_eq!(units, ["UNIT-NEW", "UNIT-MID", "UNIT-OLD"]);
    }
}
