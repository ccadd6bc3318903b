//! Dashboard aggregations over report snapshots.
//!
//! Concrete typed records instead of loose maps, computed on demand from a
//! snapshot the caller already scoped (for example with
//! [`ReportFilter::for_technician`](super::query::ReportFilter::for_technician)).

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

use super::report::{Report, ReportStatus};
use super::user::UserId;

/// How many unit rows the dashboard keeps.
pub const TOP_UNIT_LIMIT: usize = 5;

/// How many trailing calendar months the monthly tally covers.
pub const TRAILING_MONTHS: u32 = 6;

/// Report counts per review status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTally {
    /// Reports awaiting review.
    pub pending: usize,
    /// Accepted reports.
    pub completed: usize,
    /// Refused reports.
    pub rejected: usize,
}

impl StatusTally {
    /// Count a snapshot by status.
    pub fn of(reports: &[Report]) -> Self {
        let mut tally = Self::default();
        for report in reports {
            match report.status() {
                ReportStatus::Pending => tally.pending += 1,
                ReportStatus::Completed => tally.completed += 1,
                ReportStatus::Rejected => tally.rejected += 1,
            }
        }
        tally
    }

    /// Count for a single status.
    pub fn count(&self, status: ReportStatus) -> usize {
        match status {
            ReportStatus::Pending => self.pending,
            ReportStatus::Completed => self.completed,
            ReportStatus::Rejected => self.rejected,
        }
    }

    /// Total across all statuses.
    pub fn total(&self) -> usize {
        self.pending + self.completed + self.rejected
    }
}

/// Report count for one technician.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechnicianTally {
    /// Technician account id.
    pub technician_id: UserId,
    /// Display name snapshot taken from the counted reports.
    pub technician_name: String,
    /// Number of reports submitted.
    pub count: usize,
}

/// Count reports per technician, most active first.
///
/// Ties order by display name so equal counts are deterministic.
pub fn technician_tallies(reports: &[Report]) -> Vec<TechnicianTally> {
    let mut counts: BTreeMap<&UserId, (usize, &str)> = BTreeMap::new();
    for report in reports {
        let entry = counts
            .entry(report.technician_id())
            .or_insert((0, report.technician_name()));
        entry.0 += 1;
    }
    let mut tallies: Vec<TechnicianTally> = counts
        .into_iter()
        .map(|(id, (count, name))| TechnicianTally {
            technician_id: id.clone(),
            technician_name: name.to_owned(),
            count,
        })
        .collect();
    tallies.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.technician_name.cmp(&b.technician_name))
    });
    tallies
}

/// Report count for one serviced unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitTally {
    /// Unit identifier.
    pub unit_id: String,
    /// Number of reports referencing the unit.
    pub count: usize,
}

/// Count reports per unit, most serviced first; ties order by unit id.
pub fn unit_tallies(reports: &[Report]) -> Vec<UnitTally> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for report in reports {
        *counts.entry(report.unit_id()).or_insert(0) += 1;
    }
    let mut tallies: Vec<UnitTally> = counts
        .into_iter()
        .map(|(unit_id, count)| UnitTally {
            unit_id: unit_id.to_owned(),
            count,
        })
        .collect();
    tallies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.unit_id.cmp(&b.unit_id)));
    tallies
}

/// The [`TOP_UNIT_LIMIT`] most serviced units.
pub fn top_unit_tallies(reports: &[Report]) -> Vec<UnitTally> {
    let mut tallies = unit_tallies(reports);
    tallies.truncate(TOP_UNIT_LIMIT);
    tallies
}

/// Report count for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTally {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-based.
    pub month: u32,
    /// Abbreviated month label for chart axes.
    pub label: String,
    /// Number of reports dated in the month.
    pub count: usize,
}

/// Count reports per month over the trailing [`TRAILING_MONTHS`] calendar
/// months, oldest first and current month last. Months without reports are
/// present with a zero count.
pub fn monthly_tallies(reports: &[Report], now: DateTime<Utc>) -> Vec<MonthlyTally> {
    let today = now.date_naive();
    let current_month =
        NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
    (0..TRAILING_MONTHS)
        .rev()
        .map(|offset| {
            let month_start = current_month
                .checked_sub_months(Months::new(offset))
                .unwrap_or(current_month);
            let count = reports
                .iter()
                .filter(|report| {
                    let date = report.date().date_naive();
                    date.year() == month_start.year() && date.month() == month_start.month()
                })
                .count();
            MonthlyTally {
                year: month_start.year(),
                month: month_start.month(),
                label: month_start.format("%b").to_string(),
                count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::location::LocationId;
    use crate::domain::report::NewReport;
    use chrono::{TimeDelta, TimeZone};

    fn fixture_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn report(
        technician: &str,
        name: &str,
        unit: &str,
        status: ReportStatus,
        date: DateTime<Utc>,
    ) -> Report {
        let draft = NewReport {
            technician_id: UserId::new(technician).expect("valid id"),
            technician_name: name.to_owned(),
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
            notes: None,
        };
        Report::from_draft(draft, date).expect("valid fixture report")
    }

    #[test]
    fn status_tally_counts_every_bucket() {
        let now = fixture_now();
        let reports = vec![
            report("tech-1", "One", "UNIT-001", ReportStatus::Pending, now),
            report("tech-1", "One", "UNIT-002", ReportStatus::Pending, now),
            report("tech-2", "Two", "UNIT-003", ReportStatus::Completed, now),
            report("tech-2", "Two", "UNIT-004", ReportStatus::Rejected, now),
        ];
        let tally = StatusTally::of(&reports);
        assert_eq!(tally.pending, 2);
        assert_eq!(tally.completed, 1);
        assert_eq!(tally.rejected, 1);
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn technician_tallies_sort_by_count_descending() {
        let now = fixture_now();
        let reports = vec![
            report("tech-2", "Technician Two", "UNIT-001", ReportStatus::Pending, now),
            report("tech-2", "Technician Two", "UNIT-002", ReportStatus::Pending, now),
            report("tech-1", "Technician One", "UNIT-003", ReportStatus::Pending, now),
        ];
        let tallies = technician_tallies(&reports);
        let names: Vec<&str> = tallies
            .iter()
            .map(|tally| tally.technician_name.as_str())
            .collect();
        assert_eq!(names, ["Technician Two", "Technician One"]);
        assert_eq!(tallies.first().map(|tally| tally.count), Some(2));
    }

    #[test]
    fn unit_tallies_truncate_to_the_top_five() {
        let now = fixture_now();
        let mut reports = Vec::new();
        for index in 0..7_usize {
            for _ in 0..=index {
                reports.push(report(
                    "tech-1",
                    "Technician One",
                    &format!("UNIT-{index:03}"),
                    ReportStatus::Pending,
                    now,
                ));
            }
        }
        let top = top_unit_tallies(&reports);
        assert_eq!(top.len(), TOP_UNIT_LIMIT);
        assert_eq!(top.first().map(|tally| tally.unit_id.as_str()), Some("UNIT-006"));
        assert_eq!(top.first().map(|tally| tally.count), Some(7));
    }

    #[test]
    fn monthly_tallies_include_empty_months() {
        let now = fixture_now();
        let reports = vec![
            report("tech-1", "One", "UNIT-001", ReportStatus::Pending, now),
            report(
                "tech-1",
                "One",
                "UNIT-002",
                ReportStatus::Pending,
                now - TimeDelta::days(65),
            ),
        ];
        let tallies = monthly_tallies(&reports, now);
        assert_eq!(tallies.len(), TRAILING_MONTHS as usize);
        assert_eq!(tallies.last().map(|tally| tally.count), Some(1));
        let total: usize = tallies.iter().map(|tally| tally.count).sum();
        assert_eq!(total, 2);
        assert!(tallies.iter().any(|tally| tally.count == 0));
        assert_eq!(tallies.last().map(|tally| tally.label.as_str()), Some("Mar"));
    }
}
