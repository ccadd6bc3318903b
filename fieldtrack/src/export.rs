//! CSV rendering of report selections.
//!
//! The caller picks and orders the reports (usually through
//! [`ReportFilter`](crate::domain::ReportFilter)); this module only
//! serializes them. Fields containing the delimiter, quotes, or newlines
//! are RFC-4180 quoted by the writer, so free-text descriptions can never
//! corrupt the row structure.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::Report;

/// Fixed header of every export.
pub const EXPORT_COLUMNS: [&str; 11] = [
    "Report ID",
    "Technician",
    "Badge Number",
    "Unit ID",
    "Location",
    "Device ID",
    "Card Number",
    "Status",
    "Date",
    "Description",
    "Notes",
];

/// Errors surfaced while rendering an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The CSV writer refused a record or could not be finalized.
    #[error("csv rendering failed: {message}")]
    Render { message: String },
}

impl ExportError {
    fn render(message: impl ToString) -> Self {
        Self::Render {
            message: message.to_string(),
        }
    }
}

/// Render an ordered report selection as CSV text.
///
/// An empty selection yields the header row only. Dates are formatted
/// `yyyy-MM-dd`; absent optional fields become empty strings.
pub fn render_csv(reports: &[Report]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(EXPORT_COLUMNS)
        .map_err(ExportError::render)?;
    for report in reports {
        let date = report.date().format("%Y-%m-%d").to_string();
        writer
            .write_record([
                report.id().as_str(),
                report.technician_name(),
                report.badge_number(),
                report.unit_id(),
                report.location_name(),
                report.device_id(),
                report.card_number(),
                report.status().as_str(),
                date.as_str(),
                report.description().unwrap_or(""),
                report.notes().unwrap_or(""),
            ])
            .map_err(ExportError::render)?;
    }
    let bytes = writer.into_inner().map_err(ExportError::render)?;
    String::from_utf8(bytes).map_err(ExportError::render)
}

/// File name for an export produced on `date`:
/// `reports_export_<ISO-date>.csv`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("reports_export_{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{LocationId, NewReport, ReportStatus, UserId};
    use chrono::{DateTime, TimeZone, Utc};

    fn fixture_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn fixture_report(notes: Option<&str>) -> Report {
        let draft = NewReport {
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
            notes: notes.map(str::to_owned),
        };
        Report::from_draft(draft, fixture_now()).expect("valid fixture report")
    }

    #[test]
    fn empty_selection_renders_the_header_only() {
        let csv = render_csv(&[]).expect("rendering succeeds");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            ["Report ID,Technician,Badge Number,Unit ID,Location,Device ID,Card Number,Status,Date,Description,Notes"]
        );
    }

    #[test]
    fn rows_carry_formatted_dates_and_empty_optionals() {
        let report = fixture_report(None);
        let csv = render_csv(&[report.clone()]).expect("rendering succeeds");
        let row = csv.lines().nth(1).expect("one data row");
        assert!(row.starts_with(report.id().as_str()));
        assert!(row.contains(",2026-03-14,"));
        assert!(row.ends_with("Regular maintenance check completed,"));
    }

    #[test]
    fn embedded_delimiters_are_quoted_not_corrupting() {
        let report = fixture_report(Some("wear, tear, and \"noise\""));
        let csv = render_csv(&[report]).expect("rendering succeeds");
        let row = csv.lines().nth(1).expect("one data row");
        assert!(row.ends_with("\"wear, tear, and \"\"noise\"\"\""));
        // The quoted field keeps the logical column count intact.
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let record = reader
            .records()
            .next()
            .expect("one record")
            .expect("record parses");
        assert_eq!(record.len(), EXPORT_COLUMNS.len());
        assert_eq!(record.get(10), Some("wear, tear, and \"noise\""));
    }

    #[test]
    fn filename_embeds_the_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date");
        assert_eq!(export_filename(date), "reports_export_2026-03-14.csv");
    }
}
