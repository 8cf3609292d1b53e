//! Serializes a monthly report into the CSV wire format and the structured
//! summary payload consumed by the client's print view.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::ReportError;
use crate::model::attendance::AttendanceStatus;
use crate::model::report::MonthlyAttendance;
use crate::report::validate_month;
use crate::utils::date_range::{days_in_month, month_dates};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// `month` must be 1..=12, as established by [`validate_month`].
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month - 1) as usize]
}

/// Renders the report as CSV: the six summary columns followed by one
/// `Day N` column per calendar day. Row order follows the input, which the
/// aggregation already sorted by name. Output is byte-stable for identical
/// input.
pub fn generate_csv(
    rows: &[MonthlyAttendance],
    year: i32,
    month: u32,
) -> Result<String, ReportError> {
    validate_month(month)?;

    let days = days_in_month(year, month);
    let dates = month_dates(year, month);

    let mut headers: Vec<String> = [
        "Employee Name",
        "Department",
        "Total Days",
        "Present Days",
        "Absent Days",
        "Attendance %",
    ]
    .iter()
    .map(|h| h.to_string())
    .collect();
    for day in 1..=days {
        headers.push(format!("Day {day}"));
    }

    let mut csv = String::new();
    let _ = writeln!(csv, "{}", headers.join(","));

    for row in rows {
        let mut cells = vec![
            format!("\"{}\"", row.employee_name),
            format!("\"{}\"", row.department),
            row.total_days.to_string(),
            row.present_days.to_string(),
            row.absent_days.to_string(),
            format!("{:.1}%", row.attendance_percentage),
        ];

        // A gap here cannot happen for aggregation output, but the exporter
        // tolerates it rather than failing the whole report.
        for date in &dates {
            let status = row
                .daily_records
                .get(date)
                .copied()
                .unwrap_or(AttendanceStatus::Absent);
            cells.push(
                match status {
                    AttendanceStatus::Present => "Present",
                    AttendanceStatus::Absent => "Absent",
                }
                .to_string(),
            );
        }

        let _ = writeln!(csv, "{}", cells.join(","));
    }

    Ok(csv)
}

/// Summary payload for the print/PDF layer: headline fields, per-employee
/// rows without the daily breakdown, and roster-wide counters.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportSummary {
    #[schema(example = "Attendance Report - March 2025")]
    pub title: String,
    #[schema(example = "Generated on 2025-04-01")]
    pub subtitle: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub totals: SummaryTotals,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SummaryTotals {
    #[schema(example = 12)]
    pub total_employees: usize,
    /// Mean of the per-employee percentages, 0 for an empty roster.
    #[schema(example = 87.5)]
    pub average_attendance: f64,
    /// Employees at or above 90%.
    #[schema(example = 4)]
    pub high_performers: usize,
    /// Employees below 70%.
    #[schema(example = 2)]
    pub low_performers: usize,
}

/// `generated_on` is passed in rather than read from the clock so identical
/// report data always produces identical output.
pub fn build_summary(
    rows: &[MonthlyAttendance],
    year: i32,
    month: u32,
    generated_on: NaiveDate,
) -> Result<ReportSummary, ReportError> {
    validate_month(month)?;

    let average = if rows.is_empty() {
        0.0
    } else {
        rows.iter().map(|r| r.attendance_percentage).sum::<f64>() / rows.len() as f64
    };

    Ok(ReportSummary {
        title: format!("Attendance Report - {} {}", month_name(month), year),
        subtitle: format!("Generated on {generated_on}"),
        headers: [
            "Employee Name",
            "Total Days",
            "Present Days",
            "Absent Days",
            "Attendance Rate",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect(),
        rows: rows
            .iter()
            .map(|r| {
                vec![
                    r.employee_name.clone(),
                    r.total_days.to_string(),
                    r.present_days.to_string(),
                    r.absent_days.to_string(),
                    format!("{:.1}%", r.attendance_percentage),
                ]
            })
            .collect(),
        totals: SummaryTotals {
            total_employees: rows.len(),
            average_attendance: (average * 100.0).round() / 100.0,
            high_performers: rows
                .iter()
                .filter(|r| r.attendance_percentage >= 90.0)
                .count(),
            low_performers: rows
                .iter()
                .filter(|r| r.attendance_percentage < 70.0)
                .count(),
        },
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn sample_row(name: &str, present: u32, total: u32) -> MonthlyAttendance {
        let percentage = present as f64 / total as f64 * 100.0;
        MonthlyAttendance {
            employee_id: 1,
            employee_name: name.to_string(),
            department: "Operations".to_string(),
            total_days: total,
            present_days: present,
            absent_days: total - present,
            attendance_percentage: (percentage * 100.0).round() / 100.0,
            daily_records: BTreeMap::new(),
        }
    }

    #[test]
    fn header_has_one_column_per_day() {
        let csv = generate_csv(&[], 2025, 2).unwrap();
        let header = csv.lines().next().unwrap();
        let fields: Vec<_> = header.split(',').collect();
        assert_eq!(fields.len(), 6 + 28);
        assert_eq!(*fields.last().unwrap(), "Day 28");
        assert_eq!(fields[0], "Employee Name");
    }

    #[test]
    fn rows_quote_name_and_department() {
        let mut row = sample_row("Alice Smith", 2, 28);
        row.daily_records.insert(
            "2025-02-01".parse().unwrap(),
            AttendanceStatus::Present,
        );
        row.daily_records.insert(
            "2025-02-02".parse().unwrap(),
            AttendanceStatus::Present,
        );

        let csv = generate_csv(&[row], 2025, 2).unwrap();
        let line = csv.lines().nth(1).unwrap();
        let cells: Vec<_> = line.split(',').collect();

        assert_eq!(cells[0], "\"Alice Smith\"");
        assert_eq!(cells[1], "\"Operations\"");
        assert_eq!(cells[2], "28");
        assert_eq!(cells[3], "2");
        assert_eq!(cells[4], "26");
        assert_eq!(cells[5], "7.1%");
        assert_eq!(cells[6], "Present");
        assert_eq!(cells[7], "Present");
        // Missing date keys render as Absent instead of failing.
        assert_eq!(cells[8], "Absent");
        assert_eq!(cells.len(), 6 + 28);
    }

    #[test]
    fn output_is_byte_identical_for_identical_input() {
        let rows = vec![sample_row("Alice", 10, 31), sample_row("Bob", 31, 31)];
        assert_eq!(
            generate_csv(&rows, 2025, 3).unwrap(),
            generate_csv(&rows, 2025, 3).unwrap()
        );
    }

    #[test]
    fn csv_rejects_out_of_range_month() {
        assert!(generate_csv(&[], 2025, 13).is_err());
        assert!(generate_csv(&[], 2025, 0).is_err());
    }

    #[test]
    fn summary_counts_performance_bands() {
        let rows = vec![
            sample_row("Alice", 31, 31), // 100.0
            sample_row("Bob", 28, 31),   // 90.32
            sample_row("Cara", 20, 31),  // 64.52
        ];
        let generated = "2025-04-01".parse().unwrap();
        let summary = build_summary(&rows, 2025, 3, generated).unwrap();

        assert_eq!(summary.title, "Attendance Report - March 2025");
        assert_eq!(summary.subtitle, "Generated on 2025-04-01");
        assert_eq!(summary.totals.total_employees, 3);
        assert_eq!(summary.totals.high_performers, 2);
        assert_eq!(summary.totals.low_performers, 1);
        assert_eq!(summary.totals.average_attendance, 84.95);
        assert_eq!(summary.rows.len(), 3);
        assert_eq!(summary.rows[0][0], "Alice");
        assert_eq!(summary.rows[0][4], "100.0%");
    }

    #[test]
    fn summary_of_empty_roster_is_zeroed() {
        let generated = "2025-04-01".parse().unwrap();
        let summary = build_summary(&[], 2025, 3, generated).unwrap();
        assert_eq!(summary.totals.total_employees, 0);
        assert_eq!(summary.totals.average_attendance, 0.0);
        assert!(summary.rows.is_empty());
    }
}
