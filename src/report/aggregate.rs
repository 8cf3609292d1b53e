//! Turns sparse daily records into per-employee monthly statistics.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::errors::ReportError;
use crate::model::attendance::{AttendanceStatus, DailyRecord};
use crate::model::employee::Employee;
use crate::model::report::MonthlyAttendance;
use crate::report::validate_month;
use crate::utils::date_range::month_dates;

/// Builds one [`MonthlyAttendance`] per roster employee for `(year, month)`,
/// sorted by display name.
///
/// `records_by_date` may be missing any date (treated as an empty day) and may
/// carry dates outside the month (ignored). An employee with no entry for a
/// date counts as absent; this is the historical-aggregation default, distinct
/// from the live "unmarked" view in the editing session.
pub fn generate_monthly_report(
    employees: &[Employee],
    records_by_date: &HashMap<NaiveDate, DailyRecord>,
    year: i32,
    month: u32,
) -> Result<Vec<MonthlyAttendance>, ReportError> {
    validate_month(month)?;

    let dates = month_dates(year, month);
    let total_days = dates.len() as u32;

    let mut report: Vec<MonthlyAttendance> = employees
        .iter()
        .map(|employee| {
            let mut present_days = 0u32;
            let mut daily_records = BTreeMap::new();

            for date in &dates {
                let status = records_by_date
                    .get(date)
                    .and_then(|day| day.get(&employee.id))
                    .copied()
                    .unwrap_or(AttendanceStatus::Absent);

                if status == AttendanceStatus::Present {
                    present_days += 1;
                }
                daily_records.insert(*date, status);
            }

            let absent_days = total_days - present_days;
            let percentage = if total_days > 0 {
                present_days as f64 / total_days as f64 * 100.0
            } else {
                0.0
            };

            MonthlyAttendance {
                employee_id: employee.id,
                employee_name: employee.name.clone(),
                department: employee.department.clone(),
                total_days,
                present_days,
                absent_days,
                attendance_percentage: round2(percentage),
                daily_records,
            }
        })
        .collect();

    report.sort_by(|a, b| a.employee_name.cmp(&b.employee_name));
    Ok(report)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn sample_employee(id: u64, name: &str) -> Employee {
        let created = NaiveDateTime::parse_from_str("2024-01-01 09:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        Employee {
            id,
            employee_code: format!("EMP-{id:03}"),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            department: "Operations".to_string(),
            position: "Associate".to_string(),
            created_at: created,
            updated_at: created,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn unmarked_days_default_to_absent() {
        let employees = vec![sample_employee(1, "Alice"), sample_employee(2, "Bob")];
        let mut records = HashMap::new();
        records.insert(
            date("2025-03-01"),
            DailyRecord::from([(1, AttendanceStatus::Present)]),
        );

        let report = generate_monthly_report(&employees, &records, 2025, 3).unwrap();

        assert_eq!(report.len(), 2);
        let alice = &report[0];
        assert_eq!(alice.employee_name, "Alice");
        assert_eq!(alice.total_days, 31);
        assert_eq!(alice.present_days, 1);
        assert_eq!(alice.absent_days, 30);
        assert_eq!(alice.attendance_percentage, 3.23);

        let bob = &report[1];
        assert_eq!(bob.present_days, 0);
        assert_eq!(bob.absent_days, 31);
        assert_eq!(bob.attendance_percentage, 0.0);
    }

    #[test]
    fn daily_records_cover_the_full_month_exactly() {
        let employees = vec![sample_employee(1, "Alice")];
        let report = generate_monthly_report(&employees, &HashMap::new(), 2024, 2).unwrap();

        let days: Vec<_> = report[0].daily_records.keys().collect();
        assert_eq!(days.len(), 29);
        assert_eq!(days.first().unwrap().to_string(), "2024-02-01");
        assert_eq!(days.last().unwrap().to_string(), "2024-02-29");
    }

    #[test]
    fn present_plus_absent_equals_total() {
        let employees = vec![sample_employee(1, "Alice"), sample_employee(2, "Bob")];
        let mut records = HashMap::new();
        for day in ["2025-06-02", "2025-06-03", "2025-06-10"] {
            records.insert(
                date(day),
                DailyRecord::from([
                    (1, AttendanceStatus::Present),
                    (2, AttendanceStatus::Absent),
                ]),
            );
        }

        let report = generate_monthly_report(&employees, &records, 2025, 6).unwrap();
        for entry in &report {
            assert_eq!(entry.present_days + entry.absent_days, entry.total_days);
            assert_eq!(entry.total_days, 30);
        }
    }

    #[test]
    fn dates_outside_the_month_are_ignored() {
        let employees = vec![sample_employee(1, "Alice")];
        let mut records = HashMap::new();
        records.insert(
            date("2025-02-28"),
            DailyRecord::from([(1, AttendanceStatus::Present)]),
        );
        records.insert(
            date("2025-04-01"),
            DailyRecord::from([(1, AttendanceStatus::Present)]),
        );

        let report = generate_monthly_report(&employees, &records, 2025, 3).unwrap();
        assert_eq!(report[0].present_days, 0);
    }

    #[test]
    fn empty_roster_yields_empty_report() {
        let report = generate_monthly_report(&[], &HashMap::new(), 2025, 3).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn entries_sort_by_display_name() {
        let employees = vec![sample_employee(1, "Zed"), sample_employee(2, "Amy")];
        let report = generate_monthly_report(&employees, &HashMap::new(), 2025, 3).unwrap();
        assert_eq!(report[0].employee_name, "Amy");
        assert_eq!(report[1].employee_name, "Zed");
    }

    #[test]
    fn out_of_range_month_is_rejected() {
        let err = generate_monthly_report(&[], &HashMap::new(), 2025, 13).unwrap_err();
        assert_eq!(err, ReportError::InvalidMonth(13));
        assert!(generate_monthly_report(&[], &HashMap::new(), 2025, 0).is_err());
    }

    #[test]
    fn identical_inputs_yield_identical_reports() {
        let employees = vec![sample_employee(1, "Alice"), sample_employee(2, "Bob")];
        let mut records = HashMap::new();
        records.insert(
            date("2025-03-05"),
            DailyRecord::from([
                (1, AttendanceStatus::Present),
                (2, AttendanceStatus::Present),
            ]),
        );

        let first = generate_monthly_report(&employees, &records, 2025, 3).unwrap();
        let second = generate_monthly_report(&employees, &records, 2025, 3).unwrap();
        assert_eq!(first, second);
    }
}
