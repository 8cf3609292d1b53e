pub mod aggregate;
pub mod export;

use chrono::NaiveDate;

use crate::errors::ReportError;
use crate::model::report::MonthlyAttendance;
use crate::store::{AttendanceStore, EmployeeDirectory};
use crate::utils::date_range::days_in_month;

pub fn validate_month(month: u32) -> Result<(), ReportError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ReportError::InvalidMonth(month))
    }
}

/// Fetches the roster and the month's daily records, then aggregates them.
/// One range query per month rather than a query per day.
pub async fn compute_monthly_report(
    directory: &dyn EmployeeDirectory,
    store: &dyn AttendanceStore,
    year: i32,
    month: u32,
) -> anyhow::Result<Vec<MonthlyAttendance>> {
    validate_month(month)?;

    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| anyhow::anyhow!("invalid year/month: {year}-{month}"))?;
    let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
        .expect("last day fits the month");

    let records = store.get_by_date_range(start, end).await?;
    let employees = directory.list_all().await?;

    Ok(aggregate::generate_monthly_report(
        &employees, &records, year, month,
    )?)
}
