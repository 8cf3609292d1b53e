use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use moka::future::Cache;
use once_cell::sync::Lazy;

use crate::model::report::MonthlyAttendance;
use crate::report::compute_monthly_report;
use crate::store::{AttendanceStore, EmployeeDirectory};
use crate::utils::date_range::current_month;

/// Computed monthly reports keyed by (year, month). Saving attendance for a
/// date invalidates that date's month, so a short TTL only has to cover
/// roster edits made outside this service.
static REPORT_CACHE: Lazy<Cache<(i32, u32), Arc<Vec<MonthlyAttendance>>>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(120)
        .time_to_live(Duration::from_secs(600))
        .build()
});

pub async fn get(year: i32, month: u32) -> Option<Arc<Vec<MonthlyAttendance>>> {
    REPORT_CACHE.get(&(year, month)).await
}

pub async fn put(year: i32, month: u32, report: Vec<MonthlyAttendance>) -> Arc<Vec<MonthlyAttendance>> {
    let report = Arc::new(report);
    REPORT_CACHE.insert((year, month), report.clone()).await;
    report
}

pub async fn invalidate(year: i32, month: u32) {
    REPORT_CACHE.invalidate(&(year, month)).await;
}

/// Precomputes the current month's report so the first dashboard/report hit
/// after startup does not pay for the full aggregation.
pub async fn warmup_report_cache(
    directory: &dyn EmployeeDirectory,
    store: &dyn AttendanceStore,
) -> Result<()> {
    let (year, month) = current_month();
    let report = compute_monthly_report(directory, store, year, month).await?;
    let employees = report.len();

    put(year, month, report).await;

    log::info!(
        "Report cache warmup complete: {} employees for {}-{:02}",
        employees,
        year,
        month
    );

    Ok(())
}
