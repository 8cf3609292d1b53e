use std::sync::Arc;

use actix_web::{
    HttpResponse, Responder,
    error::{ErrorBadRequest, ErrorInternalServerError},
    web,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

use crate::model::report::MonthlyAttendance;
use crate::report::export::{ReportSummary, build_summary, generate_csv};
use crate::report::{compute_monthly_report, validate_month};
use crate::store::mysql::{MySqlAttendanceStore, MySqlEmployeeDirectory};
use crate::utils::date_range::current_month;
use crate::utils::report_cache;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportQuery {
    /// Defaults to the current year.
    pub year: Option<i32>,
    /// 1-12; defaults to the current month.
    pub month: Option<u32>,
}

impl ReportQuery {
    fn resolve(&self) -> (i32, u32) {
        let (current_year, current_month) = current_month();
        (
            self.year.unwrap_or(current_year),
            self.month.unwrap_or(current_month),
        )
    }
}

/// Cache-through load of a month's aggregated report.
async fn load_rows(
    directory: &MySqlEmployeeDirectory,
    store: &MySqlAttendanceStore,
    year: i32,
    month: u32,
) -> actix_web::Result<Arc<Vec<MonthlyAttendance>>> {
    validate_month(month).map_err(|e| ErrorBadRequest(e.to_string()))?;

    if let Some(cached) = report_cache::get(year, month).await {
        return Ok(cached);
    }

    let rows = compute_monthly_report(directory, store, year, month)
        .await
        .map_err(|e| {
            error!(error = %e, year, month, "Failed to build monthly report");
            ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(report_cache::put(year, month, rows).await)
}

/// Monthly aggregate, one entry per roster employee
#[utoipa::path(
    get,
    path = "/api/report/monthly",
    params(
        ("year" = Option<i32>, Query, description = "Report year, defaults to current"),
        ("month" = Option<u32>, Query, description = "Report month 1-12, defaults to current")
    ),
    responses(
        (status = 200, description = "Aggregated month", body = [MonthlyAttendance]),
        (status = 400, description = "Month outside 1-12"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Report"
)]
pub async fn monthly_report(
    query: web::Query<ReportQuery>,
    directory: web::Data<MySqlEmployeeDirectory>,
    store: web::Data<MySqlAttendanceStore>,
) -> actix_web::Result<impl Responder> {
    let (year, month) = query.resolve();
    let rows = load_rows(directory.get_ref(), store.get_ref(), year, month).await?;
    Ok(HttpResponse::Ok().json(&*rows))
}

/// Monthly report as a CSV attachment
#[utoipa::path(
    get,
    path = "/api/report/monthly/csv",
    params(
        ("year" = Option<i32>, Query, description = "Report year, defaults to current"),
        ("month" = Option<u32>, Query, description = "Report month 1-12, defaults to current")
    ),
    responses(
        (status = 200, description = "CSV report", body = String, content_type = "text/csv"),
        (status = 400, description = "Month outside 1-12"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Report"
)]
pub async fn monthly_report_csv(
    query: web::Query<ReportQuery>,
    directory: web::Data<MySqlEmployeeDirectory>,
    store: web::Data<MySqlAttendanceStore>,
) -> actix_web::Result<impl Responder> {
    let (year, month) = query.resolve();
    let rows = load_rows(directory.get_ref(), store.get_ref(), year, month).await?;

    let csv = generate_csv(&rows, year, month).map_err(|e| ErrorBadRequest(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"attendance_{year}_{month:02}.csv\""),
        ))
        .body(csv))
}

/// Summary payload for the client's print view
#[utoipa::path(
    get,
    path = "/api/report/monthly/summary",
    params(
        ("year" = Option<i32>, Query, description = "Report year, defaults to current"),
        ("month" = Option<u32>, Query, description = "Report month 1-12, defaults to current")
    ),
    responses(
        (status = 200, description = "Report summary", body = ReportSummary),
        (status = 400, description = "Month outside 1-12"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Report"
)]
pub async fn monthly_report_summary(
    query: web::Query<ReportQuery>,
    directory: web::Data<MySqlEmployeeDirectory>,
    store: web::Data<MySqlAttendanceStore>,
) -> actix_web::Result<impl Responder> {
    let (year, month) = query.resolve();
    let rows = load_rows(directory.get_ref(), store.get_ref(), year, month).await?;

    let summary = build_summary(&rows, year, month, Utc::now().date_naive())
        .map_err(|e| ErrorBadRequest(e.to_string()))?;

    Ok(HttpResponse::Ok().json(summary))
}
