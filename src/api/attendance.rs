use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, error::ErrorBadRequest, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

use crate::model::attendance::{AttendanceStatus, DayStatus};
use crate::session::DailySession;
use crate::store::EmployeeDirectory;
use crate::store::mysql::{MySqlAttendanceStore, MySqlEmployeeDirectory};
use crate::utils::date_range::month_of;
use crate::utils::report_cache;

#[derive(Deserialize, ToSchema)]
pub struct MarkDayRequest {
    /// employee id -> status; entries omitted here stay untouched in the
    /// stored record (merge write).
    #[schema(value_type = Object, example = json!({"1": "present", "2": "absent"}))]
    pub records: HashMap<u64, AttendanceStatus>,
}

#[derive(Deserialize, ToSchema)]
pub struct MarkAllRequest {
    #[schema(example = "present")]
    pub status: AttendanceStatus,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeDayStatus {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "unmarked")]
    pub status: DayStatus,
}

#[derive(Serialize, ToSchema)]
pub struct DayView {
    #[schema(example = "2025-03-10", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = 5)]
    pub present: usize,
    #[schema(example = 2)]
    pub absent: usize,
    #[schema(example = 3)]
    pub unmarked: usize,
    pub entries: Vec<EmployeeDayStatus>,
}

fn parse_date(raw: &str) -> actix_web::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ErrorBadRequest("Invalid date, expected YYYY-MM-DD"))
}

/// Day view for the marking screen: tri-state per roster employee
#[utoipa::path(
    get,
    path = "/api/attendance/{date}",
    params(("date", Path, description = "Calendar date, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Attendance state for the date", body = DayView),
        (status = 400, description = "Malformed date"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn get_day(
    path: web::Path<String>,
    directory: web::Data<MySqlEmployeeDirectory>,
    store: web::Data<MySqlAttendanceStore>,
) -> actix_web::Result<impl Responder> {
    let date = parse_date(&path.into_inner())?;

    let roster = directory.list_all().await.map_err(|e| {
        error!(error = %e, %date, "Failed to load roster");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let session = DailySession::open(store.get_ref(), roster, date)
        .await
        .map_err(|e| {
            error!(error = %e, %date, "Failed to load attendance");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let entries: Vec<EmployeeDayStatus> = session
        .roster()
        .iter()
        .map(|employee| EmployeeDayStatus {
            employee_id: employee.id,
            name: employee.name.clone(),
            status: session.status_of(employee.id),
        })
        .collect();

    let mut present = 0;
    let mut absent = 0;
    let mut unmarked = 0;
    for entry in &entries {
        match entry.status {
            DayStatus::Present => present += 1,
            DayStatus::Absent => absent += 1,
            DayStatus::Unmarked => unmarked += 1,
        }
    }

    Ok(HttpResponse::Ok().json(DayView {
        date,
        present,
        absent,
        unmarked,
        entries,
    }))
}

/// Save a day's worth of markings (merge write)
#[utoipa::path(
    post,
    path = "/api/attendance/{date}",
    params(("date", Path, description = "Calendar date, YYYY-MM-DD")),
    request_body = MarkDayRequest,
    responses(
        (status = 200, description = "Attendance saved", body = Object, example = json!({
            "message": "Attendance saved",
            "marked": 12
        })),
        (status = 400, description = "Malformed date"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Save failed; nothing was persisted")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn mark_day(
    path: web::Path<String>,
    payload: web::Json<MarkDayRequest>,
    directory: web::Data<MySqlEmployeeDirectory>,
    store: web::Data<MySqlAttendanceStore>,
) -> actix_web::Result<impl Responder> {
    let date = parse_date(&path.into_inner())?;

    let roster = directory.list_all().await.map_err(|e| {
        error!(error = %e, %date, "Failed to load roster");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let mut session = DailySession::open(store.get_ref(), roster, date)
        .await
        .map_err(|e| {
            error!(error = %e, %date, "Failed to load attendance");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    for (employee_id, status) in &payload.records {
        session.set_status(*employee_id, *status);
    }

    if let Err(e) = session.save().await {
        error!(error = %e, %date, "Failed to save attendance");
        return Ok(HttpResponse::InternalServerError().json(json!({
            "message": "Failed to save attendance"
        })));
    }

    let (year, month) = month_of(date);
    report_cache::invalidate(year, month).await;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Attendance saved",
        "marked": payload.records.len()
    })))
}

/// Mark every roster employee present or absent for the date
#[utoipa::path(
    post,
    path = "/api/attendance/{date}/mark-all",
    params(("date", Path, description = "Calendar date, YYYY-MM-DD")),
    request_body = MarkAllRequest,
    responses(
        (status = 200, description = "Attendance saved", body = Object, example = json!({
            "message": "Attendance saved",
            "marked": 25
        })),
        (status = 400, description = "Malformed date"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Save failed; nothing was persisted")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn mark_all(
    path: web::Path<String>,
    payload: web::Json<MarkAllRequest>,
    directory: web::Data<MySqlEmployeeDirectory>,
    store: web::Data<MySqlAttendanceStore>,
) -> actix_web::Result<impl Responder> {
    let date = parse_date(&path.into_inner())?;

    let roster = directory.list_all().await.map_err(|e| {
        error!(error = %e, %date, "Failed to load roster");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let mut session = DailySession::open(store.get_ref(), roster, date)
        .await
        .map_err(|e| {
            error!(error = %e, %date, "Failed to load attendance");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match payload.status {
        AttendanceStatus::Present => session.mark_all_present(),
        AttendanceStatus::Absent => session.mark_all_absent(),
    }

    let marked = session.working_set().len();

    if let Err(e) = session.save().await {
        error!(error = %e, %date, "Failed to save attendance");
        return Ok(HttpResponse::InternalServerError().json(json!({
            "message": "Failed to save attendance"
        })));
    }

    let (year, month) = month_of(date);
    report_cache::invalidate(year, month).await;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Attendance saved",
        "marked": marked
    })))
}
