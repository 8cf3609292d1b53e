use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::model::attendance::DayStatus;
use crate::session::DailySession;
use crate::store::mysql::{MySqlAttendanceStore, MySqlEmployeeDirectory};
use crate::store::EmployeeDirectory;
use crate::utils::date_range::current_month;
use crate::utils::report_cache;

#[derive(Serialize, ToSchema)]
pub struct DashboardStats {
    #[schema(example = "2025-03-10", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = 25)]
    pub total_employees: usize,
    #[schema(example = 18)]
    pub present_today: usize,
    #[schema(example = 3)]
    pub absent_today: usize,
    /// Roster members nobody has marked yet today; distinct from absent.
    #[schema(example = 4)]
    pub unmarked_today: usize,
    /// Mean attendance percentage for the current month, if already computed.
    #[schema(example = 87.5, nullable = true)]
    pub month_average_attendance: Option<f64>,
}

/// Today's headline numbers for the dashboard screen
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Today's attendance counters", body = DashboardStats),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn dashboard(
    directory: web::Data<MySqlEmployeeDirectory>,
    store: web::Data<MySqlAttendanceStore>,
) -> actix_web::Result<impl Responder> {
    let today = Utc::now().date_naive();

    let roster = directory.list_all().await.map_err(|e| {
        error!(error = %e, "Failed to load roster");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let session = DailySession::open(store.get_ref(), roster, today)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to load today's attendance");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let mut present = 0;
    let mut absent = 0;
    let mut unmarked = 0;
    for employee in session.roster() {
        match session.status_of(employee.id) {
            DayStatus::Present => present += 1,
            DayStatus::Absent => absent += 1,
            DayStatus::Unmarked => unmarked += 1,
        }
    }

    // Opportunistic: only reported when the month is already cached, the
    // dashboard never triggers a full aggregation by itself.
    let (year, month) = current_month();
    let month_average_attendance = report_cache::get(year, month).await.map(|rows| {
        if rows.is_empty() {
            0.0
        } else {
            let sum: f64 = rows.iter().map(|r| r.attendance_percentage).sum();
            (sum / rows.len() as f64 * 100.0).round() / 100.0
        }
    });

    Ok(HttpResponse::Ok().json(DashboardStats {
        date: today,
        total_employees: session.roster().len(),
        present_today: present,
        absent_today: absent,
        unmarked_today: unmarked,
        month_average_attendance,
    }))
}
