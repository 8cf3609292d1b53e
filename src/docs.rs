use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

use crate::api::attendance::{DayView, EmployeeDayStatus, MarkAllRequest, MarkDayRequest};
use crate::api::dashboard::DashboardStats;
use crate::api::employee::{CreateEmployee, EmployeeQuery, UpdateEmployee};
use crate::api::report::ReportQuery;
use crate::auth::handlers::LoginResponse;
use crate::model::attendance::{AttendanceStatus, DayStatus};
use crate::model::employee::Employee;
use crate::model::report::MonthlyAttendance;
use crate::report::export::{ReportSummary, SummaryTotals};
use crate::store::EmployeePage;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AttendIt API",
        version = "1.0.0",
        description = r#"
## AttendIt — daily attendance tracking

Backend for a mobile attendance client: mark a single present/absent status
per employee per day, then pull monthly aggregate reports.

### Key Features
- **Employee Directory**
  - Create, update, list (paginated + searchable) and delete employees
- **Daily Attendance**
  - Per-day marking with merge-safe saves and bulk mark-all helpers
- **Monthly Reports**
  - Per-employee aggregates, CSV export and a print-ready summary
- **Dashboard**
  - Today's present / absent / unmarked counters

### Security
All non-auth endpoints require **JWT Bearer authentication**.
Roster mutations are restricted to the **Admin** role.
"#,
    ),
    paths(
        crate::auth::handlers::register,
        crate::auth::handlers::login,
        crate::auth::handlers::refresh_token,
        crate::auth::handlers::logout,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::get_day,
        crate::api::attendance::mark_day,
        crate::api::attendance::mark_all,

        crate::api::report::monthly_report,
        crate::api::report::monthly_report_csv,
        crate::api::report::monthly_report_summary,

        crate::api::dashboard::dashboard,
    ),
    components(
        schemas(
            Employee,
            EmployeePage,
            CreateEmployee,
            UpdateEmployee,
            EmployeeQuery,
            AttendanceStatus,
            DayStatus,
            DayView,
            EmployeeDayStatus,
            MarkDayRequest,
            MarkAllRequest,
            MonthlyAttendance,
            ReportQuery,
            ReportSummary,
            SummaryTotals,
            DashboardStats,
            LoginResponse
        )
    ),
    tags(
        (name = "Auth", description = "Authentication APIs"),
        (name = "Employee", description = "Employee directory APIs"),
        (name = "Attendance", description = "Daily attendance APIs"),
        (name = "Report", description = "Monthly report APIs"),
        (name = "Dashboard", description = "Dashboard APIs"),
    ),
    modifiers(&BearerAuth)
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
