use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::attendance::AttendanceStatus;

/// Per-employee monthly aggregate. Derived on demand from the daily records
/// plus a roster snapshot; never persisted.
///
/// `daily_records` always covers every calendar date of the requested month,
/// with unmarked days already collapsed to `Absent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyAttendance {
    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = "John Doe")]
    pub employee_name: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = 31)]
    pub total_days: u32,

    #[schema(example = 22)]
    pub present_days: u32,

    #[schema(example = 9)]
    pub absent_days: u32,

    /// present / total * 100, rounded to two decimals.
    #[schema(example = 70.97)]
    pub attendance_percentage: f64,

    #[schema(value_type = Object)]
    pub daily_records: BTreeMap<NaiveDate, AttendanceStatus>,
}
