use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Persisted per-day status. A day that was never saved has no row at all;
/// what that absence means depends on the viewer (see [`DayStatus`]).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// One calendar day's sparse record: employee id -> status. Employees with no
/// entry are "not yet marked" in the live editing view and default to absent
/// only when a month is aggregated historically.
pub type DailyRecord = HashMap<u64, AttendanceStatus>;

/// Live tri-state shown while a day is being edited. `Unmarked` must not be
/// collapsed into `Absent` until the record is aggregated or exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Present,
    Absent,
    Unmarked,
}

impl From<Option<AttendanceStatus>> for DayStatus {
    fn from(status: Option<AttendanceStatus>) -> Self {
        match status {
            Some(AttendanceStatus::Present) => DayStatus::Present,
            Some(AttendanceStatus::Absent) => DayStatus::Absent,
            None => DayStatus::Unmarked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        assert_eq!(AttendanceStatus::Present.to_string(), "present");
        assert_eq!(
            "absent".parse::<AttendanceStatus>().unwrap(),
            AttendanceStatus::Absent
        );
        assert!("late".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn day_status_keeps_unmarked_distinct() {
        assert_eq!(DayStatus::from(None), DayStatus::Unmarked);
        assert_eq!(
            DayStatus::from(Some(AttendanceStatus::Absent)),
            DayStatus::Absent
        );
    }
}
