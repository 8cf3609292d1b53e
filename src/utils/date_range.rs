//! Calendar boundary helpers. Everything here is pure except
//! [`current_month`], which is a thin wrapper over the system clock.

use chrono::{Datelike, NaiveDate, Utc};

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Gregorian day count. `month` must be 1..=12; the report entry points
/// reject out-of-range months before calling in here.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => unreachable!("month out of range: {month}"),
    }
}

/// All calendar dates of the month, ascending, starting at day 1.
pub fn month_dates(year: i32, month: u32) -> Vec<NaiveDate> {
    (1..=days_in_month(year, month))
        .map(|day| NaiveDate::from_ymd_opt(year, month, day).expect("day fits the month"))
        .collect()
}

pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

pub fn month_of(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

pub fn current_month() -> (i32, u32) {
    month_of(Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_year_rules() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn month_dates_cover_the_whole_month_in_order() {
        for (year, month) in [(2025, 3), (2024, 2), (2025, 2), (1900, 2)] {
            let dates = month_dates(year, month);
            assert_eq!(dates.len() as u32, days_in_month(year, month));
            for (i, date) in dates.iter().enumerate() {
                assert_eq!(date.year(), year);
                assert_eq!(date.month(), month);
                assert_eq!(date.day() as usize, i + 1);
            }
        }
    }

    #[test]
    fn month_dates_render_as_zero_padded_iso() {
        let dates = month_dates(2025, 3);
        assert_eq!(dates[0].to_string(), "2025-03-01");
        assert_eq!(dates[8].to_string(), "2025-03-09");
        assert_eq!(dates[30].to_string(), "2025-03-31");
    }

    #[test]
    fn month_navigation_wraps_year_boundaries() {
        assert_eq!(previous_month(2025, 1), (2024, 12));
        assert_eq!(next_month(2024, 12), (2025, 1));
        assert_eq!(previous_month(2025, 6), (2025, 5));
        assert_eq!(next_month(2025, 6), (2025, 7));
    }

    #[test]
    fn month_navigation_round_trips() {
        for year in [2024, 2025] {
            for month in 1..=12 {
                assert_eq!(previous_month_of_next(year, month), (year, month));
            }
        }
    }

    fn previous_month_of_next(year: i32, month: u32) -> (i32, u32) {
        let (y, m) = next_month(year, month);
        previous_month(y, m)
    }

    #[test]
    fn month_of_reads_the_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(month_of(date), (2025, 3));
    }
}
