//! The rolling edit window.
//!
//! Entries may be created or changed only for dates on or after the same
//! calendar day two months before today. Dates in the future are accepted.

use chrono::{Months, NaiveDate};

/// How many months back an entry may still be edited.
pub const EDIT_WINDOW_MONTHS: u32 = 2;

/// Returns the earliest editable date for `today`.
///
/// Month arithmetic clamps to the end of the target month, so 31 May yields
/// 31 March and 30 April yields 28 (or 29) February.
#[must_use]
pub fn edit_window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(EDIT_WINDOW_MONTHS))
        .unwrap_or(NaiveDate::MIN)
}

/// Returns true if an entry dated `date` may be written on `today`.
#[must_use]
pub fn is_editable(date: NaiveDate, today: NaiveDate) -> bool {
    date >= edit_window_start(today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[rstest]
    #[case(d(2026, 10, 16), d(2026, 8, 16))]
    #[case(d(2026, 1, 15), d(2025, 11, 15))]
    #[case(d(2026, 5, 31), d(2026, 3, 31))]
    #[case(d(2026, 4, 30), d(2026, 2, 28))]
    #[case(d(2024, 4, 30), d(2024, 2, 29))]
    fn test_window_start(#[case] today: NaiveDate, #[case] expected: NaiveDate) {
        assert_eq!(edit_window_start(today), expected);
    }

    #[test]
    fn test_boundary_day_is_editable() {
        let today = d(2026, 10, 16);
        assert!(is_editable(d(2026, 8, 16), today));
        assert!(!is_editable(d(2026, 8, 15), today));
    }

    #[test]
    fn test_today_and_future_are_editable() {
        let today = d(2026, 10, 16);
        assert!(is_editable(today, today));
        assert!(is_editable(d(2027, 1, 1), today));
    }
}
