//! Property-based tests for entry write validation.

use chrono::{Days, Months, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::EntryError;
use super::validation::{EntryWriteInput, validate_entry_write};
use crate::allowance::{EntryType, allowance_for, can_select_wfh};
use crate::calendar::{MonthKey, ensure_month_unlocked, is_editable};

/// Any day between 2000 and 2099.
fn any_day() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN))
}

fn any_type() -> impl Strategy<Value = EntryType> {
    (0usize..EntryType::ALL.len()).prop_map(|i| EntryType::ALL[i])
}

fn write(date: NaiveDate, entry_type: &str, is_wfh: bool) -> EntryWriteInput {
    EntryWriteInput {
        date: date.format("%Y-%m-%d").to_string(),
        entry_type: entry_type.to_string(),
        is_wfh,
        proof: String::new(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The allowance of an accepted entry is the table amount, WFH or not.
    #[test]
    fn prop_accepted_allowance_matches_table(
        today in any_day(),
        back in 0u64..50,
        t in any_type(),
        is_wfh in any::<bool>(),
    ) {
        prop_assume!(!is_wfh || t.allows_wfh());
        let date = today - Days::new(back);
        let entry = validate_entry_write(write(date, t.code(), is_wfh), today).unwrap();
        prop_assert_eq!(entry.allowance, allowance_for(t.code()));
        prop_assert_eq!(entry.month, MonthKey::from_date(date));
    }

    /// WFH with a day-off type is always rejected, however recent the date.
    #[test]
    fn prop_wfh_on_day_off_rejected(today in any_day(), t in any_type()) {
        prop_assume!(!can_select_wfh(t.code()));
        let err = validate_entry_write(write(today, t.code(), true), today).unwrap_err();
        prop_assert_eq!(err, EntryError::InvalidWfhSelection(t));
    }

    /// The day exactly two months back is editable and the day before it is not.
    #[test]
    fn prop_edit_window_boundary(today in any_day()) {
        let boundary = today.checked_sub_months(Months::new(2)).unwrap();
        let day_before = boundary - Days::new(1);
        let day_after = boundary + Days::new(1);

        prop_assert!(is_editable(boundary, today));
        prop_assert!(is_editable(day_after, today));
        prop_assert!(!is_editable(day_before, today));

        let rejected = validate_entry_write(write(day_before, "9pm", false), today);
        let is_window_error = matches!(rejected, Err(EntryError::EditWindowExpired { .. }));
        prop_assert!(is_window_error);
    }

    /// Editability is a property of the date alone, never of the type.
    #[test]
    fn prop_window_independent_of_type(
        today in any_day(),
        back in 0u64..200,
        t in any_type(),
    ) {
        let date = today - Days::new(back);
        let result = validate_entry_write(write(date, t.code(), false), today);
        prop_assert_eq!(result.is_ok(), is_editable(date, today));
    }

    /// A locked month rejects every otherwise valid write inside it.
    #[test]
    fn prop_locked_month_rejects(
        today in any_day(),
        back in 0u64..30,
        t in any_type(),
    ) {
        let date = today - Days::new(back);
        let entry = validate_entry_write(write(date, t.code(), false), today).unwrap();
        let err = ensure_month_unlocked(entry.month, true).unwrap_err();
        prop_assert_eq!(err, EntryError::MonthLocked(MonthKey::from_date(date)));
        prop_assert!(ensure_month_unlocked(entry.month, false).is_ok());
    }

    /// Allowances are never negative.
    #[test]
    fn prop_allowance_non_negative(today in any_day(), t in any_type()) {
        let entry = validate_entry_write(write(today, t.code(), false), today).unwrap();
        prop_assert!(entry.allowance >= Decimal::ZERO);
    }
}

#[test]
fn test_on_call_in_locked_month_is_rejected_even_when_recent() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let entry = validate_entry_write(write(today, "oncall", false), today).unwrap();
    assert_eq!(
        ensure_month_unlocked(entry.month, true),
        Err(EntryError::MonthLocked(MonthKey::new(2026, 10).unwrap()))
    );
}

#[test]
fn test_two_months_minus_one_day_is_editable() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let two_months_minus_one_day = NaiveDate::from_ymd_opt(2026, 8, 17).unwrap();
    assert!(is_editable(two_months_minus_one_day, today));
}
