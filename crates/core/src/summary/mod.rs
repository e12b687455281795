//! Monthly allowance totals and team analytics.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;
use shiftpay_shared::AppError;
use shiftpay_shared::types::UserId;
use thiserror::Error;

use crate::calendar::MonthKey;

/// Number of months shown by team analytics when none is requested.
pub const DEFAULT_ANALYTICS_MONTHS: u32 = 6;

/// Largest analytics range a caller may request.
pub const MAX_ANALYTICS_MONTHS: u32 = 24;

/// Number of past months included in an employee's history.
pub const HISTORY_MONTHS: u32 = 6;

/// The requested analytics range is outside 1-24 months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("months must be between 1 and 24")]
pub struct InvalidMonthRange(pub u32);

impl From<InvalidMonthRange> for AppError {
    fn from(err: InvalidMonthRange) -> Self {
        Self::Validation(err.to_string())
    }
}

/// The allowance of one entry and whose it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryFigure {
    /// Owner of the entry.
    pub employee_id: UserId,
    /// Allowance paid for the entry.
    pub allowance: Decimal,
}

/// Totals for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthTotals {
    /// The month.
    pub month: MonthKey,
    /// Display name, e.g. "October 2026".
    pub month_name: String,
    /// Sum of all allowances.
    pub total: Decimal,
    /// Number of entries.
    pub entry_count: u64,
    /// Number of distinct employees with at least one entry.
    pub employee_count: u64,
    /// `total / employee_count` to two places, zero when nobody has entries.
    pub average_per_employee: Decimal,
}

/// Sums a set of allowances.
#[must_use]
pub fn total_allowance<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().sum()
}

/// Computes the totals for one month from its entries.
#[must_use]
pub fn summarize_month(month: MonthKey, figures: &[EntryFigure]) -> MonthTotals {
    let total = total_allowance(figures.iter().map(|f| f.allowance));
    let employees: HashSet<UserId> = figures.iter().map(|f| f.employee_id).collect();
    let employee_count = employees.len() as u64;

    let average_per_employee = if employee_count == 0 {
        Decimal::ZERO
    } else {
        (total / Decimal::from(employee_count)).round_dp(2)
    };

    MonthTotals {
        month,
        month_name: month.display_name(),
        total,
        entry_count: figures.len() as u64,
        employee_count,
        average_per_employee,
    }
}

/// Returns the `count` months ending at `current`, oldest first.
#[must_use]
pub fn trailing_months(current: MonthKey, count: u32) -> Vec<MonthKey> {
    (0..count).rev().map(|i| current.minus_months(i)).collect()
}

/// Returns the `count` months before `current`, most recent first.
#[must_use]
pub fn previous_months(current: MonthKey, count: u32) -> Vec<MonthKey> {
    (1..=count).map(|i| current.minus_months(i)).collect()
}

/// Resolves the requested analytics range.
///
/// # Errors
///
/// Returns `InvalidMonthRange` if the request is outside 1-24.
pub fn analytics_months(requested: Option<u32>) -> Result<u32, InvalidMonthRange> {
    let months = requested.unwrap_or(DEFAULT_ANALYTICS_MONTHS);
    if (1..=MAX_ANALYTICS_MONTHS).contains(&months) {
        Ok(months)
    } else {
        Err(InvalidMonthRange(months))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn month(raw: &str) -> MonthKey {
        raw.parse().unwrap()
    }

    #[test]
    fn test_summarize_month() {
        let a = UserId::new();
        let b = UserId::new();
        let figures = [
            EntryFigure { employee_id: a, allowance: dec!(1200) },
            EntryFigure { employee_id: a, allowance: dec!(2000) },
            EntryFigure { employee_id: b, allowance: dec!(400) },
        ];

        let totals = summarize_month(month("2026-10"), &figures);
        assert_eq!(totals.total, dec!(3600));
        assert_eq!(totals.entry_count, 3);
        assert_eq!(totals.employee_count, 2);
        assert_eq!(totals.average_per_employee, dec!(1800));
        assert_eq!(totals.month_name, "October 2026");
    }

    #[test]
    fn test_average_rounds_to_cents() {
        let figures = [
            EntryFigure { employee_id: UserId::new(), allowance: dec!(1000) },
            EntryFigure { employee_id: UserId::new(), allowance: dec!(0) },
            EntryFigure { employee_id: UserId::new(), allowance: dec!(0) },
        ];
        let totals = summarize_month(month("2026-10"), &figures);
        assert_eq!(totals.average_per_employee, dec!(333.33));
    }

    #[test]
    fn test_empty_month() {
        let totals = summarize_month(month("2026-09"), &[]);
        assert_eq!(totals.total, Decimal::ZERO);
        assert_eq!(totals.employee_count, 0);
        assert_eq!(totals.average_per_employee, Decimal::ZERO);
    }

    #[test]
    fn test_trailing_months_oldest_first() {
        let months: Vec<String> = trailing_months(month("2026-02"), 4)
            .into_iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(months, ["2025-11", "2025-12", "2026-01", "2026-02"]);
    }

    #[test]
    fn test_previous_months_newest_first() {
        let months: Vec<String> = previous_months(month("2026-03"), HISTORY_MONTHS)
            .into_iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(
            months,
            ["2026-02", "2026-01", "2025-12", "2025-11", "2025-10", "2025-09"]
        );
    }

    #[test]
    fn test_analytics_months() {
        assert_eq!(analytics_months(None), Ok(6));
        assert_eq!(analytics_months(Some(1)), Ok(1));
        assert_eq!(analytics_months(Some(24)), Ok(24));
        assert_eq!(analytics_months(Some(0)), Err(InvalidMonthRange(0)));
        assert_eq!(analytics_months(Some(25)), Err(InvalidMonthRange(25)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The total equals the sum of the parts and the month list has the requested length.
        #[test]
        fn prop_totals_are_sums(amounts in prop::collection::vec(0i64..3000, 0..40)) {
            let employee = UserId::new();
            let figures: Vec<EntryFigure> = amounts
                .iter()
                .map(|a| EntryFigure { employee_id: employee, allowance: Decimal::from(*a) })
                .collect();
            let totals = summarize_month(month("2026-10"), &figures);
            prop_assert_eq!(totals.total, Decimal::from(amounts.iter().sum::<i64>()));
            prop_assert_eq!(totals.entry_count, amounts.len() as u64);
            if amounts.is_empty() {
                prop_assert_eq!(totals.employee_count, 0);
            } else {
                prop_assert_eq!(totals.employee_count, 1);
                prop_assert_eq!(totals.average_per_employee, totals.total);
            }
        }

        #[test]
        fn prop_trailing_months_are_consecutive(count in 1u32..=24) {
            let months = trailing_months(month("2026-10"), count);
            prop_assert_eq!(months.len(), count as usize);
            prop_assert_eq!(months.last().copied(), Some(month("2026-10")));
            for pair in months.windows(2) {
                prop_assert_eq!(pair[1].minus_months(1), pair[0]);
            }
        }
    }
}
