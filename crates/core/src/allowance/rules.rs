//! Allowance and WFH rules keyed by raw type code.
//!
//! These accept the code as supplied by a client so that unknown codes have a
//! defined answer instead of an error.

use rust_decimal::Decimal;

use super::types::EntryType;

/// Returns the allowance for a type code; unknown codes pay nothing.
#[must_use]
pub fn allowance_for(code: &str) -> Decimal {
    code.parse::<EntryType>()
        .map_or(Decimal::ZERO, EntryType::allowance)
}

/// Returns true if the work-from-home flag may accompany the type code.
///
/// Unknown codes are never WFH-compatible.
#[must_use]
pub fn can_select_wfh(code: &str) -> bool {
    code.parse::<EntryType>().is_ok_and(EntryType::allows_wfh)
}
