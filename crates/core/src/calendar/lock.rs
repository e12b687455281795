//! Month locks.
//!
//! A locked month rejects every entry write dated inside it. A month with no
//! lock record is unlocked.

use chrono::{DateTime, Utc};
use shiftpay_shared::types::UserId;

use super::month::MonthKey;
use crate::entry::EntryError;

/// Rejects a write to `month` if it is locked.
///
/// # Errors
///
/// Returns `EntryError::MonthLocked` when `is_locked` is true.
pub fn ensure_month_unlocked(month: MonthKey, is_locked: bool) -> Result<(), EntryError> {
    if is_locked {
        return Err(EntryError::MonthLocked(month));
    }
    Ok(())
}

/// The fields written when an administrator locks or unlocks a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockChange {
    /// The month being changed.
    pub month: MonthKey,
    /// New lock state.
    pub is_locked: bool,
    /// Administrator who made the change.
    pub locked_by: UserId,
    /// Set when locking, cleared when unlocking.
    pub locked_at: Option<DateTime<Utc>>,
}

impl LockChange {
    /// Builds the change for `actor` setting `month` to `is_locked` at `now`.
    #[must_use]
    pub const fn new(month: MonthKey, is_locked: bool, actor: UserId, now: DateTime<Utc>) -> Self {
        Self {
            month,
            is_locked,
            locked_by: actor,
            locked_at: if is_locked { Some(now) } else { None },
        }
    }
}
