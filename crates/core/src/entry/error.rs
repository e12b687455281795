//! Entry write errors.

use chrono::NaiveDate;
use shiftpay_shared::AppError;
use thiserror::Error;

use crate::allowance::EntryType;
use crate::calendar::MonthKey;

/// Reasons an entry write is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// The date is not an ISO-8601 date.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The type code is not one of the known entry types.
    #[error("Invalid entry type: {0}")]
    InvalidType(String),

    /// WFH was selected with a day-off type.
    #[error("WFH can only be selected with shifts or special allowances")]
    InvalidWfhSelection(EntryType),

    /// The date is older than the edit window allows.
    #[error("Cannot edit entries older than 2 months")]
    EditWindowExpired {
        /// Requested date.
        date: NaiveDate,
        /// Earliest editable date at the time of the request.
        earliest: NaiveDate,
    },

    /// An administrator has locked the month.
    #[error("This month is locked and cannot be modified")]
    MonthLocked(MonthKey),

    /// A concurrent write for the same day won the unique constraint.
    #[error("Entry already exists for this date")]
    DuplicateEntry {
        /// The contested date.
        date: NaiveDate,
    },
}

impl EntryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDate(_) => "invalid_date",
            Self::InvalidType(_) => "invalid_type",
            Self::InvalidWfhSelection(_) => "invalid_wfh_selection",
            Self::EditWindowExpired { .. } => "edit_window_expired",
            Self::MonthLocked(_) => "month_locked",
            Self::DuplicateEntry { .. } => "duplicate_entry",
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// Every rejection is the caller's to fix, including the duplicate race.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        400
    }
}

impl From<EntryError> for AppError {
    fn from(err: EntryError) -> Self {
        Self::Rule {
            code: err.error_code(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EntryError::InvalidType("x".into()).error_code(), "invalid_type");
        assert_eq!(
            EntryError::InvalidWfhSelection(EntryType::Leave).error_code(),
            "invalid_wfh_selection"
        );
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(
            EntryError::EditWindowExpired { date, earliest: date }.error_code(),
            "edit_window_expired"
        );
        assert_eq!(
            EntryError::MonthLocked(MonthKey::new(2026, 1).unwrap()).error_code(),
            "month_locked"
        );
        assert_eq!(EntryError::DuplicateEntry { date }.error_code(), "duplicate_entry");
    }

    #[test]
    fn test_all_rejections_are_client_errors() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let errors = [
            EntryError::InvalidDate("nope".into()),
            EntryError::InvalidType("wfh".into()),
            EntryError::InvalidWfhSelection(EntryType::Holiday),
            EntryError::EditWindowExpired { date, earliest: date },
            EntryError::MonthLocked(MonthKey::from_date(date)),
            EntryError::DuplicateEntry { date },
        ];
        for err in errors {
            assert_eq!(err.http_status_code(), 400, "{err}");
        }
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = EntryError::MonthLocked(MonthKey::new(2026, 9).unwrap()).into();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.error_code(), "month_locked");
        assert_eq!(
            app.public_message(),
            "This month is locked and cannot be modified"
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            EntryError::InvalidWfhSelection(EntryType::Weekend).to_string(),
            "WFH can only be selected with shifts or special allowances"
        );
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(
            EntryError::DuplicateEntry { date }.to_string(),
            "Entry already exists for this date"
        );
    }
}
