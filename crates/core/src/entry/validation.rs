//! Entry write validation.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::EntryError;
use crate::allowance::EntryType;
use crate::calendar::{MonthKey, edit_window_start};

/// An entry write as supplied by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryWriteInput {
    /// ISO-8601 date or timestamp.
    pub date: String,
    /// Entry type code.
    pub entry_type: String,
    /// Work-from-home flag.
    pub is_wfh: bool,
    /// Free-text proof, possibly HTML.
    pub proof: String,
}

/// An entry write that passed every check that does not need the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedEntry {
    /// Calendar day of the entry.
    pub date: NaiveDate,
    /// Entry type.
    pub entry_type: EntryType,
    /// Work-from-home flag.
    pub is_wfh: bool,
    /// Free-text proof.
    pub proof: String,
    /// Allowance derived from the type.
    pub allowance: Decimal,
    /// Month containing `date`.
    pub month: MonthKey,
    /// Year of `date`.
    pub year: i32,
}

/// Parses a client-supplied entry date.
///
/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp (converted to its UTC day), or
/// a timestamp without offset (taken as UTC). The year must be 0001-9999.
///
/// # Errors
///
/// Returns `EntryError::InvalidDate` if the string is none of those forms.
pub fn parse_entry_date(raw: &str) -> Result<NaiveDate, EntryError> {
    let trimmed = raw.trim();

    let parsed = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|ts| ts.with_timezone(&Utc).date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|ts| ts.date())
        });

    // chrono accepts signed expanded years such as "+10000"
    parsed
        .filter(|date| MonthKey::new(date.year(), date.month()).is_some())
        .ok_or_else(|| EntryError::InvalidDate(raw.to_string()))
}

/// Validates an entry write against the rules that need no stored state.
///
/// Checks run in order: type code, WFH compatibility, then the date (format
/// and edit window). The month lock is checked separately by the caller once
/// the lock record has been read.
///
/// # Errors
///
/// Returns the first `EntryError` encountered.
pub fn validate_entry_write(
    input: EntryWriteInput,
    today: NaiveDate,
) -> Result<ValidatedEntry, EntryError> {
    let entry_type: EntryType = input
        .entry_type
        .parse()
        .map_err(|_| EntryError::InvalidType(input.entry_type.clone()))?;

    if input.is_wfh && !entry_type.allows_wfh() {
        return Err(EntryError::InvalidWfhSelection(entry_type));
    }

    let date = parse_entry_date(&input.date)?;
    let earliest = edit_window_start(today);
    if date < earliest {
        return Err(EntryError::EditWindowExpired { date, earliest });
    }

    Ok(ValidatedEntry {
        date,
        entry_type,
        is_wfh: input.is_wfh,
        proof: input.proof,
        allowance: entry_type.allowance(),
        month: MonthKey::from_date(date),
        year: date.year(),
    })
}
