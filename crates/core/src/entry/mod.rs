//! Single-day entry writes.
//!
//! An entry write is checked in a fixed order: the date must parse, the type
//! must be known, WFH must be compatible with the type, the date must be
//! inside the edit window, and finally the month must not be locked. The
//! first failing check decides the error.

pub mod error;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::EntryError;
pub use validation::{EntryWriteInput, ValidatedEntry, parse_entry_date, validate_entry_write};
