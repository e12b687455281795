//! Entry types and the allowance rule table.
//!
//! Every day an employee records exactly one [`EntryType`]. The type alone
//! decides the allowance; the work-from-home flag is recorded beside it and
//! never changes the amount.

pub mod rules;
pub mod types;

pub use rules::{allowance_for, can_select_wfh};
pub use types::{EntryGroup, EntryType, EntryTypeInfo, UnknownEntryType};
