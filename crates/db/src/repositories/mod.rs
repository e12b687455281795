//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod allowance_entry;
pub mod calendar_lock;
pub mod user;

pub use allowance_entry::{
    AllowanceEntryRepository, EntryRepositoryError, EntryWithEmployee, entries_total,
};
pub use calendar_lock::{CalendarLockRepository, LockWithAdmin};
pub use user::{CreateUserInput, UserError, UserRepository};
