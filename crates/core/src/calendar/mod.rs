//! Calendar months, the edit window and month locks.

pub mod lock;
pub mod month;
pub mod window;

pub use lock::{LockChange, ensure_month_unlocked};
pub use month::{InvalidMonthKey, MonthKey};
pub use window::{EDIT_WINDOW_MONTHS, edit_window_start, is_editable};
