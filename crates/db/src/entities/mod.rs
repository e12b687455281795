//! `SeaORM` entity definitions.

pub mod allowance_entries;
pub mod calendar_locks;
pub mod sea_orm_active_enums;
pub mod users;
