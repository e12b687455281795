//! Response bodies shared by several route groups.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use shiftpay_core::allowance::EntryType;
use shiftpay_core::auth::UserRole;
use shiftpay_db::entities::{allowance_entries, users};
use uuid::Uuid;

/// A user as shown to other users.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    /// User ID.
    pub id: Uuid,
    /// Company employee number.
    pub employee_code: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role.
    pub role: UserRole,
}

impl From<&users::Model> for UserSummary {
    fn from(user: &users::Model) -> Self {
        Self {
            id: user.id,
            employee_code: user.employee_code.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.into(),
        }
    }
}

/// A user with their reporting line.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    /// The user.
    #[serde(flatten)]
    pub user: UserSummary,
    /// Direct manager, if any.
    pub manager_id: Option<Uuid>,
    /// Whether the account is active.
    pub is_active: bool,
}

impl From<&users::Model> for UserResponse {
    fn from(user: &users::Model) -> Self {
        Self {
            user: user.into(),
            manager_id: user.manager_id,
            is_active: user.is_active,
        }
    }
}

/// An allowance entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    /// Entry ID.
    pub id: Uuid,
    /// Owner of the entry.
    pub employee_id: Uuid,
    /// Calendar day.
    pub date: NaiveDate,
    /// Entry type code.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Worked from home.
    #[serde(rename = "isWFH")]
    pub is_wfh: bool,
    /// Free-text evidence.
    pub proof: String,
    /// Allowance for the day.
    pub allowance: Decimal,
    /// Month key.
    pub month: String,
    /// Calendar year.
    pub year: i32,
    /// Last write.
    pub updated_at: DateTime<Utc>,
}

impl From<allowance_entries::Model> for EntryResponse {
    fn from(entry: allowance_entries::Model) -> Self {
        Self {
            id: entry.id,
            employee_id: entry.employee_id,
            date: entry.entry_date,
            entry_type: entry.entry_type.into(),
            is_wfh: entry.is_wfh,
            proof: entry.proof,
            allowance: entry.allowance,
            month: entry.month,
            year: entry.year,
            updated_at: entry.updated_at.with_timezone(&Utc),
        }
    }
}

/// An entry with the employee who owns it.
#[derive(Debug, Clone, Serialize)]
pub struct EntryWithEmployeeResponse {
    /// The entry.
    #[serde(flatten)]
    pub entry: EntryResponse,
    /// The owner, if the account still exists.
    pub employee: Option<UserSummary>,
}

impl From<shiftpay_db::repositories::EntryWithEmployee> for EntryWithEmployeeResponse {
    fn from(row: shiftpay_db::repositories::EntryWithEmployee) -> Self {
        Self {
            employee: row.employee.as_ref().map(UserSummary::from),
            entry: row.entry.into(),
        }
    }
}
