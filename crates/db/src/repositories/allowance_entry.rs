//! Allowance entry repository.
//!
//! `save_entry` is the only write path for entries. It validates the request,
//! checks the month lock and then upserts on `(employee_id, entry_date)`, so a
//! second save for the same day replaces the first.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use shiftpay_core::calendar::{MonthKey, ensure_month_unlocked};
use shiftpay_core::entry::{EntryError, EntryWriteInput, validate_entry_write};
use shiftpay_core::summary::{EntryFigure, MonthTotals, summarize_month, total_allowance};
use shiftpay_shared::AppError;
use shiftpay_shared::types::{AllowanceEntryId, UserId};
use tracing::{debug, info};
use uuid::Uuid;

use super::calendar_lock::is_month_locked;
use crate::entities::{allowance_entries, users};

/// Error types for allowance entry writes.
#[derive(Debug, thiserror::Error)]
pub enum EntryRepositoryError {
    /// The write was rejected by an entry rule.
    #[error(transparent)]
    Rule(#[from] EntryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<EntryRepositoryError> for AppError {
    fn from(err: EntryRepositoryError) -> Self {
        match err {
            EntryRepositoryError::Rule(rule) => rule.into(),
            EntryRepositoryError::Database(db) => Self::Database(db.to_string()),
        }
    }
}

/// An entry together with its employee.
#[derive(Debug, Clone)]
pub struct EntryWithEmployee {
    /// The entry.
    pub entry: allowance_entries::Model,
    /// The employee who owns it.
    pub employee: Option<users::Model>,
}

/// Allowance entry repository.
#[derive(Debug, Clone)]
pub struct AllowanceEntryRepository {
    db: DatabaseConnection,
}

impl AllowanceEntryRepository {
    /// Creates a new allowance entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates or replaces an employee's entry for one day.
    ///
    /// Checks run in order: type, WFH compatibility, date and edit window, month
    /// lock. The lock read and the upsert are separate statements.
    ///
    /// # Errors
    ///
    /// Returns `EntryRepositoryError::Rule` for a rejected write, or a
    /// database error.
    pub async fn save_entry(
        &self,
        employee_id: UserId,
        input: EntryWriteInput,
        today: NaiveDate,
    ) -> Result<allowance_entries::Model, EntryRepositoryError> {
        let entry = validate_entry_write(input, today)?;

        let locked = is_month_locked(&self.db, entry.month).await?;
        ensure_month_unlocked(entry.month, locked)?;

        let now = Utc::now().into();
        let record = allowance_entries::ActiveModel {
            id: Set(AllowanceEntryId::new().into_inner()),
            employee_id: Set(employee_id.into_inner()),
            entry_date: Set(entry.date),
            entry_type: Set(entry.entry_type.into()),
            is_wfh: Set(entry.is_wfh),
            proof: Set(entry.proof),
            allowance: Set(entry.allowance),
            month: Set(entry.month.to_string()),
            year: Set(entry.year),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let saved = allowance_entries::Entity::insert(record)
            .on_conflict(
                OnConflict::columns([
                    allowance_entries::Column::EmployeeId,
                    allowance_entries::Column::EntryDate,
                ])
                .update_columns([
                    allowance_entries::Column::EntryType,
                    allowance_entries::Column::IsWfh,
                    allowance_entries::Column::Proof,
                    allowance_entries::Column::Allowance,
                    allowance_entries::Column::Month,
                    allowance_entries::Column::Year,
                    allowance_entries::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    EntryRepositoryError::Rule(EntryError::DuplicateEntry { date: entry.date })
                }
                _ => EntryRepositoryError::Database(e),
            })?;

        info!(
            employee_id = %employee_id,
            entry_date = %saved.entry_date,
            entry_type = %entry.entry_type,
            allowance = %saved.allowance,
            "Allowance entry saved"
        );

        Ok(saved)
    }

    /// Finds an entry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: AllowanceEntryId,
    ) -> Result<Option<allowance_entries::Model>, DbErr> {
        allowance_entries::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
    }

    /// Finds an entry by ID together with its employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_with_employee(
        &self,
        id: AllowanceEntryId,
    ) -> Result<Option<EntryWithEmployee>, DbErr> {
        let row = allowance_entries::Entity::find_by_id(id.into_inner())
            .find_also_related(users::Entity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(entry, employee)| EntryWithEmployee { entry, employee }))
    }

    /// Lists an employee's entries for a month, by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_employee_month(
        &self,
        employee_id: UserId,
        month: MonthKey,
    ) -> Result<Vec<allowance_entries::Model>, DbErr> {
        allowance_entries::Entity::find()
            .filter(allowance_entries::Column::EmployeeId.eq(employee_id.into_inner()))
            .filter(allowance_entries::Column::Month.eq(month.to_string()))
            .order_by_asc(allowance_entries::Column::EntryDate)
            .all(&self.db)
            .await
    }

    /// Lists the entries of several employees for a month, ordered by
    /// employee name and then date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_employees_month(
        &self,
        employee_ids: &[Uuid],
        month: MonthKey,
    ) -> Result<Vec<EntryWithEmployee>, DbErr> {
        if employee_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = allowance_entries::Entity::find()
            .find_also_related(users::Entity)
            .filter(allowance_entries::Column::EmployeeId.is_in(employee_ids.iter().copied()))
            .filter(allowance_entries::Column::Month.eq(month.to_string()))
            .order_by_asc(users::Column::Name)
            .order_by_asc(allowance_entries::Column::EntryDate)
            .all(&self.db)
            .await?;

        debug!(month = %month, count = rows.len(), "Loaded team entries");

        Ok(rows
            .into_iter()
            .map(|(entry, employee)| EntryWithEmployee { entry, employee })
            .collect())
    }

    /// Computes the totals of several employees for each month given.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn month_totals(
        &self,
        employee_ids: &[Uuid],
        months: &[MonthKey],
    ) -> Result<Vec<MonthTotals>, DbErr> {
        let mut totals = Vec::with_capacity(months.len());

        for &month in months {
            let figures: Vec<EntryFigure> = if employee_ids.is_empty() {
                Vec::new()
            } else {
                allowance_entries::Entity::find()
                    .filter(
                        allowance_entries::Column::EmployeeId.is_in(employee_ids.iter().copied()),
                    )
                    .filter(allowance_entries::Column::Month.eq(month.to_string()))
                    .all(&self.db)
                    .await?
                    .into_iter()
                    .map(|e| EntryFigure {
                        employee_id: UserId::from_uuid(e.employee_id),
                        allowance: e.allowance,
                    })
                    .collect()
            };
            totals.push(summarize_month(month, &figures));
        }

        Ok(totals)
    }
}

/// Sums the allowances of a list of entries.
#[must_use]
pub fn entries_total(entries: &[allowance_entries::Model]) -> Decimal {
    total_allowance(entries.iter().map(|e| e.allowance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_rule_errors_stay_client_errors() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let app: AppError = EntryRepositoryError::Rule(EntryError::DuplicateEntry { date }).into();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.error_code(), "duplicate_entry");
        assert_eq!(app.public_message(), "Entry already exists for this date");
    }

    #[test]
    fn test_database_errors_are_hidden() {
        let app: AppError = EntryRepositoryError::Database(DbErr::Custom("pool timed out".into())).into();
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.public_message(), "Server error");
    }
}
