//! Calendar lock repository.
//!
//! One record per month. A month without a record is unlocked. Records are
//! created on the first lock or unlock and toggled in place afterwards.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use shiftpay_core::calendar::{LockChange, MonthKey};
use shiftpay_shared::types::UserId;
use tracing::info;

use crate::entities::{calendar_locks, users};

/// A lock record with the name of the administrator who last changed it.
#[derive(Debug, Clone)]
pub struct LockWithAdmin {
    /// The lock record.
    pub lock: calendar_locks::Model,
    /// Name of the administrator in `locked_by`, if still present.
    pub locked_by_name: Option<String>,
}

/// Calendar lock repository.
#[derive(Debug, Clone)]
pub struct CalendarLockRepository {
    db: DatabaseConnection,
}

impl CalendarLockRepository {
    /// Creates a new calendar lock repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns true if the month is locked.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn is_locked(&self, month: MonthKey) -> Result<bool, DbErr> {
        is_month_locked(&self.db, month).await
    }

    /// Locks or unlocks a month on behalf of an administrator.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn set_lock(
        &self,
        month: MonthKey,
        is_locked: bool,
        actor: UserId,
    ) -> Result<calendar_locks::Model, DbErr> {
        let at = Utc::now();
        let change = LockChange::new(month, is_locked, actor, at);
        let now = at.into();

        let record = calendar_locks::ActiveModel {
            id: Set(uuid::Uuid::now_v7()),
            month: Set(change.month.to_string()),
            is_locked: Set(change.is_locked),
            locked_by: Set(Some(change.locked_by.into_inner())),
            locked_at: Set(change.locked_at.map(Into::into)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let saved = calendar_locks::Entity::insert(record)
            .on_conflict(
                OnConflict::column(calendar_locks::Column::Month)
                    .update_columns([
                        calendar_locks::Column::IsLocked,
                        calendar_locks::Column::LockedBy,
                        calendar_locks::Column::LockedAt,
                        calendar_locks::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await?;

        info!(
            month = %month,
            is_locked,
            admin_id = %actor,
            "Calendar lock updated"
        );

        Ok(saved)
    }

    /// Lists every lock record, newest month first, with the admin's name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_with_admin(&self) -> Result<Vec<LockWithAdmin>, DbErr> {
        let rows = calendar_locks::Entity::find()
            .find_also_related(users::Entity)
            .order_by_desc(calendar_locks::Column::Month)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(lock, admin)| LockWithAdmin {
                lock,
                locked_by_name: admin.map(|a| a.name),
            })
            .collect())
    }
}

pub(crate) async fn is_month_locked<C: ConnectionTrait>(
    db: &C,
    month: MonthKey,
) -> Result<bool, DbErr> {
    let lock = calendar_locks::Entity::find()
        .filter(calendar_locks::Column::Month.eq(month.to_string()))
        .one(db)
        .await?;

    Ok(lock.is_some_and(|l| l.is_locked))
}
