//! User repository for database operations.
//!
//! Reporting lines are stored only as `users.manager_id`; a manager's team is
//! always read back with a query on that column.

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use shiftpay_core::auth::UserRole as CoreUserRole;
use shiftpay_core::team::{TeamError, TeamScope, normalize_search_query, validate_manager_choice};
use shiftpay_shared::AppError;
use shiftpay_shared::types::UserId;
use tracing::info;
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::UserRole, users};

/// Maximum number of employees returned by a search.
const SEARCH_LIMIT: u64 = 20;

/// Error types for user directory operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// The email is already registered.
    #[error("User with this email already exists")]
    EmailTaken,

    /// The employee code is already registered.
    #[error("Employee code already registered")]
    EmployeeCodeTaken,

    /// An administrator already exists.
    #[error("Setup already completed")]
    SetupComplete,

    /// The chosen manager does not exist.
    #[error("Manager not found")]
    ManagerNotFound,

    /// A team rule was violated.
    #[error(transparent)]
    Team(#[from] TeamError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailTaken | UserError::EmployeeCodeTaken => Self::Conflict(err.to_string()),
            UserError::SetupComplete => Self::Rule {
                code: "setup_complete",
                message: err.to_string(),
            },
            UserError::ManagerNotFound => Self::Rule {
                code: "invalid_manager",
                message: "Invalid manager selected".to_string(),
            },
            UserError::Team(team) => team.into(),
            UserError::Database(db) => Self::Database(db.to_string()),
        }
    }
}

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Company employee number.
    pub employee_code: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id.into_inner()).one(&self.db).await
    }

    /// Finds a user by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(normalize_email(email)))
            .one(&self.db)
            .await
    }

    /// Finds a user by employee code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_employee_code(&self, code: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::EmployeeCode.eq(code.trim()))
            .one(&self.db)
            .await
    }

    /// Returns true once any administrator exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::Admin))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates the first administrator.
    ///
    /// # Errors
    ///
    /// Returns `UserError::SetupComplete` if an administrator already exists,
    /// or a conflict if the email or employee code is taken.
    pub async fn create_first_admin(
        &self,
        input: CreateUserInput,
    ) -> Result<users::Model, UserError> {
        if self.admin_exists().await? {
            return Err(UserError::SetupComplete);
        }

        let admin = self.insert(input, CoreUserRole::Admin, None).await?;
        info!(user_id = %admin.id, "First administrator created");
        Ok(admin)
    }

    /// Creates a manager.
    ///
    /// # Errors
    ///
    /// Returns a conflict if the email or employee code is taken.
    pub async fn create_manager(&self, input: CreateUserInput) -> Result<users::Model, UserError> {
        let manager = self.insert(input, CoreUserRole::Manager, None).await?;
        info!(user_id = %manager.id, "Manager created");
        Ok(manager)
    }

    /// Onboards an employee reporting to `manager_id`.
    ///
    /// Returns the new employee and their manager.
    ///
    /// # Errors
    ///
    /// Returns an error if the manager does not exist, is not an active
    /// manager, or the email or employee code is taken.
    pub async fn onboard_employee(
        &self,
        input: CreateUserInput,
        manager_id: UserId,
    ) -> Result<(users::Model, users::Model), UserError> {
        let manager = self
            .find_by_id(manager_id)
            .await?
            .ok_or(UserError::ManagerNotFound)?;

        validate_manager_choice(manager.role.into(), manager.is_active)?;

        let employee = self
            .insert(input, CoreUserRole::Employee, Some(manager.id))
            .await?;
        info!(user_id = %employee.id, manager_id = %manager.id, "Employee onboarded");
        Ok((employee, manager))
    }

    /// Lists active managers by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active_managers(&self) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::Manager))
            .filter(users::Column::IsActive.eq(true))
            .order_by_asc(users::Column::Name)
            .all(&self.db)
            .await
    }

    /// Lists the users reporting to `manager_id`, by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn team_members(&self, manager_id: UserId) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::ManagerId.eq(manager_id.into_inner()))
            .order_by_asc(users::Column::Name)
            .all(&self.db)
            .await
    }

    /// Lists the users a reviewer may see, by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn members_in_scope(&self, scope: TeamScope) -> Result<Vec<users::Model>, DbErr> {
        match scope {
            TeamScope::ReportsTo(manager_id) => self.team_members(manager_id).await,
            TeamScope::AllEmployees => {
                users::Entity::find()
                    .filter(users::Column::Role.eq(UserRole::Employee))
                    .order_by_asc(users::Column::Name)
                    .all(&self.db)
                    .await
            }
        }
    }

    /// Finds a direct report of `manager_id` by employee code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_team_member(
        &self,
        manager_id: UserId,
        employee_code: &str,
    ) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::EmployeeCode.eq(employee_code.trim()))
            .filter(users::Column::ManagerId.eq(manager_id.into_inner()))
            .one(&self.db)
            .await
    }

    /// Searches employees by name, employee code or email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `TeamError::QueryTooShort` for queries under two characters,
    /// or a database error.
    pub async fn search_employees(&self, raw_query: &str) -> Result<Vec<users::Model>, UserError> {
        let query = normalize_search_query(raw_query)?;
        let pattern = format!("%{}%", query.to_lowercase());

        let matches_any = Condition::any()
            .add(Expr::expr(Func::lower(Expr::col(users::Column::Name))).like(pattern.as_str()))
            .add(
                Expr::expr(Func::lower(Expr::col(users::Column::EmployeeCode)))
                    .like(pattern.as_str()),
            )
            .add(Expr::expr(Func::lower(Expr::col(users::Column::Email))).like(pattern.as_str()));

        let found = users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::Employee))
            .filter(matches_any)
            .order_by_asc(users::Column::Name)
            .limit(SEARCH_LIMIT)
            .all(&self.db)
            .await?;

        Ok(found)
    }

    async fn insert(
        &self,
        input: CreateUserInput,
        role: CoreUserRole,
        manager_id: Option<Uuid>,
    ) -> Result<users::Model, UserError> {
        let email = normalize_email(&input.email);
        let employee_code = input.employee_code.trim().to_string();

        if self.find_by_email(&email).await?.is_some() {
            return Err(UserError::EmailTaken);
        }
        if self.find_by_employee_code(&employee_code).await?.is_some() {
            return Err(UserError::EmployeeCodeTaken);
        }

        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(UserId::new().into_inner()),
            employee_code: Set(employee_code),
            email: Set(email),
            name: Set(input.name.trim().to_string()),
            role: Set(role.into()),
            manager_id: Set(manager_id),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db).await.map_err(|e| match e.sql_err() {
            // Lost a race with a concurrent registration
            Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("email") => {
                UserError::EmailTaken
            }
            Some(SqlErr::UniqueConstraintViolation(_)) => UserError::EmployeeCodeTaken,
            _ => UserError::Database(e),
        })
    }
}

/// Emails are stored trimmed and lowercased.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jane.Doe@ACME.com "), "jane.doe@acme.com");
    }

    #[test]
    fn test_app_error_mapping() {
        assert_eq!(AppError::from(UserError::EmailTaken).status_code(), 409);
        assert_eq!(AppError::from(UserError::SetupComplete).error_code(), "setup_complete");
        assert_eq!(AppError::from(UserError::ManagerNotFound).status_code(), 400);
        assert_eq!(
            AppError::from(UserError::Team(TeamError::QueryTooShort)).error_code(),
            "validation_error"
        );
        assert!(AppError::from(UserError::Database(DbErr::Custom("boom".into()))).is_server_error());
    }

    #[test]
    fn test_team_error_passes_through() {
        let err: UserError = TeamError::ManagerInactive.into();
        assert_eq!(err.to_string(), "Selected manager is no longer active");
    }
}
