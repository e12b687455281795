//! Reporting lines and team visibility.
//!
//! Only the employee-to-manager link is stored. A manager's team is every
//! user whose manager is that manager, so it is always derived, never kept.

use serde::Serialize;
use shiftpay_shared::AppError;
use shiftpay_shared::types::UserId;
use thiserror::Error;

use crate::auth::UserRole;

/// Minimum length of an employee search query.
pub const MIN_SEARCH_LEN: usize = 2;

/// Team and directory rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeamError {
    /// The chosen manager does not have the manager role.
    #[error("Selected user is not a manager")]
    NotAManager,

    /// The chosen manager has been deactivated.
    #[error("Selected manager is no longer active")]
    ManagerInactive,

    /// The search query is too short.
    #[error("Search query must be at least 2 characters")]
    QueryTooShort,
}

impl TeamError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotAManager => "invalid_manager",
            Self::ManagerInactive => "manager_inactive",
            Self::QueryTooShort => "validation_error",
        }
    }
}

impl From<TeamError> for AppError {
    fn from(err: TeamError) -> Self {
        match err {
            TeamError::QueryTooShort => Self::Validation(err.to_string()),
            TeamError::NotAManager | TeamError::ManagerInactive => Self::Rule {
                code: err.error_code(),
                message: err.to_string(),
            },
        }
    }
}

/// Checks that a user may be chosen as an employee's manager.
///
/// # Errors
///
/// Returns `TeamError::NotAManager` or `TeamError::ManagerInactive`.
pub fn validate_manager_choice(role: UserRole, is_active: bool) -> Result<(), TeamError> {
    if !role.can_manage_others() {
        return Err(TeamError::NotAManager);
    }
    if !is_active {
        return Err(TeamError::ManagerInactive);
    }
    Ok(())
}

/// Trims an employee search query and checks its length.
///
/// # Errors
///
/// Returns `TeamError::QueryTooShort` if fewer than two characters remain.
pub fn normalize_search_query(raw: &str) -> Result<&str, TeamError> {
    let query = raw.trim();
    if query.chars().count() < MIN_SEARCH_LEN {
        return Err(TeamError::QueryTooShort);
    }
    Ok(query)
}

/// Whose entries a reviewer may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", content = "manager_id", rename_all = "snake_case")]
pub enum TeamScope {
    /// Employees reporting to the given manager.
    ReportsTo(UserId),
    /// Every employee.
    AllEmployees,
}

impl TeamScope {
    /// Returns the scope for a reviewer, or `None` if the role cannot review.
    #[must_use]
    pub const fn for_reviewer(user_id: UserId, role: UserRole) -> Option<Self> {
        match role {
            UserRole::Manager => Some(Self::ReportsTo(user_id)),
            UserRole::Admin => Some(Self::AllEmployees),
            UserRole::Employee => None,
        }
    }
}

/// Returns true if `employee_manager` is `manager`.
#[must_use]
pub fn reports_to(employee_manager: Option<UserId>, manager: UserId) -> bool {
    employee_manager == Some(manager)
}
