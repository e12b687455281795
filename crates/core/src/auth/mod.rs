//! User roles.
//!
//! Every user holds exactly one role. Employees record their own entries,
//! managers review the employees who report to them, and administrators
//! manage managers and month locks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Records their own entries.
    Employee,
    /// Reviews the entries of their direct reports.
    Manager,
    /// Manages managers and month locks; sees every employee.
    Admin,
}

/// The string did not name a role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl UserRole {
    /// Returns the stored name of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Returns true if this role can add managers and lock months.
    #[must_use]
    pub const fn can_administer(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns true if a user with this role may be chosen as someone's manager.
    #[must_use]
    pub const fn can_manage_others(&self) -> bool {
        matches!(self, Self::Manager)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(Self::Employee),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}
