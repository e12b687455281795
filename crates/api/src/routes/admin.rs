//! Administration routes: managers, calendar locks and employee lookups.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shiftpay_core::calendar::MonthKey;
use shiftpay_db::repositories::{CreateUserInput, entries_total};
use shiftpay_db::{AllowanceEntryRepository, CalendarLockRepository, UserRepository};
use shiftpay_shared::types::UserId;
use uuid::Uuid;
use validator::Validate;

use super::setup::ensure_email_allowed;
use super::views::{EntryResponse, UserResponse};
use crate::{
    AppState,
    error::{ApiError, db_error, validation_error},
    extract::AppJson,
    middleware::AuthUser,
};

/// Creates the admin routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/managers", post(create_manager))
        .route("/admin/calendar-lock", post(set_calendar_lock))
        .route("/admin/calendar-locks", get(list_calendar_locks))
        .route("/admin/search-employee", get(search_employee))
        .route(
            "/admin/employee-allowance/{employee_code}/{month}",
            get(employee_allowance),
        )
}

/// Request body for adding a manager.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateManagerRequest {
    /// Company employee number.
    #[serde(alias = "employeeCode")]
    #[validate(length(min = 1, max = 50, message = "Employee code is required"))]
    pub employee_code: String,
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
}

/// Request body for locking or unlocking a month.
#[derive(Debug, Deserialize)]
pub struct CalendarLockRequest {
    /// Month key, `YYYY-MM`.
    pub month: String,
    /// Lock when true, unlock when false.
    #[serde(alias = "isLocked")]
    pub is_locked: bool,
}

/// A calendar lock record.
#[derive(Debug, Serialize)]
pub struct CalendarLockResponse {
    /// Month key.
    pub month: String,
    /// Whether writes are blocked.
    pub is_locked: bool,
    /// Admin who last changed the lock.
    pub locked_by: Option<Uuid>,
    /// Their name, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_by_name: Option<String>,
    /// When the month was locked; empty while unlocked.
    pub locked_at: Option<DateTime<Utc>>,
}

/// Query string for employee search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Name, employee code or email fragment.
    #[serde(default)]
    pub query: String,
}

/// One employee's month.
#[derive(Debug, Serialize)]
pub struct EmployeeAllowanceResponse {
    /// The employee.
    pub employee: UserResponse,
    /// Month key.
    pub month: MonthKey,
    /// Entries by date.
    pub entries: Vec<EntryResponse>,
    /// Sum of the allowances.
    pub total_allowance: Decimal,
    /// Number of entries.
    pub entry_count: usize,
}

/// POST `/admin/managers` - Add a manager.
async fn create_manager(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(payload): AppJson<CreateManagerRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    auth.require_admin()?;
    payload.validate().map_err(validation_error)?;
    ensure_email_allowed(&state, &payload.email)?;

    let manager = UserRepository::new((*state.db).clone())
        .create_manager(CreateUserInput {
            employee_code: payload.employee_code,
            email: payload.email,
            name: payload.name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json((&manager).into())))
}

/// POST `/admin/calendar-lock` - Lock or unlock a month.
async fn set_calendar_lock(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(payload): AppJson<CalendarLockRequest>,
) -> Result<Json<CalendarLockResponse>, ApiError> {
    auth.require_admin()?;
    let month: MonthKey = payload.month.parse()?;

    let lock = CalendarLockRepository::new((*state.db).clone())
        .set_lock(month, payload.is_locked, auth.user_id())
        .await
        .map_err(db_error)?;

    Ok(Json(CalendarLockResponse {
        month: lock.month,
        is_locked: lock.is_locked,
        locked_by: lock.locked_by,
        locked_by_name: None,
        locked_at: lock.locked_at.map(|at| at.with_timezone(&Utc)),
    }))
}

/// GET `/admin/calendar-locks` - Every lock record, newest month first.
async fn list_calendar_locks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<CalendarLockResponse>>, ApiError> {
    auth.require_admin()?;

    let locks = CalendarLockRepository::new((*state.db).clone())
        .list_with_admin()
        .await
        .map_err(db_error)?;

    Ok(Json(
        locks
            .into_iter()
            .map(|row| CalendarLockResponse {
                month: row.lock.month,
                is_locked: row.lock.is_locked,
                locked_by: row.lock.locked_by,
                locked_by_name: row.locked_by_name,
                locked_at: row.lock.locked_at.map(|at| at.with_timezone(&Utc)),
            })
            .collect(),
    ))
}

/// GET `/admin/search-employee?query=...` - Find employees.
async fn search_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    auth.require_admin()?;

    let found = UserRepository::new((*state.db).clone())
        .search_employees(&params.query)
        .await?;

    Ok(Json(found.iter().map(UserResponse::from).collect()))
}

/// GET `/admin/employee-allowance/{employee_code}/{month}` - One employee's month.
async fn employee_allowance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((employee_code, month)): Path<(String, String)>,
) -> Result<Json<EmployeeAllowanceResponse>, ApiError> {
    auth.require_admin()?;
    let month: MonthKey = month.parse()?;

    let employee = UserRepository::new((*state.db).clone())
        .find_by_employee_code(&employee_code)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found("Employee not found"))?;

    let entries = AllowanceEntryRepository::new((*state.db).clone())
        .list_for_employee_month(UserId::from_uuid(employee.id), month)
        .await
        .map_err(db_error)?;

    Ok(Json(EmployeeAllowanceResponse {
        employee: (&employee).into(),
        month,
        total_allowance: entries_total(&entries),
        entry_count: entries.len(),
        entries: entries.into_iter().map(EntryResponse::from).collect(),
    }))
}
