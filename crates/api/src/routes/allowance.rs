//! Allowance entry routes.
//!
//! Employees record and read their own days. Managers and admins read the
//! entries of the people they review.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shiftpay_core::calendar::MonthKey;
use shiftpay_core::entry::EntryWriteInput;
use shiftpay_core::team::{TeamScope, reports_to};
use shiftpay_db::repositories::entries_total;
use shiftpay_db::{AllowanceEntryRepository, CalendarLockRepository, UserRepository};
use shiftpay_shared::types::{AllowanceEntryId, UserId};
use uuid::Uuid;

use super::views::{EntryResponse, EntryWithEmployeeResponse};
use crate::{
    AppState,
    error::{ApiError, db_error},
    extract::AppJson,
    middleware::AuthUser,
};

/// Creates the allowance routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/allowance/month/{month}", get(get_my_month))
        .route("/allowance/entry", post(save_entry))
        .route("/allowance/team/{month}", get(get_team_month))
        .route("/allowance/entry/{id}", get(get_entry))
}

/// Request body for recording a day.
#[derive(Debug, Deserialize)]
pub struct SaveEntryRequest {
    /// `YYYY-MM-DD` or an ISO-8601 timestamp.
    pub date: String,
    /// Entry type code. A missing code is reported as an unknown type.
    #[serde(rename = "type", default)]
    pub entry_type: Option<String>,
    /// Worked from home.
    #[serde(rename = "isWFH", alias = "is_wfh", default)]
    pub is_wfh: bool,
    /// Free-text proof.
    #[serde(default)]
    pub proof: Option<String>,
}

impl From<SaveEntryRequest> for EntryWriteInput {
    fn from(req: SaveEntryRequest) -> Self {
        Self {
            date: req.date,
            entry_type: req.entry_type.unwrap_or_default(),
            is_wfh: req.is_wfh,
            proof: req.proof.unwrap_or_default(),
        }
    }
}

/// One month of the caller's calendar.
#[derive(Debug, Serialize)]
pub struct MonthCalendarResponse {
    /// Month key.
    pub month: MonthKey,
    /// Display name.
    pub month_name: String,
    /// Whether writes to the month are blocked.
    pub locked: bool,
    /// Entries by date.
    pub entries: Vec<EntryResponse>,
    /// Sum of the allowances.
    pub total_allowance: Decimal,
}

/// Entries of everyone the caller reviews for one month.
#[derive(Debug, Serialize)]
pub struct TeamMonthResponse {
    /// Month key.
    pub month: MonthKey,
    /// Whose entries are included.
    pub scope: TeamScope,
    /// Entries by employee name, then date.
    pub entries: Vec<EntryWithEmployeeResponse>,
}

/// GET `/allowance/month/{month}` - The caller's entries for a month.
async fn get_my_month(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(month): Path<String>,
) -> Result<Json<MonthCalendarResponse>, ApiError> {
    let month: MonthKey = month.parse()?;

    let entries = AllowanceEntryRepository::new((*state.db).clone())
        .list_for_employee_month(auth.user_id(), month)
        .await
        .map_err(db_error)?;
    let locked = CalendarLockRepository::new((*state.db).clone())
        .is_locked(month)
        .await
        .map_err(db_error)?;

    Ok(Json(MonthCalendarResponse {
        month,
        month_name: month.display_name(),
        locked,
        total_allowance: entries_total(&entries),
        entries: entries.into_iter().map(EntryResponse::from).collect(),
    }))
}

/// POST `/allowance/entry` - Create or replace the caller's entry for a day.
async fn save_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(payload): AppJson<SaveEntryRequest>,
) -> Result<Json<EntryResponse>, ApiError> {
    let today = Utc::now().date_naive();

    let saved = AllowanceEntryRepository::new((*state.db).clone())
        .save_entry(auth.user_id(), payload.into(), today)
        .await?;

    Ok(Json(saved.into()))
}

/// GET `/allowance/team/{month}` - Entries of the caller's team for a month.
async fn get_team_month(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(month): Path<String>,
) -> Result<Json<TeamMonthResponse>, ApiError> {
    let scope = auth.require_reviewer()?;
    let month: MonthKey = month.parse()?;

    let members = UserRepository::new((*state.db).clone())
        .members_in_scope(scope)
        .await
        .map_err(db_error)?;
    let member_ids: Vec<Uuid> = members.iter().map(|m| m.id).collect();

    let entries = AllowanceEntryRepository::new((*state.db).clone())
        .list_for_employees_month(&member_ids, month)
        .await
        .map_err(db_error)?;

    Ok(Json(TeamMonthResponse {
        month,
        scope,
        entries: entries.into_iter().map(Into::into).collect(),
    }))
}

/// GET `/allowance/entry/{id}` - One entry with its employee.
///
/// Managers only see entries of their direct reports.
async fn get_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<EntryWithEmployeeResponse>, ApiError> {
    let scope = auth.require_reviewer()?;

    let row = AllowanceEntryRepository::new((*state.db).clone())
        .find_with_employee(AllowanceEntryId::from_uuid(id))
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found("Entry not found"))?;

    if let TeamScope::ReportsTo(manager_id) = scope {
        let employee_manager = row
            .employee
            .as_ref()
            .and_then(|e| e.manager_id)
            .map(UserId::from_uuid);
        if !reports_to(employee_manager, manager_id) {
            return Err(ApiError::not_found("Entry not found"));
        }
    }

    Ok(Json(row.into()))
}
