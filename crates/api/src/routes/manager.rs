//! Manager routes: team overview, analytics and queries to employees.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use shiftpay_core::calendar::MonthKey;
use shiftpay_core::entry::parse_entry_date;
use shiftpay_core::query::ManagerQuery;
use shiftpay_core::summary::{MonthTotals, analytics_months, trailing_months};
use shiftpay_db::{AllowanceEntryRepository, UserRepository};
use shiftpay_shared::AppError;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::views::UserSummary;
use crate::{
    AppState,
    error::{ApiError, db_error, validation_error},
    extract::AppJson,
    middleware::AuthUser,
};

/// Creates the manager routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/manager/my-team", get(my_team))
        .route("/manager/query-employee", post(query_employee))
        .route("/manager/allowance-analytics", get(allowance_analytics))
}

/// The caller and the people they review.
#[derive(Debug, Serialize)]
pub struct MyTeamResponse {
    /// The caller.
    pub manager: UserSummary,
    /// Team members by name.
    pub team: Vec<UserSummary>,
    /// Number of team members.
    pub team_count: usize,
    /// Current month key.
    pub current_month: MonthKey,
}

/// Request body for a query about an employee's entry.
#[derive(Debug, Deserialize, Validate)]
pub struct QueryEmployeeRequest {
    /// Employee code of the team member.
    #[serde(alias = "employeeCode", alias = "employeeId")]
    #[validate(length(min = 1, message = "Employee code is required"))]
    pub employee_code: String,
    /// Day the query is about.
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    /// Entry type code as shown to the manager.
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub entry_type: String,
    /// The question.
    #[validate(length(min = 1, max = 2000, message = "Message is required"))]
    pub message: String,
}

/// Query string for analytics.
#[derive(Debug, Deserialize)]
pub struct AnalyticsParams {
    /// Number of months, 1 to 24. Defaults to 6.
    pub months: Option<u32>,
}

/// Monthly totals of the caller's team.
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    /// Oldest month first.
    pub months: Vec<MonthTotals>,
    /// Number of people in the team.
    pub team_size: usize,
}

/// GET `/manager/my-team` - The caller's team.
async fn my_team(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MyTeamResponse>, ApiError> {
    let scope = auth.require_reviewer()?;
    let repo = UserRepository::new((*state.db).clone());

    let manager = repo
        .find_by_id(auth.user_id())
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    let team: Vec<UserSummary> = repo
        .members_in_scope(scope)
        .await
        .map_err(db_error)?
        .iter()
        .map(UserSummary::from)
        .collect();

    Ok(Json(MyTeamResponse {
        manager: (&manager).into(),
        team_count: team.len(),
        team,
        current_month: MonthKey::from_date(Utc::now().date_naive()),
    }))
}

/// POST `/manager/query-employee` - Send a direct report a question about an entry.
async fn query_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(payload): AppJson<QueryEmployeeRequest>,
) -> Result<Json<Value>, ApiError> {
    auth.require_reviewer()?;
    payload.validate().map_err(validation_error)?;
    let date = parse_entry_date(&payload.date)?;

    let repo = UserRepository::new((*state.db).clone());
    let manager = repo
        .find_by_id(auth.user_id())
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    let employee = repo
        .find_team_member(auth.user_id(), &payload.employee_code)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found("Employee not found or not in your team"))?;

    let notification = ManagerQuery {
        employee_email: employee.email,
        manager_name: manager.name,
        date,
        entry_type: payload.entry_type,
        message: payload.message,
    }
    .compose();

    if !state.notifier.send(&notification).await {
        warn!(employee_id = %employee.id, "Manager query could not be delivered");
        return Err(ApiError(AppError::ExternalService(
            "Failed to send notification".to_string(),
        )));
    }

    info!(manager_id = %manager.id, employee_id = %employee.id, %date, "Manager query sent");

    Ok(Json(json!({ "message": "Query sent successfully" })))
}

/// GET `/manager/allowance-analytics?months=N` - Monthly team totals.
async fn allowance_analytics(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<AnalyticsParams>,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    let scope = auth.require_reviewer()?;
    let count = analytics_months(params.months)?;

    let members = UserRepository::new((*state.db).clone())
        .members_in_scope(scope)
        .await
        .map_err(db_error)?;
    if members.is_empty() {
        return Ok(Json(AnalyticsResponse {
            months: Vec::new(),
            team_size: 0,
        }));
    }

    let member_ids: Vec<Uuid> = members.iter().map(|m| m.id).collect();
    let months = trailing_months(MonthKey::from_date(Utc::now().date_naive()), count);

    let totals = AllowanceEntryRepository::new((*state.db).clone())
        .month_totals(&member_ids, &months)
        .await
        .map_err(db_error)?;

    Ok(Json(AnalyticsResponse {
        months: totals,
        team_size: members.len(),
    }))
}
