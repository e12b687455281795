//! Employee self-service routes.

use axum::{Json, Router, extract::State, routing::get};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use shiftpay_core::calendar::MonthKey;
use shiftpay_core::summary::{HISTORY_MONTHS, previous_months};
use shiftpay_db::AllowanceEntryRepository;
use shiftpay_db::repositories::entries_total;
use shiftpay_shared::types::UserId;

use super::views::EntryResponse;
use crate::{
    AppState,
    error::{ApiError, db_error},
    middleware::AuthUser,
};

/// Creates the employee routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/employee/allowance-history", get(allowance_history))
}

/// One month of an employee's history.
#[derive(Debug, Serialize)]
pub struct MonthHistory {
    /// Month key.
    pub month: MonthKey,
    /// Display name.
    pub month_name: String,
    /// Entries by date.
    pub entries: Vec<EntryResponse>,
    /// Sum of the allowances.
    pub total_allowance: Decimal,
    /// Number of entries.
    pub entry_count: usize,
}

/// The current month and the months before it.
#[derive(Debug, Serialize)]
pub struct AllowanceHistoryResponse {
    /// The current month.
    pub current_month: MonthHistory,
    /// Earlier months, most recent first.
    pub history: Vec<MonthHistory>,
}

/// GET `/employee/allowance-history` - Current month and the six before it.
async fn allowance_history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<AllowanceHistoryResponse>, ApiError> {
    let repo = AllowanceEntryRepository::new((*state.db).clone());
    let current = MonthKey::from_date(Utc::now().date_naive());

    let current_month = load_month(&repo, auth.user_id(), current).await?;

    let mut history = Vec::with_capacity(HISTORY_MONTHS as usize);
    for month in previous_months(current, HISTORY_MONTHS) {
        history.push(load_month(&repo, auth.user_id(), month).await?);
    }

    Ok(Json(AllowanceHistoryResponse {
        current_month,
        history,
    }))
}

async fn load_month(
    repo: &AllowanceEntryRepository,
    employee_id: UserId,
    month: MonthKey,
) -> Result<MonthHistory, ApiError> {
    let entries = repo
        .list_for_employee_month(employee_id, month)
        .await
        .map_err(db_error)?;

    Ok(MonthHistory {
        month,
        month_name: month.display_name(),
        total_allowance: entries_total(&entries),
        entry_count: entries.len(),
        entries: entries.into_iter().map(EntryResponse::from).collect(),
    })
}
