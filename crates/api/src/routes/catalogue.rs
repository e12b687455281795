//! Entry type catalogue.

use axum::{Json, Router, routing::get};
use shiftpay_core::allowance::{EntryType, EntryTypeInfo};

use crate::AppState;

/// GET `/entry-types` - Every entry type with its allowance and WFH rule.
async fn list_entry_types() -> Json<Vec<EntryTypeInfo>> {
    Json(EntryType::ALL.into_iter().map(EntryType::info).collect())
}

/// Creates the catalogue routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/entry-types", get(list_entry_types))
}
