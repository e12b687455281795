//! The signed-in user's profile.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use shiftpay_core::team::TeamScope;
use shiftpay_db::UserRepository;
use shiftpay_shared::types::UserId;

use super::views::{UserResponse, UserSummary};
use crate::{
    AppState,
    error::{ApiError, db_error},
    middleware::AuthUser,
};

/// Creates the profile routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(get_profile))
}

/// Profile response.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// The user.
    pub user: UserResponse,
    /// Their manager, if any.
    pub manager: Option<UserSummary>,
    /// People the user reviews; only present for managers and admins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Vec<UserSummary>>,
}

/// GET `/me` - Current user with reporting line.
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let repo = UserRepository::new((*state.db).clone());

    let user = repo
        .find_by_id(auth.user_id())
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let manager = match user.manager_id {
        Some(id) => repo
            .find_by_id(UserId::from_uuid(id))
            .await
            .map_err(db_error)?,
        None => None,
    };

    let team = match TeamScope::for_reviewer(auth.user_id(), auth.role()?) {
        Some(scope) => Some(
            repo.members_in_scope(scope)
                .await
                .map_err(db_error)?
                .iter()
                .map(UserSummary::from)
                .collect(),
        ),
        None => None,
    };

    Ok(Json(ProfileResponse {
        user: (&user).into(),
        manager: manager.as_ref().map(UserSummary::from),
        team,
    }))
}
