//! First-run setup and employee onboarding.
//!
//! These routes are public. Creating the first admin only works while no
//! admin exists; onboarding creates an employee under an active manager.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use shiftpay_core::auth::UserRole;
use shiftpay_db::repositories::CreateUserInput;
use shiftpay_db::{UserRepository, entities::users};
use shiftpay_shared::{AppError, types::UserId};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::views::{UserResponse, UserSummary};
use crate::{
    AppState,
    error::{ApiError, db_error, validation_error},
    extract::AppJson,
};

/// Creates the setup routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/setup/status", get(setup_status))
        .route("/setup/admin", post(create_admin))
        .route("/setup/employee", post(onboard_employee))
        .route("/setup/managers", get(list_managers))
}

/// Whether the first admin still has to be created.
#[derive(Debug, Serialize)]
pub struct SetupStatusResponse {
    /// True while no admin exists.
    pub needs_setup: bool,
}

/// Request body for creating the first admin.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdminRequest {
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

/// Request body for onboarding an employee.
#[derive(Debug, Deserialize, Validate)]
pub struct OnboardEmployeeRequest {
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
    /// The manager the employee reports to.
    #[serde(alias = "managerId")]
    pub manager_id: Uuid,
}

/// A newly registered user with an access token.
#[derive(Debug, Serialize)]
pub struct RegisteredResponse {
    /// The user.
    pub user: UserResponse,
    /// Their manager, for onboarded employees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<UserSummary>,
    /// Bearer token.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: &'static str,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// GET `/setup/status` - Whether an admin has to be created.
async fn setup_status(State(state): State<AppState>) -> Result<Json<SetupStatusResponse>, ApiError> {
    let admin_exists = UserRepository::new((*state.db).clone())
        .admin_exists()
        .await
        .map_err(db_error)?;

    Ok(Json(SetupStatusResponse {
        needs_setup: !admin_exists,
    }))
}

/// POST `/setup/admin` - Create the first administrator.
async fn create_admin(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAdminRequest>,
) -> Result<(StatusCode, Json<RegisteredResponse>), ApiError> {
    payload.validate().map_err(validation_error)?;
    ensure_email_allowed(&state, &payload.email)?;

    let admin = UserRepository::new((*state.db).clone())
        .create_first_admin(CreateUserInput {
            employee_code: payload.employee_code,
            email: payload.email,
            name: payload.name,
        })
        .await?;

    let response = registered(&state, &admin, None)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST `/setup/employee` - Register an employee under a manager.
async fn onboard_employee(
    State(state): State<AppState>,
    AppJson(payload): AppJson<OnboardEmployeeRequest>,
) -> Result<(StatusCode, Json<RegisteredResponse>), ApiError> {
    payload.validate().map_err(validation_error)?;
    ensure_email_allowed(&state, &payload.email)?;

    let (employee, manager) = UserRepository::new((*state.db).clone())
        .onboard_employee(
            CreateUserInput {
                employee_code: payload.employee_code,
                email: payload.email,
                name: payload.name,
            },
            UserId::from_uuid(payload.manager_id),
        )
        .await?;

    info!(employee_id = %employee.id, manager_id = %manager.id, "Employee completed onboarding");

    let response = registered(&state, &employee, Some(&manager))?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET `/setup/managers` - Active managers to choose from when onboarding.
async fn list_managers(State(state): State<AppState>) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let managers = UserRepository::new((*state.db).clone())
        .list_active_managers()
        .await
        .map_err(db_error)?;

    Ok(Json(managers.iter().map(UserSummary::from).collect()))
}

pub(crate) fn ensure_email_allowed(state: &AppState, email: &str) -> Result<(), ApiError> {
    if state.directory.accepts_email(email) {
        Ok(())
    } else {
        Err(ApiError(AppError::Validation(
            "Email address is not in the company domain".to_string(),
        )))
    }
}

fn registered(
    state: &AppState,
    user: &users::Model,
    manager: Option<&users::Model>,
) -> Result<RegisteredResponse, ApiError> {
    let role: UserRole = user.role.into();
    let access_token = state
        .jwt_service
        .generate_access_token(user.id, role.as_str())?;

    Ok(RegisteredResponse {
        user: user.into(),
        manager: manager.map(UserSummary::from),
        access_token,
        token_type: "Bearer",
        expires_in: state.jwt_service.access_token_expires_in(),
    })
}
