//! Authentication middleware for protected routes.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{AppState, error::ApiError};
use shiftpay_core::auth::UserRole;
use shiftpay_core::team::TeamScope;
use shiftpay_shared::{Claims, JwtError, types::UserId};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Validates the bearer token and stores its claims for handlers.
///
/// Tokens are issued by the identity provider (or by the setup endpoints with
/// the same secret). A token whose role is not `employee`, `manager` or
/// `admin` is refused here so handlers can rely on the role parsing.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token);

    let Some(token) = token else {
        return unauthorized(
            "missing_token",
            "Authorization header with Bearer token is required",
        );
    };

    let claims = match state.jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(JwtError::Expired) => return unauthorized("token_expired", "Token has expired"),
        Err(_) => return unauthorized("invalid_token", "Invalid or malformed token"),
    };

    if claims.role.parse::<UserRole>().is_err() {
        return unauthorized("invalid_token", "Token carries an unknown role");
    }

    request.extensions_mut().insert(claims);
    next.run(request).await
}

fn unauthorized(error: &str, message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": error, "message": message })),
    )
        .into_response()
}

/// Extractor for authenticated user claims.
///
/// Only available behind [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the user ID from the claims.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::from_uuid(self.0.user_id())
    }

    /// Returns the user's role.
    ///
    /// # Errors
    ///
    /// Returns 401 if the token carries a role this service does not know.
    pub fn role(&self) -> Result<UserRole, ApiError> {
        self.0
            .role
            .parse()
            .map_err(|_| ApiError::unauthorized("Token carries an unknown role"))
    }

    /// Requires a manager or admin, returning whose entries they may see.
    ///
    /// # Errors
    ///
    /// Returns 403 for employees.
    pub fn require_reviewer(&self) -> Result<TeamScope, ApiError> {
        TeamScope::for_reviewer(self.user_id(), self.role()?)
            .ok_or_else(|| ApiError::forbidden("Access denied. Manager role required."))
    }

    /// Requires an admin.
    ///
    /// # Errors
    ///
    /// Returns 403 for employees and managers.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role()?.can_administer() {
            Ok(())
        } else {
            Err(ApiError::forbidden("Access denied. Admin role required."))
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "unauthorized",
                        "message": "Authentication required"
                    })),
                )
            })
    }
}
