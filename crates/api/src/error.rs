//! JSON error envelope for handlers.
//!
//! Every failure is rendered as `{"error": "<code>", "message": "<text>"}`
//! with the status code of the underlying [`AppError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use shiftpay_shared::AppError;
use tracing::error;
use validator::ValidationErrors;

/// Handler error wrapping an [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// 401 for a missing or unusable identity.
    #[must_use]
    pub fn unauthorized(message: &str) -> Self {
        Self(AppError::Unauthorized(message.to_string()))
    }

    /// 403 for callers whose role does not allow the action.
    #[must_use]
    pub fn forbidden(message: &str) -> Self {
        Self(AppError::Forbidden(message.to_string()))
    }

    /// 404 for a missing resource.
    #[must_use]
    pub fn not_found(message: &str) -> Self {
        Self(AppError::NotFound(message.to_string()))
    }
}

impl<E> From<E> for ApiError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if err.is_server_error() {
            error!(error = %err, "Request failed");
        }

        (
            status,
            Json(json!({
                "error": err.error_code(),
                "message": err.public_message(),
            })),
        )
            .into_response()
    }
}

/// Converts a database error, for use with `map_err`.
pub fn db_error(err: DbErr) -> ApiError {
    ApiError(AppError::Database(err.to_string()))
}

/// Converts request validation failures, for use with `map_err`.
pub fn validation_error(err: ValidationErrors) -> ApiError {
    ApiError(AppError::Validation(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_rule_error_envelope() {
        let response = ApiError(AppError::Rule {
            code: "month_locked",
            message: "This month is locked and cannot be modified".to_string(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "month_locked");
        assert_eq!(body["message"], "This month is locked and cannot be modified");
    }

    #[tokio::test]
    async fn test_database_error_is_generic() {
        let response = db_error(DbErr::Custom("connection refused".into())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], "Server error");
    }

    #[tokio::test]
    async fn test_not_found() {
        let response = ApiError::not_found("Entry not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "not_found");
    }
}
