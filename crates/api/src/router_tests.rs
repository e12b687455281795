//! Router tests that never reach the database.
//!
//! The state holds a disconnected pool, so every request here must be
//! answered by routing, authentication, role checks or request validation.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::Utc;
use http_body_util::BodyExt;
use rstest::rstest;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use shiftpay_shared::{DirectoryConfig, JwtConfig, JwtService, LogNotificationSender};
use tower::ServiceExt;
use uuid::Uuid;

use crate::{AppState, create_router};

const SECRET: &str = "router-test-secret";

fn jwt() -> JwtService {
    JwtService::new(JwtConfig {
        secret: SECRET.into(),
        access_token_expires_secs: 15 * 60,
    })
}

fn app_with_directory(directory: DirectoryConfig) -> Router {
    create_router(AppState {
        db: Arc::new(DatabaseConnection::Disconnected),
        jwt_service: Arc::new(jwt()),
        notifier: Arc::new(LogNotificationSender),
        directory: Arc::new(directory),
    })
}

fn app() -> Router {
    app_with_directory(DirectoryConfig::default())
}

fn token(role: &str) -> String {
    jwt().generate_access_token(Uuid::new_v4(), role).unwrap()
}

fn get(uri: &str, role: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(role) = role {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token(role)));
    }
    builder.body(Body::empty()).unwrap()
}

fn post(uri: &str, role: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(role) = role {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token(role)));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health_reports_database_down() {
    let (status, body) = send(app(), get("/api/v1/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], false);
}

#[tokio::test]
async fn test_entry_type_catalogue_is_public() {
    let (status, body) = send(app(), get("/api/v1/entry-types", None)).await;

    assert_eq!(status, StatusCode::OK);
    let types = body.as_array().unwrap();
    assert_eq!(types.len(), 13);

    let leave = types.iter().find(|t| t["code"] == "leave").unwrap();
    assert_eq!(leave["wfh_allowed"], false);
    assert_eq!(leave["allowance"], "0");

    let oncall = types.iter().find(|t| t["code"] == "oncall").unwrap();
    assert_eq!(oncall["wfh_allowed"], true);
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let (status, body) = send(app(), get("/api/v1/me", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_token");
}

#[tokio::test]
async fn test_malformed_token_is_rejected() {
    let request = Request::builder()
        .uri("/api/v1/me")
        .header(header::AUTHORIZATION, "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_unknown_role_is_rejected() {
    let (status, body) = send(app(), get("/api/v1/me", Some("superuser"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[rstest]
#[case("/api/v1/manager/my-team", "employee")]
#[case("/api/v1/manager/allowance-analytics", "employee")]
#[case("/api/v1/allowance/team/2026-10", "employee")]
#[case("/api/v1/admin/calendar-locks", "employee")]
#[case("/api/v1/admin/calendar-locks", "manager")]
#[case("/api/v1/admin/search-employee?query=jane", "manager")]
#[case("/api/v1/admin/employee-allowance/E100/2026-10", "manager")]
#[tokio::test]
async fn test_role_guards(#[case] uri: &str, #[case] role: &str) {
    let (status, body) = send(app(), get(uri, Some(role))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn test_analytics_range_is_validated() {
    let (status, body) = send(
        app(),
        get("/api/v1/manager/allowance-analytics?months=30", Some("manager")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[rstest]
#[case("/api/v1/allowance/month/2026-13", "employee")]
#[case("/api/v1/allowance/team/october", "manager")]
#[case("/api/v1/admin/employee-allowance/E100/2026-1", "admin")]
#[tokio::test]
async fn test_bad_month_key(#[case] uri: &str, #[case] role: &str) {
    let (status, body) = send(app(), get(uri, Some(role))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_calendar_lock_rejects_bad_month() {
    let (status, body) = send(
        app(),
        post(
            "/api/v1/admin/calendar-lock",
            Some("admin"),
            &json!({ "month": "2026/10", "isLocked": true }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_short_search_query() {
    let (status, body) = send(
        app(),
        get("/api/v1/admin/search-employee?query=a", Some("admin")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Search query must be at least 2 characters");
}

#[tokio::test]
async fn test_wfh_on_day_off_is_rejected_before_storage() {
    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let (status, body) = send(
        app(),
        post(
            "/api/v1/allowance/entry",
            Some("employee"),
            &json!({ "date": today, "type": "leave", "isWFH": true }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_wfh_selection");
}

#[rstest]
#[case(json!({ "date": "yesterday", "type": "5pm", "isWFH": false }), "invalid_date")]
#[case(json!({ "date": "2026-10-01", "type": "wfh", "isWFH": true }), "invalid_type")]
#[case(json!({ "date": "2001-01-01", "type": "5pm", "is_wfh": false }), "edit_window_expired")]
#[tokio::test]
async fn test_entry_rules(#[case] body: Value, #[case] code: &str) {
    let (status, response) = send(
        app(),
        post("/api/v1/allowance/entry", Some("employee"), &body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], code);
}

#[tokio::test]
async fn test_missing_entry_type_is_unknown_type() {
    let (status, body) = send(
        app(),
        post(
            "/api/v1/allowance/entry",
            Some("employee"),
            &json!({ "date": "2026-10-01" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_type");
}

#[rstest]
#[case(json!({ "date": "2026-10-01", "type": 5 }))]
#[case(json!({ "date": "2026-10-01", "type": "5pm", "isWFH": "true" }))]
#[case(json!("5pm"))]
#[tokio::test]
async fn test_malformed_entry_body_uses_error_envelope(#[case] body: Value) {
    let (status, response) = send(
        app(),
        post("/api/v1/allowance/entry", Some("employee"), &body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "validation_error");
    assert!(response["message"].is_string());
}

#[tokio::test]
async fn test_non_json_body_uses_error_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/setup/admin")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_query_requires_message() {
    let (status, body) = send(
        app(),
        post(
            "/api/v1/manager/query-employee",
            Some("manager"),
            &json!({ "employee_code": "E100", "date": "2026-10-01", "type": "5pm", "message": "" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_setup_rejects_invalid_email() {
    let (status, body) = send(
        app(),
        post(
            "/api/v1/setup/admin",
            None,
            &json!({ "employee_code": "A1", "email": "not-an-email", "name": "Ada" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_setup_enforces_company_domain() {
    let app = app_with_directory(DirectoryConfig {
        allowed_email_domain: Some("acme.com".into()),
    });
    let (status, body) = send(
        app,
        post(
            "/api/v1/setup/admin",
            None,
            &json!({ "employeeCode": "A1", "email": "ada@gmail.com", "name": "Ada" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email address is not in the company domain");
}
