//! Router tests that run without a database.
//!
//! The state carries a disconnected `DatabaseConnection`, so these cover
//! routing, authentication and request validation up to the first query.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use fintrack_api::{AppState, create_router};
use fintrack_shared::auth::{ROLE_ADMIN, ROLE_USER};
use fintrack_shared::config::{BudgetSettings, OtpSettings};
use fintrack_shared::{JwtConfig, JwtService};

fn state() -> AppState {
    AppState {
        db: Arc::new(DatabaseConnection::default()),
        jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
        otp: OtpSettings::default(),
        budget: BudgetSettings::default(),
    }
}

fn token(state: &AppState, role: &str) -> String {
    state
        .jwt_service
        .generate_access_token(Uuid::new_v4(), "user@example.com", role)
        .unwrap()
}

fn app(state: &AppState) -> Router {
    create_router(state.clone())
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_reports_database_down() {
    let state = state();
    let response = app(&state)
        .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "down");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let state = state();
    let response = app(&state)
        .oneshot(Request::get("/api/v1/transactions").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let state = state();
    let response = app(&state)
        .oneshot(
            Request::get("/api/v1/dashboard")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_stats_forbidden_for_users() {
    let state = state();
    let response = app(&state)
        .oneshot(
            Request::get("/api/v1/admin/stats")
                .header(header::AUTHORIZATION, format!("Bearer {}", token(&state, ROLE_USER)))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_non_positive_amount_rejected_before_database() {
    let state = state();
    let response = app(&state)
        .oneshot(
            Request::post("/api/v1/transactions")
                .header(header::AUTHORIZATION, format!("Bearer {}", token(&state, ROLE_USER)))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"amount":"-5","type":"expense"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_database_failure_is_sanitized() {
    let state = state();
    let response = app(&state)
        .oneshot(
            Request::get("/api/v1/admin/stats")
                .header(header::AUTHORIZATION, format!("Bearer {}", token(&state, ROLE_ADMIN)))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "DATABASE_ERROR");
    assert_eq!(body["message"], "An internal error occurred");
}
