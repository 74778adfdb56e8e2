//! Integration tests for login and principal lookup.
//!
//! Tests cover:
//! - POST /api/auth/login (token issuance, wrong credentials)
//! - GET /api/auth/me (token validation, expiry)

mod common;

use axum::http::{Method, StatusCode};
use common::{
    create_test_pool, create_test_app, create_test_user, get_request, get_request_with_auth,
    issue_expired_token, json_request, login, parse_response_body, run_migrations, test_config,
    TestUser,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_login_returns_token_and_principal() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());

    let user = TestUser::with_role("teacher");
    let user_id = create_test_user(&pool, &user).await;

    let request = json_request(
        Method::POST,
        "/api/auth/login",
        json!({ "email": user.email, "password": user.password }),
    );
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["principal"]["id"].as_str().unwrap(), user_id.to_string());
    assert_eq!(body["principal"]["email"].as_str().unwrap(), user.email);
    assert_eq!(body["principal"]["role"].as_str().unwrap(), "teacher");
}

#[tokio::test]
async fn test_login_wrong_password_issues_no_token() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());

    let user = TestUser::with_role("admin");
    create_test_user(&pool, &user).await;

    let request = json_request(
        Method::POST,
        "/api/auth/login",
        json!({ "email": user.email, "password": "wrong_password" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = parse_response_body(response).await;
    assert!(body["token"].as_str().is_none());
}

#[tokio::test]
async fn test_login_unknown_email() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());

    let request = json_request(
        Method::POST,
        "/api/auth/login",
        json!({ "email": "nobody@example.com", "password": "irrelevant" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_round_trips_principal() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());

    let user = TestUser::with_role("admin");
    let user_id = create_test_user(&pool, &user).await;
    let token = login(&app, &user.email, &user.password).await;

    let request = get_request_with_auth("/api/auth/me", &token);
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["id"].as_str().unwrap(), user_id.to_string());
    assert_eq!(body["role"].as_str().unwrap(), "admin");
}

#[tokio::test]
async fn test_me_without_authorization_header() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());

    let request = get_request("/api/auth/me");
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_garbage_token() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());

    let request = get_request_with_auth("/api/auth/me", "not_a_token");
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_expired_token() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());

    let token = issue_expired_token("admin");
    let request = get_request_with_auth("/api/auth/me", &token);
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reports_database() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());

    let request = get_request("/health");
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"].as_str().unwrap(), "healthy");
    assert_eq!(body["database"]["connected"].as_bool().unwrap(), true);
}
