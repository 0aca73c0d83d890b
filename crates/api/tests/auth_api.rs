//! HTTP-level integration tests for registration, login and the auth gate.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get, get_auth, post_json, register, send, TEST_PASSWORD};
use nexustrack_api::auth::jwt::{issue_token, JwtConfig};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_returns_token_and_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/register",
        json!({ "name": "  Ada  ", "email": " Ada@Example.COM ", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["name"], "Ada");
    assert_eq!(json["user"]["email"], "ada@example.com");
    assert!(json["user"]["id"].is_string());
    assert!(json["user"]["createdAt"].is_string());
    assert!(json["user"].get("passwordHash").is_none());
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(&app, "First", "dup@example.com").await;

    let response = post_json(
        app,
        "/api/auth/register",
        json!({ "name": "Second", "email": "DUP@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Email already registered");
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_validates_fields(pool: PgPool) {
    let app = common::build_test_app(pool);

    let cases = [
        (json!({ "name": "", "email": "a@x.com", "password": TEST_PASSWORD }), "name"),
        (json!({ "name": "A", "email": "not-an-email", "password": TEST_PASSWORD }), "email"),
        (json!({ "name": "A", "email": "a@x.com", "password": "12345" }), "password"),
        (json!({ "email": "a@x.com", "password": TEST_PASSWORD }), "name"),
    ];

    for (body, field) in cases {
        let response = post_json(app.clone(), "/api/auth/register", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "field {field}");
        let json = body_json(response).await;
        assert_eq!(json["field"], field);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user) = register(&app, "Lin", "lin@example.com").await;

    let response = post_json(
        app,
        "/api/auth/login",
        json!({ "email": "LIN@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["id"], user["id"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(&app, "Lin", "lin@example.com").await;

    let wrong_password = post_json(
        app.clone(),
        "/api/auth/login",
        json!({ "email": "lin@example.com", "password": "wrong-password" }),
    )
    .await;
    let unknown_email = post_json(
        app,
        "/api/auth/login",
        json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let a = body_json(wrong_password).await;
    let b = body_json(unknown_email).await;
    assert_eq!(a, b);
    assert_eq!(a["error"], "Invalid credentials");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_requires_both_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/auth/login", json!({ "email": "a@x.com" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Me and the auth gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_returns_current_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, user) = register(&app, "Mo", "mo@example.com").await;

    let response = get_auth(app, "/api/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json, user);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_protected_routes_require_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let routes = [
        (Method::GET, "/api/auth/me"),
        (Method::GET, "/api/projects"),
        (Method::POST, "/api/projects"),
        (Method::GET, "/api/tasks"),
        (Method::POST, "/api/tasks"),
        (Method::GET, "/api/tasks/stats"),
        (Method::PUT, "/api/users/profile"),
        (Method::PUT, "/api/users/password"),
    ];

    for (method, uri) in routes {
        let response = send(app.clone(), method.clone(), uri, None, Some(json!({}))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
        let json = body_json(response).await;
        assert_eq!(json["error"], "Authentication required");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_malformed_authorization_header_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = axum::http::Request::builder()
        .uri("/api/tasks")
        .header("authorization", "Token abc")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_token_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let forged = issue_token(
        uuid::Uuid::new_v4(),
        &JwtConfig {
            secret: "some-other-secret".to_string(),
            expiry_hours: 1,
        },
    )
    .unwrap();

    for token in ["garbage", forged.as_str()] {
        let response = get_auth(app.clone(), "/api/tasks", token).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Invalid token");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_for_deleted_user_is_unauthorized_on_me(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, user) = register(&app, "Gone", "gone@example.com").await;

    let user_id: uuid::Uuid = user["id"].as_str().unwrap().parse().unwrap();
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = get_auth(app, "/api/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_and_health_are_public(pool: PgPool) {
    let app = common::build_test_app(pool);
    // No token, but reaches the handler (validation error rather than 401).
    let response = get(app.clone(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = post_json(app, "/api/auth/login", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
