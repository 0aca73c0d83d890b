#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use nexustrack_api::auth::jwt::JwtConfig;
use nexustrack_api::config::ServerConfig;
use nexustrack_api::router::build_app_router;
use nexustrack_api::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret-for-integration-tests";

/// Build a test `ServerConfig` with a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            expiry_hours: 1,
        },
    }
}

/// Build the production router (same middleware stack) over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub const TEST_PASSWORD: &str = "secret123";

/// Register a user through the API and return `(token, user json)`.
pub async fn register(app: &Router, name: &str, email: &str) -> (String, Value) {
    let response = post_json(
        app.clone(),
        "/api/auth/register",
        json!({ "name": name, "email": email, "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let token = json["token"].as_str().unwrap().to_string();
    (token, json["user"].clone())
}

/// Create a project and return its JSON.
pub async fn create_project(app: &Router, token: &str, body: Value) -> Value {
    let response = post_json_auth(app.clone(), "/api/projects", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Create a task and return its JSON.
pub async fn create_task(app: &Router, token: &str, body: Value) -> Value {
    let response = post_json_auth(app.clone(), "/api/tasks", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
