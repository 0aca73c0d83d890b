//! Handlers for the `/auth` resource (register, login, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use nexustrack_core::error::CoreError;
use nexustrack_core::types::DbId;
use nexustrack_core::validation::{normalize_email, validate_password, validate_user_name};
use nexustrack_db::models::user::{CreateUser, UserResponse};
use nexustrack_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::issue_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Same body for unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account and sign it in.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let name = validate_user_name(&input.name, 1)?;
    let email = normalize_email(&input.email)?;
    validate_password("password", &input.password)?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent registration can still hit `uq_users_email`, which
    // classifies to the same 409.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            name,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");

    let token = sign(user.id, &state)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/auth/login
///
/// Authenticate with email + password.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = input.email.trim().to_lowercase();
    if email.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Email and password are required".into(),
        )));
    }

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = sign(user.id, &state)?;
    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(&user),
    }))
}

/// GET /api/auth/me
///
/// Return the authenticated user.
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User not found"))?;
    Ok(Json(UserResponse::from(&user)))
}

fn sign(user_id: DbId, state: &AppState) -> AppResult<String> {
    issue_token(user_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
}
