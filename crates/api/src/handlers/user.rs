//! Handlers for the `/users` resource (profile and password of the caller).

use axum::extract::State;
use axum::Json;
use nexustrack_core::validation::{validate_password, validate_user_name, PROFILE_NAME_MIN_LEN};
use nexustrack_db::models::user::UserResponse;
use nexustrack_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /users/profile`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub name: String,
}

/// Request body for `PUT /users/password`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// PUT /api/users/profile
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let name = validate_user_name(&input.name, PROFILE_NAME_MIN_LEN)?;

    let user = UserRepo::update_name(&state.pool, auth.user_id, &name)
        .await?
        .ok_or_else(|| AppError::unauthorized("User not found"))?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/users/password
///
/// The new password is checked against the policy before the current one
/// is verified.
pub async fn update_password(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdatePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_password("newPassword", &input.new_password)?;

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User not found"))?;

    let matches = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !matches {
        return Err(AppError::unauthorized("Current password is incorrect"));
    }

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;

    tracing::info!(user_id = %user.id, "Password updated");
    Ok(Json(MessageResponse {
        message: "Password updated",
    }))
}
