//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use nexustrack_core::types::DbId;

use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from the `Authorization: Bearer <token>` header.
///
/// Add it as a handler parameter to require authentication. Rejection
/// happens before the handler body runs:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %auth.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// The caller's user id (from `claims.sub`).
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

        let claims = verify_token(token, &state.config.jwt)
            .map_err(|_| AppError::unauthorized("Invalid token"))?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
