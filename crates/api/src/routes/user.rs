//! Route definitions for the `/users` resource.

use axum::routing::put;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// PUT /profile  -> update_profile
/// PUT /password -> update_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", put(user::update_profile))
        .route("/password", put(user::update_password))
}
