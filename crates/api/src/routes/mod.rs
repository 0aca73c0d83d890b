pub mod auth;
pub mod health;
pub mod project;
pub mod task;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/me                       current user
///
/// /users/profile                 update display name
/// /users/password                change password
///
/// /projects                      list, create
/// /projects/{id}                 update, delete
///
/// /tasks                         list (?projectId=), create
/// /tasks/stats                   status counts (?projectId=)
/// /tasks/{id}                    update, delete
/// /tasks/{id}/status             update status only
/// ```
///
/// Everything except register and login requires a bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", user::router())
        .nest("/projects", project::router())
        .nest("/tasks", task::router())
}
