//! Route definitions for the `/tasks` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /             -> list
/// POST   /             -> create
/// GET    /stats        -> stats
/// PUT    /{id}         -> update
/// DELETE /{id}         -> delete
/// PUT    /{id}/status  -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task::list).post(task::create))
        .route("/stats", get(task::stats))
        .route("/{id}", put(task::update).delete(task::delete))
        .route("/{id}/status", put(task::update_status))
}
