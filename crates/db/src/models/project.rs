//! Project entity model and DTOs.

use nexustrack_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project annotated with the number of tasks attached to it.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWithTaskCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub project: Project,
    pub task_count: i64,
}

/// DTO for creating a new project. Fields are already validated.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
}

/// DTO for updating a project.
///
/// `name` is always rewritten. `None` for `color` keeps the stored value.
/// `description` is presence-aware: `Some(None)` clears it, `None` keeps it.
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub name: String,
    pub description: Option<Option<String>>,
    pub color: Option<String>,
}
