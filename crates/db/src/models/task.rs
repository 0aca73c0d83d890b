//! Task entity model and DTOs.

use nexustrack_core::task_status::TaskStatus;
use nexustrack_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Minimal projection of the project a task belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskProjectRef {
    pub id: DbId,
    pub name: String,
    pub color: String,
}

/// A task joined with its project projection (`null` when unattached).
#[derive(Debug, Clone, Serialize)]
pub struct TaskWithProject {
    #[serde(flatten)]
    pub task: Task,
    pub project: Option<TaskProjectRef>,
}

/// Row shape of the `tasks LEFT JOIN projects` queries.
#[derive(Debug, FromRow)]
pub(crate) struct TaskWithProjectRow {
    #[sqlx(flatten)]
    pub task: Task,
    pub project_name: Option<String>,
    pub project_color: Option<String>,
}

impl From<TaskWithProjectRow> for TaskWithProject {
    fn from(row: TaskWithProjectRow) -> Self {
        let project = match (row.task.project_id, row.project_name, row.project_color) {
            (Some(id), Some(name), Some(color)) => Some(TaskProjectRef { id, name, color }),
            _ => None,
        };
        Self {
            task: row.task,
            project,
        }
    }
}

/// DTO for creating a new task. The project reference is already verified.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub user_id: DbId,
    pub project_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
}

/// DTO for partially updating a task.
///
/// Outer `None` keeps the stored value. For the nullable columns,
/// `Some(None)` clears them.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub project_id: Option<Option<DbId>>,
}
