//! Wire types for API responses and request bodies.

use nexustrack_core::task_status::TaskStatus;
use nexustrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

pub use nexustrack_core::stats::{StatusCounts, TaskStats};

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub created_at: Timestamp,
}

/// Body returned by register and login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Only present in list responses.
    #[serde(default)]
    pub task_count: Option<i64>,
}

/// The `{id, name, color}` projection embedded in tasks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectRef {
    pub id: DbId,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub project: Option<ProjectRef>,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body for creating or updating a project.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Body for creating a task.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<DbId>,
}

/// Partial update for a task.
///
/// An outer `None` omits the key so the server keeps the stored value.
/// `Some(None)` on `description` or `project_id` sends an explicit `null`
/// and clears it.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Option<DbId>>,
}
