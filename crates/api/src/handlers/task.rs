//! Handlers for the `/tasks` resource, including per-user statistics.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use nexustrack_core::error::CoreError;
use nexustrack_core::serde_util::deserialize_some;
use nexustrack_core::stats::{StatusCounts, TaskStats};
use nexustrack_core::task_status::TaskStatus;
use nexustrack_core::types::DbId;
use nexustrack_core::validation::{optional_text, validate_task_title};
use nexustrack_db::models::task::{CreateTask, TaskWithProject, UpdateTask};
use nexustrack_db::repositories::{ProjectRepo, TaskRepo};
use serde::Deserialize;

use crate::error::{AppError, AppJson, AppResult};
use crate::handlers::{non_blank, parse_path_id};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const ENTITY: &str = "Task";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /tasks` and `GET /tasks/stats`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    pub project_id: Option<String>,
}

/// Request body for `POST /tasks`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub project_id: Option<String>,
}

/// Request body for `PUT /tasks/{id}`.
///
/// `description` and `projectId` distinguish an omitted key from an
/// explicit `null`: omitted keeps the stored value, `null` clears it.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    #[serde(deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    #[serde(deserialize_with = "deserialize_some")]
    pub project_id: Option<Option<String>>,
}

/// Request body for `PUT /tasks/{id}/status`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/tasks?projectId=
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> AppResult<Json<Vec<TaskWithProject>>> {
    let project_id = parse_project_filter(query.project_id.as_deref())?;
    let tasks = TaskRepo::list(&state.pool, auth.user_id, project_id).await?;
    Ok(Json(tasks))
}

/// POST /api/tasks
///
/// A `projectId` that does not name one of the caller's projects is
/// rejected with 400 and nothing is created.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<TaskWithProject>)> {
    let title = validate_task_title(&input.title)?;
    let description = optional_text("description", input.description.as_deref(), None)?;
    let status = TaskStatus::parse_optional(input.status.as_deref())?.unwrap_or_default();

    let project_id = match non_blank(input.project_id.as_deref()) {
        None => None,
        Some(raw) => Some(
            resolve_owned_project(&state, raw, auth.user_id)
                .await?
                .ok_or_else(|| AppError::BadRequest("Invalid project".into()))?,
        ),
    };

    let task = TaskRepo::create(
        &state.pool,
        &CreateTask {
            user_id: auth.user_id,
            project_id,
            title,
            description,
            status,
        },
    )
    .await?;
    tracing::debug!(task_id = %task.task.id, user_id = %auth.user_id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateTaskRequest>,
) -> AppResult<Json<TaskWithProject>> {
    let id = parse_path_id(&id, ENTITY)?;

    let title = input.title.as_deref().map(validate_task_title).transpose()?;
    let description = input
        .description
        .map(|d| optional_text("description", d.as_deref(), None))
        .transpose()?;
    let status = TaskStatus::parse_optional(input.status.as_deref())?;

    if TaskRepo::find_owned(&state.pool, id, auth.user_id).await?.is_none() {
        return Err(AppError::not_found(ENTITY));
    }

    let project_id = match input.project_id {
        None => None,
        Some(raw) => match non_blank(raw.as_deref()) {
            None => Some(None),
            Some(raw) => Some(Some(
                resolve_owned_project(&state, raw, auth.user_id)
                    .await?
                    .ok_or(AppError::not_found("Project"))?,
            )),
        },
    };

    let update = UpdateTask {
        title,
        description,
        status,
        project_id,
    };
    let task = TaskRepo::update_owned(&state.pool, id, auth.user_id, &update)
        .await?
        .ok_or(AppError::not_found(ENTITY))?;
    Ok(Json(task))
}

/// PUT /api/tasks/{id}/status
pub async fn update_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateStatusRequest>,
) -> AppResult<Json<TaskWithProject>> {
    let id = parse_path_id(&id, ENTITY)?;
    let status = TaskStatus::parse_optional(input.status.as_deref())?
        .ok_or_else(|| CoreError::invalid_field("status", "Status is required"))?;

    let task = TaskRepo::update_status_owned(&state.pool, id, auth.user_id, status)
        .await?
        .ok_or(AppError::not_found(ENTITY))?;
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_path_id(&id, ENTITY)?;
    if TaskRepo::delete_owned(&state.pool, id, auth.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(ENTITY))
    }
}

/// GET /api/tasks/stats?projectId=
///
/// Every status bucket is present. `projectCount` ignores the filter.
pub async fn stats(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> AppResult<Json<TaskStats>> {
    let project_id = parse_project_filter(query.project_id.as_deref())?;

    let (total, groups, project_count) = tokio::try_join!(
        TaskRepo::count(&state.pool, auth.user_id, project_id),
        TaskRepo::count_by_status(&state.pool, auth.user_id, project_id),
        ProjectRepo::count_for_user(&state.pool, auth.user_id),
    )?;

    Ok(Json(TaskStats {
        total,
        by_status: StatusCounts::from_groups(groups),
        project_count,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse the optional `projectId` query filter. Blank means no filter.
fn parse_project_filter(raw: Option<&str>) -> AppResult<Option<DbId>> {
    non_blank(raw)
        .map(|raw| {
            raw.parse::<DbId>()
                .map_err(|_| CoreError::invalid_field("projectId", "projectId is not a valid id"))
        })
        .transpose()
        .map_err(AppError::from)
}

/// Look up `raw` as one of `user_id`'s projects.
///
/// `None` when it is malformed, missing or owned by someone else.
async fn resolve_owned_project(
    state: &AppState,
    raw: &str,
    user_id: DbId,
) -> AppResult<Option<DbId>> {
    let Ok(project_id) = raw.parse::<DbId>() else {
        return Ok(None);
    };
    let project = ProjectRepo::find_owned(&state.pool, project_id, user_id).await?;
    Ok(project.map(|p| p.id))
}
