//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use nexustrack_core::project_color::{validate_color, DEFAULT_PROJECT_COLOR};
use nexustrack_core::serde_util::deserialize_some;
use nexustrack_core::validation::{validate_project_description, validate_project_name};
use nexustrack_db::models::project::{CreateProject, Project, ProjectWithTaskCount, UpdateProject};
use nexustrack_db::repositories::ProjectRepo;
use serde::Deserialize;

use crate::error::{AppError, AppJson, AppResult};
use crate::handlers::parse_path_id;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const ENTITY: &str = "Project";

/// Request body for creating or updating a project.
///
/// On update an omitted `description` keeps the stored value, while `null`
/// or a blank string clears it.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProjectRequest {
    pub name: String,
    #[serde(deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    pub color: Option<String>,
}

/// GET /api/projects
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProjectWithTaskCount>>> {
    let projects = ProjectRepo::list_with_task_counts(&state.pool, auth.user_id).await?;
    Ok(Json(projects))
}

/// POST /api/projects
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<ProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let create = CreateProject {
        user_id: auth.user_id,
        name: validate_project_name(&input.name)?,
        description: validate_project_description(input.description.flatten().as_deref())?,
        color: validate_color(input.color.as_deref())?
            .unwrap_or_else(|| DEFAULT_PROJECT_COLOR.to_string()),
    };

    let project = ProjectRepo::create(&state.pool, &create).await?;
    tracing::debug!(project_id = %project.id, user_id = %auth.user_id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/projects/{id}
///
/// Omitted `description` and `color` keep their stored values. An explicit
/// `null` or blank `description` clears it.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<ProjectRequest>,
) -> AppResult<Json<Project>> {
    let id = parse_path_id(&id, ENTITY)?;
    let update = UpdateProject {
        name: validate_project_name(&input.name)?,
        description: input
            .description
            .map(|d| validate_project_description(d.as_deref()))
            .transpose()?,
        color: validate_color(input.color.as_deref())?,
    };

    let project = ProjectRepo::update_owned(&state.pool, id, auth.user_id, &update)
        .await?
        .ok_or(AppError::not_found(ENTITY))?;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
///
/// The project's tasks are removed with it.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_path_id(&id, ENTITY)?;
    if ProjectRepo::delete_owned(&state.pool, id, auth.user_id).await? {
        tracing::debug!(project_id = %id, user_id = %auth.user_id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(ENTITY))
    }
}
