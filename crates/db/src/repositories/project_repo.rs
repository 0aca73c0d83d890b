//! Repository for the `projects` table.
//!
//! Every lookup and mutation is keyed on `(id, user_id)`, so a project owned
//! by someone else behaves exactly like one that does not exist.

use nexustrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectWithTaskCount, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, description, color, created_at, updated_at";

/// Provides owner-scoped CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (user_id, name, description, color)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID, only if `user_id` owns it.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's projects with their task counts, most recently created first.
    pub async fn list_with_task_counts(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ProjectWithTaskCount>, sqlx::Error> {
        sqlx::query_as::<_, ProjectWithTaskCount>(
            "SELECT p.id, p.user_id, p.name, p.description, p.color, p.created_at, p.updated_at,
                    COUNT(t.id) AS task_count
             FROM projects p
             LEFT JOIN tasks t ON t.project_id = p.id
             WHERE p.user_id = $1
             GROUP BY p.id
             ORDER BY p.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Update an owned project.
    ///
    /// `color` uses `COALESCE`. `description` is written whenever it is
    /// present, including `NULL`.
    ///
    /// Returns `None` if no project with `id` is owned by `user_id`.
    pub async fn update_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let description_provided = input.description.is_some();
        let description_value = input.description.as_ref().and_then(|d| d.as_deref());

        let query = format!(
            "UPDATE projects SET
                name = $3,
                description = CASE WHEN $4 THEN $5 ELSE description END,
                color = COALESCE($6, color)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(description_provided)
            .bind(description_value)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned project. Its tasks go with it via `ON DELETE CASCADE`.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete_owned(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all projects owned by a user.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
