//! Repository for the `tasks` table.
//!
//! Reads return tasks joined with the `{id, name, color}` projection of
//! their project. Every query filters on the owning user's id.

use nexustrack_core::task_status::TaskStatus;
use nexustrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, TaskWithProject, TaskWithProjectRow, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, project_id, title, description, status, created_at, updated_at";

/// Select list for a task aliased `t` joined with its project aliased `p`.
const JOINED_COLUMNS: &str = "t.id, t.user_id, t.project_id, t.title, t.description, t.status, \
                              t.created_at, t.updated_at, \
                              p.name AS project_name, p.color AS project_color";

/// Provides owner-scoped CRUD and aggregate operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning it joined with its project.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<TaskWithProject, sqlx::Error> {
        let query = format!(
            "WITH inserted AS (
                 INSERT INTO tasks (user_id, project_id, title, description, status)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING {COLUMNS}
             )
             SELECT {JOINED_COLUMNS}
             FROM inserted t
             LEFT JOIN projects p ON p.id = t.project_id"
        );
        let row = sqlx::query_as::<_, TaskWithProjectRow>(&query)
            .bind(input.user_id)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.as_str())
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Find a task by ID, only if `user_id` owns it.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's tasks, optionally limited to one project, newest first.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        project_id: Option<DbId>,
    ) -> Result<Vec<TaskWithProject>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM tasks t
             LEFT JOIN projects p ON p.id = t.project_id
             WHERE t.user_id = $1
               AND ($2::uuid IS NULL OR t.project_id = $2)
             ORDER BY t.created_at DESC"
        );
        let rows = sqlx::query_as::<_, TaskWithProjectRow>(&query)
            .bind(user_id)
            .bind(project_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Partially update an owned task.
    ///
    /// `title` and `status` use `COALESCE`. `description` and `project_id`
    /// are presence-aware: an outer `Some` writes the inner value, including
    /// `NULL`, while an outer `None` keeps the stored value.
    ///
    /// Returns `None` if no task with `id` is owned by `user_id`.
    pub async fn update_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<TaskWithProject>, sqlx::Error> {
        let description_provided = input.description.is_some();
        let description_value = input.description.as_ref().and_then(|d| d.as_deref());
        let project_provided = input.project_id.is_some();
        let project_value = input.project_id.flatten();

        let query = format!(
            "WITH updated AS (
                 UPDATE tasks SET
                     title = COALESCE($3, title),
                     description = CASE WHEN $4 THEN $5 ELSE description END,
                     status = COALESCE($6, status),
                     project_id = CASE WHEN $7 THEN $8 ELSE project_id END
                 WHERE id = $1 AND user_id = $2
                 RETURNING {COLUMNS}
             )
             SELECT {JOINED_COLUMNS}
             FROM updated t
             LEFT JOIN projects p ON p.id = t.project_id"
        );
        let row = sqlx::query_as::<_, TaskWithProjectRow>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(description_provided)
            .bind(description_value)
            .bind(input.status.map(TaskStatus::as_str))
            .bind(project_provided)
            .bind(project_value)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Set only the status of an owned task.
    pub async fn update_status_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        status: TaskStatus,
    ) -> Result<Option<TaskWithProject>, sqlx::Error> {
        let input = UpdateTask {
            status: Some(status),
            ..UpdateTask::default()
        };
        Self::update_owned(pool, id, user_id, &input).await
    }

    /// Delete an owned task. Returns `true` if a row was removed.
    pub async fn delete_owned(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count a user's tasks, optionally limited to one project.
    pub async fn count(
        pool: &PgPool,
        user_id: DbId,
        project_id: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM tasks
             WHERE user_id = $1
               AND ($2::uuid IS NULL OR project_id = $2)",
        )
        .bind(user_id)
        .bind(project_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Count a user's tasks grouped by status, optionally limited to one project.
    ///
    /// Returns tuples of (status, count); statuses with no tasks are absent.
    pub async fn count_by_status(
        pool: &PgPool,
        user_id: DbId,
        project_id: Option<DbId>,
    ) -> Result<Vec<(TaskStatus, i64)>, sqlx::Error> {
        let rows: Vec<StatusCount> = sqlx::query_as(
            "SELECT status, COUNT(*) AS count FROM tasks
             WHERE user_id = $1
               AND ($2::uuid IS NULL OR project_id = $2)
             GROUP BY status
             ORDER BY status",
        )
        .bind(user_id)
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|r| (r.status, r.count)).collect())
    }
}

/// Helper struct for the count_by_status query.
#[derive(sqlx::FromRow)]
struct StatusCount {
    #[sqlx(try_from = "String")]
    status: TaskStatus,
    count: i64,
}
