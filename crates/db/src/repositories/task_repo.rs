//! Repository for the `tasks` table.

use pmtrack_core::project::MAX_LIST_LIMIT;
use pmtrack_core::task::{PRIORITY_MEDIUM, STATUS_TODO};
use pmtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, TaskFilter, UpdateTask};

const COLUMNS: &str = "id, project_id, assigned_to, title, description, status, priority, \
                       start_time, due_time, time_spent, created_at, updated_at";

pub struct TaskRepo;

impl TaskRepo {
    /// Insert a task into `project_id`. Status defaults to `todo`, priority
    /// to `medium`.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (project_id, assigned_to, title, description, status, priority, start_time, due_time)
             VALUES ($1, $2, $3, $4, COALESCE($5, '{STATUS_TODO}'), COALESCE($6, '{PRIORITY_MEDIUM}'), $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(input.assigned_to)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.start_time)
            .bind(input.due_time)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Tasks visible to `user_id`: those in projects the user owns or belongs
    /// to, plus those assigned to the user. Newest first.
    pub async fn list_visible(
        pool: &PgPool,
        user_id: DbId,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks t
             WHERE (
                    t.assigned_to = $1
                 OR EXISTS (SELECT 1 FROM projects p WHERE p.id = t.project_id AND p.owner_id = $1)
                 OR EXISTS (
                        SELECT 1 FROM project_members pm
                        WHERE pm.project_id = t.project_id AND pm.user_id = $1
                    )
               )
               AND ($2::BIGINT IS NULL OR t.project_id = $2)
               AND (NOT $3 OR t.assigned_to = $1)
             ORDER BY t.created_at DESC, t.id DESC
             LIMIT $4"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(filter.project_id)
            .bind(filter.assigned_to_me)
            .bind(filter.limit.map(|l| l.clamp(1, MAX_LIST_LIMIT)))
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. `time_spent`, when `Some`, overwrites the
    /// stored value; the caller derives it on completion.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
        time_spent: Option<i32>,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                assigned_to = CASE WHEN $5 THEN $6 ELSE assigned_to END,
                status = COALESCE($7, status),
                priority = COALESCE($8, priority),
                start_time = CASE WHEN $9 THEN $10 ELSE start_time END,
                due_time = CASE WHEN $11 THEN $12 ELSE due_time END,
                time_spent = COALESCE($13, time_spent)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(input.assigned_to.is_some())
            .bind(input.assigned_to.flatten())
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.start_time.is_some())
            .bind(input.start_time.flatten())
            .bind(input.due_time.is_some())
            .bind(input.due_time.flatten())
            .bind(time_spent)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Status of every task in the project, for report statistics.
    pub async fn statuses_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT status FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
