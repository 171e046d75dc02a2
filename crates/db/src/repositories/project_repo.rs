//! Repository for the `projects` table.

use pmtrack_core::project::STATUS_PLANNING;
use pmtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, start_date, due_date, status, budget, \
                       owner_id, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `owner_id` and enroll the owner as a
    /// member, in one transaction.
    ///
    /// If `status` is `None` in the input, defaults to `planning`.
    pub async fn create_with_owner(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (name, description, start_date, due_date, status, budget, owner_id)
             VALUES ($1, $2, $3, $4, COALESCE($5, '{STATUS_PLANNING}'), $6, $7)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.due_date)
            .bind(&input.status)
            .bind(input.budget)
            .bind(owner_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO project_members (project_id, user_id) VALUES ($1, $2)")
            .bind(project.id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(project)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Projects the user owns or is a member of, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE owner_id = $1
                OR EXISTS (
                    SELECT 1 FROM project_members pm
                    WHERE pm.project_id = projects.id AND pm.user_id = $1
                )
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Fields wrapped in `Option<Option<_>>` are
    /// cleared when the outer value is `Some(None)`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                start_date = COALESCE($5, start_date),
                due_date = CASE WHEN $6 THEN $7 ELSE due_date END,
                status = COALESCE($8, status),
                budget = CASE WHEN $9 THEN $10 ELSE budget END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(input.start_date)
            .bind(input.due_date.is_some())
            .bind(input.due_date.flatten())
            .bind(&input.status)
            .bind(input.budget.is_some())
            .bind(input.budget.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete a project. Tasks, expenditures, risks/issues, memberships and
    /// activity rows go with it through FK cascades.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
