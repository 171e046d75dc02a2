//! Repository for the `task_files` table.

use pmtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::task_file::{NewTaskFile, TaskFile, TaskFileWithUploader};

const COLUMNS: &str =
    "id, task_id, user_id, filename, storage_key, size_bytes, content_type, created_at";

pub struct TaskFileRepo;

impl TaskFileRepo {
    pub async fn create(pool: &PgPool, input: &NewTaskFile) -> Result<TaskFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO task_files (task_id, user_id, filename, storage_key, size_bytes, content_type)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskFile>(&query)
            .bind(input.task_id)
            .bind(input.user_id)
            .bind(&input.filename)
            .bind(&input.storage_key)
            .bind(input.size_bytes)
            .bind(&input.content_type)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TaskFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_files WHERE id = $1");
        sqlx::query_as::<_, TaskFile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Files attached to a task with their uploader's name, newest first.
    pub async fn list_for_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<TaskFileWithUploader>, sqlx::Error> {
        sqlx::query_as::<_, TaskFileWithUploader>(
            "SELECT f.id, f.task_id, f.user_id, u.name AS user_name, f.filename,
                    f.size_bytes, f.content_type, f.created_at
             FROM task_files f
             JOIN users u ON u.id = f.user_id
             WHERE f.task_id = $1
             ORDER BY f.created_at DESC, f.id DESC",
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_files WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Storage keys of every file attached to the task.
    pub async fn storage_keys_for_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT storage_key FROM task_files WHERE task_id = $1")
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    /// Storage keys of every file attached to any task of the project.
    pub async fn storage_keys_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT f.storage_key FROM task_files f
             JOIN tasks t ON t.id = f.task_id
             WHERE t.project_id = $1",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}
