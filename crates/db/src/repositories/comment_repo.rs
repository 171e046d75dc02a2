//! Repository for the `task_comments` table. Comments are never updated or
//! deleted individually; they go away with their task.

use pmtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{CreateComment, TaskComment, TaskCommentWithAuthor};

const COLUMNS: &str = "id, task_id, user_id, comment, created_at";

pub struct CommentRepo;

impl CommentRepo {
    pub async fn create(
        pool: &PgPool,
        task_id: DbId,
        user_id: DbId,
        input: &CreateComment,
    ) -> Result<TaskComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO task_comments (task_id, user_id, comment)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskComment>(&query)
            .bind(task_id)
            .bind(user_id)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// Comments on a task with their author's name, oldest first.
    pub async fn list_for_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<TaskCommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, TaskCommentWithAuthor>(
            "SELECT c.id, c.task_id, c.user_id, u.name AS user_name, c.comment, c.created_at
             FROM task_comments c
             JOIN users u ON u.id = c.user_id
             WHERE c.task_id = $1
             ORDER BY c.created_at, c.id",
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }
}
