//! Repository for the `activity_logs` table.

use pmtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity_log::{ActivityLog, CreateActivityLog};

const COLUMNS: &str = "id, user_id, project_id, task_id, action, description, created_at";

pub struct ActivityLogRepo;

impl ActivityLogRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs (user_id, project_id, task_id, action, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.user_id)
            .bind(input.project_id)
            .bind(input.task_id)
            .bind(&input.action)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Latest `limit` rows addressed to `user_id`, newest first.
    pub async fn list_recent_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Rows for `user_id` carrying `action`, oldest first.
    pub async fn list_for_user_by_action(
        pool: &PgPool,
        user_id: DbId,
        action: &str,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs
             WHERE user_id = $1 AND action = $2
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(user_id)
            .bind(action)
            .fetch_all(pool)
            .await
    }
}
