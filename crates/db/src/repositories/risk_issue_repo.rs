//! Repository for the `risks_issues` table.

use pmtrack_core::risk_issue::{DEFAULT_IMPACT_LEVEL, DEFAULT_STATUS};
use pmtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::risk_issue::{CreateRiskIssue, RiskIssue, UpdateRiskIssue};

const COLUMNS: &str = "id, project_id, type, title, description, impact_level, status, \
                       created_by, created_at, updated_at";

pub struct RiskIssueRepo;

impl RiskIssueRepo {
    /// Insert an entry. Impact level defaults to `medium`, status to `open`.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        created_by: DbId,
        input: &CreateRiskIssue,
    ) -> Result<RiskIssue, sqlx::Error> {
        let query = format!(
            "INSERT INTO risks_issues
                (project_id, type, title, description, impact_level, status, created_by)
             VALUES ($1, $2, $3, $4,
                     COALESCE($5, '{DEFAULT_IMPACT_LEVEL}'), '{DEFAULT_STATUS}', $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RiskIssue>(&query)
            .bind(project_id)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.impact_level)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RiskIssue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM risks_issues WHERE id = $1");
        sqlx::query_as::<_, RiskIssue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<RiskIssue>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM risks_issues
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, RiskIssue>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRiskIssue,
    ) -> Result<Option<RiskIssue>, sqlx::Error> {
        let query = format!(
            "UPDATE risks_issues SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                impact_level = COALESCE($5, impact_level),
                status = COALESCE($6, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RiskIssue>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(&input.impact_level)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM risks_issues WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
