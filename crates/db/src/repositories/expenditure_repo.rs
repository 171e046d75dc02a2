//! Repository for the `project_expenditures` table.

use pmtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::expenditure::{CreateExpenditure, Expenditure};

const COLUMNS: &str = "id, project_id, amount, description, created_at";

pub struct ExpenditureRepo;

impl ExpenditureRepo {
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateExpenditure,
    ) -> Result<Expenditure, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_expenditures (project_id, amount, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expenditure>(&query)
            .bind(project_id)
            .bind(input.amount)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Expenditure>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_expenditures WHERE id = $1");
        sqlx::query_as::<_, Expenditure>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Expenditure>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_expenditures
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Expenditure>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Every expenditure amount of the project, for budget aggregation.
    pub async fn amounts_for_project(pool: &PgPool, project_id: DbId) -> Result<Vec<f64>, sqlx::Error> {
        sqlx::query_scalar::<_, f64>("SELECT amount FROM project_expenditures WHERE project_id = $1")
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_expenditures WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
