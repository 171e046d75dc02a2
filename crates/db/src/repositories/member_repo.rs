//! Repository for the `project_members` table.

use pmtrack_core::access::ProjectScope;
use pmtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::member::{MemberWithUser, ProjectMember};
use crate::models::project::Project;

pub struct MemberRepo;

impl MemberRepo {
    /// Add `user_id` to the project. A duplicate violates `pk_project_members`.
    pub async fn add(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<ProjectMember, sqlx::Error> {
        sqlx::query_as::<_, ProjectMember>(
            "INSERT INTO project_members (project_id, user_id) VALUES ($1, $2)
             RETURNING project_id, user_id, created_at",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Remove a membership. Returns `true` if a row was removed.
    pub async fn remove(pool: &PgPool, project_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND user_id = $2")
                .bind(project_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn member_ids(pool: &PgPool, project_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT user_id FROM project_members WHERE project_id = $1 ORDER BY user_id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Ownership and membership of `project`, for access decisions.
    pub async fn scope_for(pool: &PgPool, project: &Project) -> Result<ProjectScope, sqlx::Error> {
        let members = Self::member_ids(pool, project.id).await?;
        Ok(ProjectScope::new(project.owner_id, members))
    }

    /// Members with their profile, in the order they joined.
    pub async fn list_with_users(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<MemberWithUser>, sqlx::Error> {
        sqlx::query_as::<_, MemberWithUser>(
            "SELECT u.id AS user_id, u.name, u.email, pm.created_at AS joined_at
             FROM project_members pm
             JOIN users u ON u.id = pm.user_id
             WHERE pm.project_id = $1
             ORDER BY pm.created_at, u.id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}
