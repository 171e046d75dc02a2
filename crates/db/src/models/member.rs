//! Project membership model and DTOs.

use pmtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `project_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMember {
    pub project_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
}

/// A member joined with the user's profile, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MemberWithUser {
    pub user_id: DbId,
    pub name: String,
    pub email: String,
    pub joined_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddMember {
    pub user_id: DbId,
}
