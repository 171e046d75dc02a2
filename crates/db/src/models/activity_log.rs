//! Activity log rows: one per notification recipient, written once.

use pmtrack_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityLog {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub action: String,
    pub description: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateActivityLog {
    pub user_id: DbId,
    pub project_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub action: String,
    pub description: String,
}
