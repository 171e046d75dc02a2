//! Task comment model and DTO. Comments are append-only.

use pmtrack_core::error::CoreError;
use pmtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::shape_errors;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskComment {
    pub id: DbId,
    pub task_id: DbId,
    pub user_id: DbId,
    pub comment: String,
    pub created_at: Timestamp,
}

/// A comment joined with its author's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskCommentWithAuthor {
    pub id: DbId,
    pub task_id: DbId,
    pub user_id: DbId,
    pub user_name: String,
    pub comment: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComment {
    #[validate(length(min = 1, max = 1000, message = "must be 1-1000 characters"))]
    pub comment: String,
}

impl CreateComment {
    pub fn check(&self) -> Result<(), CoreError> {
        shape_errors(self).into_result()
    }
}
