//! Task attachment metadata. The bytes live in the storage backend under
//! `storage_key`.

use pmtrack_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskFile {
    pub id: DbId,
    pub task_id: DbId,
    pub user_id: DbId,
    pub filename: String,
    #[serde(skip_serializing)]
    pub storage_key: String,
    pub size_bytes: i64,
    pub content_type: Option<String>,
    pub created_at: Timestamp,
}

/// A file joined with its uploader's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskFileWithUploader {
    pub id: DbId,
    pub task_id: DbId,
    pub user_id: DbId,
    pub user_name: String,
    pub filename: String,
    pub size_bytes: i64,
    pub content_type: Option<String>,
    pub created_at: Timestamp,
}

/// Insert payload, assembled by the upload handler after the bytes are stored.
#[derive(Debug, Clone)]
pub struct NewTaskFile {
    pub task_id: DbId,
    pub user_id: DbId,
    pub filename: String,
    pub storage_key: String,
    pub size_bytes: i64,
    pub content_type: Option<String>,
}
