//! Task entity model and DTOs.

use pmtrack_core::error::CoreError;
use pmtrack_core::task;
use pmtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::shape_errors;

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub assigned_to: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub start_time: Option<Timestamp>,
    pub due_time: Option<Timestamp>,
    /// Whole hours, set when the task is completed.
    pub time_spent: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a task. The project comes from the route.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<DbId>,
    /// Defaults to `todo`.
    pub status: Option<String>,
    /// Defaults to `medium`.
    pub priority: Option<String>,
    pub start_time: Option<Timestamp>,
    pub due_time: Option<Timestamp>,
}

impl CreateTask {
    pub fn check(&self) -> Result<(), CoreError> {
        let mut errors = shape_errors(self);
        if let Some(status) = &self.status {
            errors.check("status", task::validate_status(status));
        }
        if let Some(priority) = &self.priority {
            errors.check("priority", task::validate_priority(priority));
        }
        errors.into_result()
    }
}

/// DTO for a partial task update.
///
/// `assigned_to: null` unassigns; an absent field leaves the assignee alone.
/// A `project_id` in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "pmtrack_core::nullable::deserialize")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "pmtrack_core::nullable::deserialize")]
    pub assigned_to: Option<Option<DbId>>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "pmtrack_core::nullable::deserialize")]
    pub start_time: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "pmtrack_core::nullable::deserialize")]
    pub due_time: Option<Option<Timestamp>>,
}

impl UpdateTask {
    pub fn check(&self) -> Result<(), CoreError> {
        let mut errors = shape_errors(self);
        if let Some(status) = &self.status {
            errors.check("status", task::validate_status(status));
        }
        if let Some(priority) = &self.priority {
            errors.check("priority", task::validate_priority(priority));
        }
        errors.into_result()
    }

    /// Start time explicitly given in the request, if any.
    pub fn requested_start(&self) -> Option<Timestamp> {
        self.start_time.flatten()
    }
}

/// Query filters for the cross-project task listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilter {
    pub project_id: Option<DbId>,
    /// Only tasks assigned to the caller.
    #[serde(default)]
    pub assigned_to_me: bool,
    pub limit: Option<i64>,
}
