//! Risk / issue register model and DTOs.

use pmtrack_core::error::CoreError;
use pmtrack_core::risk_issue;
use pmtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::shape_errors;

/// A row from the `risks_issues` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RiskIssue {
    pub id: DbId,
    pub project_id: DbId,
    /// `risk` or `issue`, fixed at creation.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: Option<String>,
    pub impact_level: String,
    pub status: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an entry. New entries always start `open`; a `status`
/// in the body is ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRiskIssue {
    #[serde(rename = "type")]
    pub kind: String,
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `medium`.
    pub impact_level: Option<String>,
}

impl CreateRiskIssue {
    pub fn check(&self) -> Result<(), CoreError> {
        let mut errors = shape_errors(self);
        errors.check("type", risk_issue::validate_type(&self.kind));
        if let Some(level) = &self.impact_level {
            errors.check("impact_level", risk_issue::validate_impact_level(level));
        }
        errors.into_result()
    }
}

/// DTO for a partial update. The entry's type cannot change; a `type` in
/// the body is ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRiskIssue {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "pmtrack_core::nullable::deserialize")]
    pub description: Option<Option<String>>,
    pub impact_level: Option<String>,
    pub status: Option<String>,
}

impl UpdateRiskIssue {
    pub fn check(&self) -> Result<(), CoreError> {
        let mut errors = shape_errors(self);
        if let Some(level) = &self.impact_level {
            errors.check("impact_level", risk_issue::validate_impact_level(level));
        }
        if let Some(status) = &self.status {
            errors.check("status", risk_issue::validate_status(status));
        }
        errors.into_result()
    }
}
