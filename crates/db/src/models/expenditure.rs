//! Project expenditure model and DTO.

use pmtrack_core::error::CoreError;
use pmtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::shape_errors;

/// A row from the `project_expenditures` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Expenditure {
    pub id: DbId,
    pub project_id: DbId,
    pub amount: f64,
    pub description: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExpenditure {
    #[validate(range(min = 0.0, message = "must be at least 0"))]
    pub amount: f64,
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub description: String,
}

impl CreateExpenditure {
    pub fn check(&self) -> Result<(), CoreError> {
        let mut errors = shape_errors(self);
        if !self.amount.is_finite() {
            errors.add("amount", "must be a finite number");
        }
        errors.into_result()
    }
}
