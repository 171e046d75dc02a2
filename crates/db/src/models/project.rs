//! Project entity model and DTOs.

use pmtrack_core::error::CoreError;
use pmtrack_core::project;
use pmtrack_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::shape_errors;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Date,
    pub due_date: Option<Date>,
    pub status: String,
    pub budget: Option<f64>,
    pub owner_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. The owner is the authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub start_date: Date,
    pub due_date: Option<Date>,
    /// Defaults to `planning` if omitted.
    pub status: Option<String>,
    #[validate(range(min = 0.0, message = "must be at least 0"))]
    pub budget: Option<f64>,
}

impl CreateProject {
    pub fn check(&self) -> Result<(), CoreError> {
        let mut errors = shape_errors(self);
        if let Some(status) = &self.status {
            errors.check("status", project::validate_status(status));
        }
        errors.check(
            "due_date",
            project::validate_schedule(self.start_date, self.due_date),
        );
        errors.into_result()
    }
}

/// DTO for a partial project update. `owner_id` is not updatable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "pmtrack_core::nullable::deserialize")]
    pub description: Option<Option<String>>,
    pub start_date: Option<Date>,
    #[serde(default, deserialize_with = "pmtrack_core::nullable::deserialize")]
    pub due_date: Option<Option<Date>>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "pmtrack_core::nullable::deserialize")]
    pub budget: Option<Option<f64>>,
}

impl UpdateProject {
    /// Validate the patch against the stored row, so the schedule rule sees
    /// the dates the project will have after the update.
    pub fn check(&self, current: &Project) -> Result<(), CoreError> {
        let mut errors = shape_errors(self);
        if let Some(status) = &self.status {
            errors.check("status", project::validate_status(status));
        }
        if let Some(Some(budget)) = self.budget {
            if budget < 0.0 {
                errors.add("budget", "must be at least 0");
            }
        }
        let start = self.start_date.unwrap_or(current.start_date);
        let due = self.due_date.unwrap_or(current.due_date);
        errors.check("due_date", project::validate_schedule(start, due));
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn create(name: &str) -> CreateProject {
        CreateProject {
            name: name.to_string(),
            description: None,
            start_date: date("2025-01-01"),
            due_date: None,
            status: None,
            budget: Some(10_000.0),
        }
    }

    #[test]
    fn valid_create_passes() {
        assert!(create("Launch").check().is_ok());
    }

    #[test]
    fn create_reports_every_bad_field() {
        let input = CreateProject {
            status: Some("archived".into()),
            budget: Some(-5.0),
            due_date: Some(date("2024-12-31")),
            ..create("")
        };
        let err = input.check().unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(fields) => {
            let names: Vec<_> = fields.fields().collect();
            assert_eq!(names, vec!["budget", "due_date", "name", "status"]);
        });
    }

    #[test]
    fn update_checks_schedule_against_stored_dates() {
        let now = chrono::Utc::now();
        let current = Project {
            id: 1,
            name: "Launch".into(),
            description: None,
            start_date: date("2025-03-01"),
            due_date: None,
            status: "planning".into(),
            budget: None,
            owner_id: 1,
            created_at: now,
            updated_at: now,
        };
        let patch = UpdateProject {
            due_date: Some(Some(date("2025-02-01"))),
            ..Default::default()
        };
        assert_matches!(patch.check(&current), Err(CoreError::InvalidFields(_)));

        let clear = UpdateProject {
            due_date: Some(None),
            ..Default::default()
        };
        assert!(clear.check(&current).is_ok());
    }
}
