//! Project status values, listing limits, and schedule validation.

use crate::types::Date;

/// Work has not started yet.
pub const STATUS_PLANNING: &str = "planning";

/// Work is underway.
pub const STATUS_ACTIVE: &str = "active";

/// Work is paused.
pub const STATUS_ON_HOLD: &str = "on_hold";

/// Work is finished.
pub const STATUS_COMPLETED: &str = "completed";

/// All valid project status values.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PLANNING,
    STATUS_ACTIVE,
    STATUS_ON_HOLD,
    STATUS_COMPLETED,
];

/// Projects returned by the dashboard listing when no `limit` is given.
pub const DEFAULT_LIST_LIMIT: i64 = 5;

/// Upper bound for the listing `limit` parameter.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Validate that a status string is one of [`VALID_STATUSES`].
pub fn validate_status(status: &str) -> Result<(), String> {
    crate::validation::validate_one_of(status, VALID_STATUSES, "project status")
}

/// Validate that the due date, when present, is not before the start date.
pub fn validate_schedule(start_date: Date, due_date: Option<Date>) -> Result<(), String> {
    match due_date {
        Some(due) if due < start_date => Err(format!(
            "Due date {due} must be on or after the start date {start_date}"
        )),
        _ => Ok(()),
    }
}

/// Clamp a requested listing limit into `1..=MAX_LIST_LIMIT`.
pub fn clamp_list_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT)
}
