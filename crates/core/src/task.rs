//! Task status/priority values and the update state machine.
//!
//! Handlers feed the stored task state plus the requested patch into the
//! helpers here to learn (a) whether the update reverts a completed task,
//! (b) what `time_spent` becomes, and (c) how the assignee changed, which
//! decides the notification that is sent.

use crate::types::{DbId, Timestamp};

pub const STATUS_TODO: &str = "todo";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_REVIEW: &str = "review";
pub const STATUS_COMPLETED: &str = "completed";

pub const VALID_STATUSES: &[&str] = &[
    STATUS_TODO,
    STATUS_IN_PROGRESS,
    STATUS_REVIEW,
    STATUS_COMPLETED,
];

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";
pub const PRIORITY_URGENT: &str = "urgent";

pub const VALID_PRIORITIES: &[&str] = &[
    PRIORITY_LOW,
    PRIORITY_MEDIUM,
    PRIORITY_HIGH,
    PRIORITY_URGENT,
];

pub fn validate_status(status: &str) -> Result<(), String> {
    crate::validation::validate_one_of(status, VALID_STATUSES, "task status")
}

pub fn validate_priority(priority: &str) -> Result<(), String> {
    crate::validation::validate_one_of(priority, VALID_PRIORITIES, "task priority")
}

/// Whether applying `requested` moves a completed task back to another status.
pub fn is_revert_from_completed(current: &str, requested: Option<&str>) -> bool {
    current == STATUS_COMPLETED && requested.is_some_and(|s| s != STATUS_COMPLETED)
}

/// Whether applying `requested` moves a not-yet-completed task into `completed`.
pub fn is_completion(current: &str, requested: Option<&str>) -> bool {
    current != STATUS_COMPLETED && requested == Some(STATUS_COMPLETED)
}

/// Whole hours elapsed between `start` and `now`, floored. A start in the
/// future counts as zero.
pub fn elapsed_hours(start: Timestamp, now: Timestamp) -> i32 {
    let hours = (now - start).num_hours().max(0);
    i32::try_from(hours).unwrap_or(i32::MAX)
}

/// `time_spent` to store after an update, or `None` to leave it as is.
///
/// Only a transition into `completed` produces a value, measured from the
/// request's `start_time` if given, else the stored one. Without any start
/// time nothing is derived.
pub fn time_spent_on_completion(
    current_status: &str,
    requested_status: Option<&str>,
    stored_start: Option<Timestamp>,
    requested_start: Option<Timestamp>,
    now: Timestamp,
) -> Option<i32> {
    if !is_completion(current_status, requested_status) {
        return None;
    }
    requested_start
        .or(stored_start)
        .map(|start| elapsed_hours(start, now))
}

/// How the assignee of a task changed across an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentChange {
    Unchanged,
    /// Nobody was assigned; now `0` is.
    Assigned(DbId),
    /// Assignment moved from one user to another.
    Reassigned { from: DbId, to: DbId },
    /// `0` was assigned; now nobody is.
    Unassigned(DbId),
}

impl AssignmentChange {
    pub fn classify(previous: Option<DbId>, next: Option<DbId>) -> Self {
        match (previous, next) {
            (None, Some(to)) => Self::Assigned(to),
            (Some(from), Some(to)) if from != to => Self::Reassigned { from, to },
            (Some(from), None) => Self::Unassigned(from),
            _ => Self::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    #[test]
    fn classify_assignment_transitions() {
        assert_eq!(AssignmentChange::classify(None, None), AssignmentChange::Unchanged);
        assert_eq!(AssignmentChange::classify(Some(3), Some(3)), AssignmentChange::Unchanged);
        assert_eq!(AssignmentChange::classify(None, Some(4)), AssignmentChange::Assigned(4));
        assert_eq!(
            AssignmentChange::classify(Some(3), Some(4)),
            AssignmentChange::Reassigned { from: 3, to: 4 }
        );
        assert_matches!(AssignmentChange::classify(Some(3), None), AssignmentChange::Unassigned(3));
    }

    #[test]
    fn revert_detection() {
        assert!(is_revert_from_completed("completed", Some("in_progress")));
        assert!(!is_revert_from_completed("completed", Some("completed")));
        assert!(!is_revert_from_completed("completed", None));
        assert!(!is_revert_from_completed("review", Some("todo")));
    }

    #[test]
    fn completion_measures_from_stored_start() {
        let now = Utc::now();
        let start = now - Duration::hours(3) - Duration::minutes(10);
        let spent = time_spent_on_completion("in_progress", Some("completed"), Some(start), None, now);
        assert_eq!(spent, Some(3));
    }

    #[test]
    fn completion_prefers_requested_start() {
        let now = Utc::now();
        let stored = now - Duration::hours(10);
        let requested = now - Duration::hours(2);
        let spent =
            time_spent_on_completion("todo", Some("completed"), Some(stored), Some(requested), now);
        assert_eq!(spent, Some(2));
    }

    #[test]
    fn no_time_spent_without_start_or_transition() {
        let now = Utc::now();
        assert_eq!(time_spent_on_completion("todo", Some("completed"), None, None, now), None);
        assert_eq!(
            time_spent_on_completion("completed", Some("completed"), Some(now), None, now),
            None
        );
        assert_eq!(
            time_spent_on_completion("todo", Some("review"), Some(now), None, now),
            None
        );
    }

    #[test]
    fn future_start_counts_as_zero_hours() {
        let now = Utc::now();
        assert_eq!(elapsed_hours(now + Duration::hours(5), now), 0);
    }

    #[test]
    fn validates_enumerations() {
        assert!(validate_status("review").is_ok());
        assert!(validate_status("done").is_err());
        assert!(validate_priority("urgent").is_ok());
        assert!(validate_priority("critical").is_err());
    }
}
