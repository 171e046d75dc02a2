//! Task completion statistics for the project report.

use serde::Serialize;

use crate::task::{STATUS_COMPLETED, STATUS_IN_PROGRESS, STATUS_REVIEW, STATUS_TODO};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: i64,
    pub todo: i64,
    pub in_progress: i64,
    pub review: i64,
    pub completed: i64,
    /// Rounded share of completed tasks, 0 for a project without tasks.
    pub completion_percent: i64,
}

impl TaskStats {
    /// Tally task statuses. Unknown statuses count towards the total only.
    pub fn from_statuses<'a>(statuses: impl IntoIterator<Item = &'a str>) -> Self {
        let mut stats = Self::default();
        for status in statuses {
            stats.total += 1;
            match status {
                STATUS_TODO => stats.todo += 1,
                STATUS_IN_PROGRESS => stats.in_progress += 1,
                STATUS_REVIEW => stats.review += 1,
                STATUS_COMPLETED => stats.completed += 1,
                _ => {}
            }
        }
        if stats.total > 0 {
            stats.completion_percent =
                (stats.completed as f64 / stats.total as f64 * 100.0).round() as i64;
        }
        stats
    }
}
