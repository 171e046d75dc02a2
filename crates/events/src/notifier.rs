//! Fan-out of activity events into per-recipient activity rows.
//!
//! [`ActivityNotifier::notify`] runs after the triggering mutation has been
//! persisted. A failed row write is logged and counted but never surfaces as
//! an error: the mutation already succeeded and is not rolled back.

use std::sync::Arc;

use async_trait::async_trait;
use pmtrack_db::models::activity_log::CreateActivityLog;
use pmtrack_db::repositories::ActivityLogRepo;
use pmtrack_db::DbPool;

use crate::activity::ActivityEvent;

/// Errors a sink may report for a single row.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

/// Destination for activity rows.
#[async_trait]
pub trait ActivitySink: Send + Sync {
    async fn write(&self, entry: &CreateActivityLog) -> Result<(), SinkError>;
}

/// Sink writing rows to the `activity_logs` table.
pub struct PgActivitySink {
    pool: DbPool,
}

impl PgActivitySink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivitySink for PgActivitySink {
    async fn write(&self, entry: &CreateActivityLog) -> Result<(), SinkError> {
        ActivityLogRepo::create(&self.pool, entry).await?;
        Ok(())
    }
}

/// How many rows a [`ActivityNotifier::notify`] call wrote and how many failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyOutcome {
    pub written: usize,
    pub failed: usize,
}

/// Renders events and writes one row per recipient through a sink.
#[derive(Clone)]
pub struct ActivityNotifier {
    sink: Arc<dyn ActivitySink>,
}

impl ActivityNotifier {
    pub fn new(sink: Arc<dyn ActivitySink>) -> Self {
        Self { sink }
    }

    /// Notifier backed by the `activity_logs` table.
    pub fn postgres(pool: DbPool) -> Self {
        Self::new(Arc::new(PgActivitySink::new(pool)))
    }

    /// Write the event's rows. Never fails; see [`NotifyOutcome`].
    pub async fn notify(&self, event: &ActivityEvent) -> NotifyOutcome {
        let action = event.action();
        let description = event.description();
        let mut outcome = NotifyOutcome::default();

        for user_id in event.recipients() {
            let entry = CreateActivityLog {
                user_id,
                project_id: Some(event.project_id()),
                task_id: event.task_id(),
                action: action.to_string(),
                description: description.clone(),
            };
            match self.sink.write(&entry).await {
                Ok(()) => outcome.written += 1,
                Err(e) => {
                    outcome.failed += 1;
                    tracing::error!(
                        error = %e,
                        action,
                        user_id,
                        project_id = event.project_id(),
                        "Failed to write activity row"
                    );
                }
            }
        }

        tracing::debug!(
            action,
            written = outcome.written,
            failed = outcome.failed,
            "Activity notification dispatched"
        );
        outcome
    }
}
