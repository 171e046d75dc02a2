//! Activity notification for the project tracker.
//!
//! - [`ActivityEvent`]: the domain events that produce activity rows, with
//!   their action tag, recipients and rendered description.
//! - [`ActivityNotifier`]: fans an event out into one row per recipient
//!   through an [`ActivitySink`]. Failures are logged, never returned.
//! - [`PgActivitySink`]: the sink writing to the `activity_logs` table.

pub mod activity;
pub mod notifier;

pub use activity::ActivityEvent;
pub use notifier::{ActivityNotifier, ActivitySink, NotifyOutcome, PgActivitySink, SinkError};
