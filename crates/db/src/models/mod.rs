//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! DTOs expose a `check` method that runs the `validator` shape rules and
//! the domain rules from `pmtrack_core` into one field error map.

pub mod activity_log;
pub mod comment;
pub mod expenditure;
pub mod member;
pub mod project;
pub mod risk_issue;
pub mod task;
pub mod task_file;
pub mod user;

use pmtrack_core::validation::FieldErrors;
use validator::Validate;

/// Run the derive rules of `input`, returning the collected field errors.
pub(crate) fn shape_errors<T: Validate>(input: &T) -> FieldErrors {
    input
        .validate()
        .err()
        .map(FieldErrors::from)
        .unwrap_or_default()
}
