//! Domain core for the project tracker.
//!
//! Everything here is pure: no database, no HTTP. The API and repository
//! layers depend on this crate for shared types, the error taxonomy, the
//! access-control evaluator, and the budget/task derivations.

pub mod access;
pub mod budget;
pub mod error;
pub mod nullable;
pub mod project;
pub mod report;
pub mod risk_issue;
pub mod task;
pub mod types;
pub mod validation;
