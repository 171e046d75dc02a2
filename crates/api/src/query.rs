//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?limit=` for listings that return a bounded number of rows.
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}
