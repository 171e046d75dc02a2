use axum::routing::delete;
use axum::Router;

use crate::handlers::expenditure;
use crate::state::AppState;

/// Routes mounted at `/expenditures`. Creation and listing live under
/// `/projects/{id}/expenditures`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(expenditure::delete))
}
