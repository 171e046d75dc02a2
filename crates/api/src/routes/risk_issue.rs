use axum::routing::get;
use axum::Router;

use crate::handlers::risk_issue;
use crate::state::AppState;

/// Routes mounted at `/risks-issues`.
///
/// ```text
/// GET, PUT, DELETE   /{id}                          get_by_id, update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(risk_issue::get_by_id)
            .put(risk_issue::update)
            .delete(risk_issue::delete),
    )
}
