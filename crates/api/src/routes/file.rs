use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::file;
use crate::state::AppState;

/// Routes mounted at `/files`.
///
/// ```text
/// GET      /{id}/download                           download
/// DELETE   /{id}                                    delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/download", get(file::download))
        .route("/{id}", delete(file::delete))
}
