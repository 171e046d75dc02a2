//! Route definitions for tasks, their comments and their attachments.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::{comment, file, task};
use crate::state::AppState;

/// Multipart framing allowance on top of the file size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET                /                              list (?project_id, assigned_to_me, limit)
/// GET, PUT, DELETE   /{id}                          get_by_id, update, delete
/// GET, POST          /{id}/comments                 comment::list, comment::create
/// GET, POST          /{id}/files                    file::list, file::upload (multipart)
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(task::list))
        .route(
            "/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
        .route("/{id}/comments", get(comment::list).post(comment::create))
        .route(
            "/{id}/files",
            get(file::list).post(file::upload).layer(DefaultBodyLimit::max(
                max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
            )),
        )
}
