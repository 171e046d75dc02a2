pub mod expenditure;
pub mod file;
pub mod health;
pub mod notification;
pub mod project;
pub mod risk_issue;
pub mod task;
pub mod user;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree. Every route requires a bearer token.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
/// /projects/{id}/report                            task statistics + budget
/// /projects/{id}/tasks                             list, create
/// /projects/{id}/expenditures                      list, create
/// /projects/{id}/risks-issues                      list, create
/// /projects/{id}/members                           list, add
/// /projects/{id}/members/{user_id}                 remove
///
/// /tasks                                           list (visible to caller)
/// /tasks/{id}                                      get, update, delete
/// /tasks/{id}/comments                             list, create
/// /tasks/{id}/files                                list, upload (multipart)
///
/// /expenditures/{id}                               delete
/// /risks-issues/{id}                               get, update, delete
/// /files/{id}/download                             download
/// /files/{id}                                      delete
///
/// /notifications                                   latest activity for caller
/// /users                                           list
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/tasks", task::router(config.max_upload_bytes))
        .nest("/expenditures", expenditure::router())
        .nest("/risks-issues", risk_issue::router())
        .nest("/files", file::router())
        .nest("/notifications", notification::router())
        .nest("/users", user::router())
}
