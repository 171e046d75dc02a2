//! Route definitions for projects and their nested collections.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{expenditure, member, project, risk_issue, task};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET, POST          /                              list, create
/// GET, PUT, DELETE   /{id}                          get_by_id, update, delete
/// GET                /{id}/report                   report
/// GET, POST          /{id}/tasks                    task::list_by_project, task::create
/// GET, POST          /{id}/expenditures             expenditure::list_by_project, create
/// GET, POST          /{id}/risks-issues             risk_issue::list_by_project, create
/// GET, POST          /{id}/members                  member::list, member::add
/// DELETE             /{id}/members/{user_id}        member::remove
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/report", get(project::report))
        .route(
            "/{id}/tasks",
            get(task::list_by_project).post(task::create),
        )
        .route(
            "/{id}/expenditures",
            get(expenditure::list_by_project).post(expenditure::create),
        )
        .route(
            "/{id}/risks-issues",
            get(risk_issue::list_by_project).post(risk_issue::create),
        )
        .route("/{id}/members", get(member::list).post(member::add))
        .route("/{id}/members/{user_id}", delete(member::remove))
}
