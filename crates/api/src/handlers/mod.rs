//! HTTP handlers.
//!
//! Every mutating handler follows the same sequence: load the entities it
//! touches (404 on a miss), load the project's [`ProjectScope`], ask
//! [`access::decide`] (403 on deny), validate the payload, persist, then
//! hand an activity event to the notifier.

pub mod comment;
pub mod expenditure;
pub mod file;
pub mod member;
pub mod notification;
pub mod project;
pub mod risk_issue;
pub mod task;
pub mod user;

use pmtrack_core::access::{self, Action, ProjectScope, Resource};
use pmtrack_core::error::CoreError;
use pmtrack_core::types::DbId;
use pmtrack_db::models::project::Project;
use pmtrack_db::models::task::Task;
use pmtrack_db::repositories::{MemberRepo, ProjectRepo, TaskRepo, UserRepo};
use pmtrack_db::DbPool;

use crate::error::AppResult;

pub(crate) async fn load_project(pool: &DbPool, id: DbId) -> AppResult<Project> {
    Ok(ProjectRepo::find_by_id(pool, id)
        .await?
        .ok_or(CoreError::not_found("Project", id))?)
}

pub(crate) async fn load_task(pool: &DbPool, id: DbId) -> AppResult<Task> {
    Ok(TaskRepo::find_by_id(pool, id)
        .await?
        .ok_or(CoreError::not_found("Task", id))?)
}

/// Load a task together with the project it belongs to.
pub(crate) async fn load_task_with_project(pool: &DbPool, id: DbId) -> AppResult<(Task, Project)> {
    let task = load_task(pool, id).await?;
    let project = load_project(pool, task.project_id).await?;
    Ok((task, project))
}

/// Load the scope of `project` and require `actor` to be allowed `action`
/// on `resource`. Returns the scope for callers that need the audience.
pub(crate) async fn authorize(
    pool: &DbPool,
    actor: DbId,
    project: &Project,
    resource: Resource,
    action: Action,
) -> AppResult<ProjectScope> {
    let scope = MemberRepo::scope_for(pool, project).await?;
    let decision = access::decide(actor, &scope, &resource, action);
    if !decision.is_allowed() {
        tracing::debug!(
            user_id = actor,
            project_id = project.id,
            ?resource,
            ?action,
            "Access denied"
        );
    }
    decision.into_result()?;
    Ok(scope)
}

/// Field error unless `user_id` names an existing user.
pub(crate) async fn require_user(pool: &DbPool, field: &str, user_id: DbId) -> AppResult<()> {
    if UserRepo::find_by_id(pool, user_id).await?.is_none() {
        let mut errors = pmtrack_core::validation::FieldErrors::new();
        errors.add(field, format!("User {user_id} does not exist"));
        errors.into_result()?;
    }
    Ok(())
}
