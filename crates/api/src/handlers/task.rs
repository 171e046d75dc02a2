//! Handlers for tasks, both nested under a project and at `/tasks`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use pmtrack_core::access::{Action, Resource};
use pmtrack_core::error::CoreError;
use pmtrack_core::task::{self, AssignmentChange};
use pmtrack_core::types::DbId;
use pmtrack_db::models::task::{CreateTask, Task, TaskFilter, UpdateTask};
use pmtrack_db::repositories::{TaskFileRepo, TaskRepo};
use pmtrack_events::ActivityEvent;

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::handlers::{authorize, load_project, load_task_with_project, require_user};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::remove_best_effort;

/// GET /api/v1/projects/{id}/tasks
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Task>>>> {
    let project = load_project(&state.pool, project_id).await?;
    authorize(&state.pool, user.user_id, &project, Resource::Project, Action::Read).await?;
    let tasks = TaskRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// GET /api/v1/tasks?project_id=&assigned_to_me=&limit=
///
/// Tasks from every project the caller can see, plus tasks assigned to them.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(filter): AppQuery<TaskFilter>,
) -> AppResult<Json<DataResponse<Vec<Task>>>> {
    let tasks = TaskRepo::list_visible(&state.pool, user.user_id, &filter).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// POST /api/v1/projects/{id}/tasks
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let project = load_project(&state.pool, project_id).await?;
    let resource = Resource::Task {
        assigned_to: input.assigned_to,
    };
    authorize(&state.pool, user.user_id, &project, resource, Action::Create).await?;
    input.check()?;
    if let Some(assignee) = input.assigned_to {
        require_user(&state.pool, "assigned_to", assignee).await?;
    }

    let task = TaskRepo::create(&state.pool, project_id, &input).await?;
    tracing::info!(task_id = task.id, project_id, user_id = user.user_id, "Task created");

    let change = AssignmentChange::classify(None, task.assigned_to);
    if let Some(event) = ActivityEvent::for_assignment(change, project_id, task.id, &task.title) {
        state.notifier.notify(&event).await;
    }
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Task>> {
    let (task, project) = load_task_with_project(&state.pool, id).await?;
    let resource = Resource::Task {
        assigned_to: task.assigned_to,
    };
    authorize(&state.pool, user.user_id, &project, resource, Action::Read).await?;
    Ok(Json(task))
}

/// PUT /api/v1/tasks/{id}
///
/// Moving a completed task back to another status additionally requires
/// the project owner. Entering `completed` records `time_spent`.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateTask>,
) -> AppResult<Json<Task>> {
    let (current, project) = load_task_with_project(&state.pool, id).await?;
    let resource = Resource::Task {
        assigned_to: current.assigned_to,
    };
    authorize(&state.pool, user.user_id, &project, resource, Action::Update).await?;
    input.check()?;

    let requested_status = input.status.as_deref();
    if task::is_revert_from_completed(&current.status, requested_status) {
        authorize(
            &state.pool,
            user.user_id,
            &project,
            resource,
            Action::RevertCompleted,
        )
        .await?;
    }
    if let Some(Some(assignee)) = input.assigned_to {
        require_user(&state.pool, "assigned_to", assignee).await?;
    }

    let time_spent = task::time_spent_on_completion(
        &current.status,
        requested_status,
        current.start_time,
        input.requested_start(),
        Utc::now(),
    );
    let updated = TaskRepo::update(&state.pool, id, &input, time_spent)
        .await?
        .ok_or(CoreError::not_found("Task", id))?;
    tracing::info!(
        task_id = id,
        user_id = user.user_id,
        status = %updated.status,
        "Task updated"
    );

    let change = AssignmentChange::classify(current.assigned_to, updated.assigned_to);
    if let Some(event) =
        ActivityEvent::for_assignment(change, updated.project_id, updated.id, &updated.title)
    {
        state.notifier.notify(&event).await;
    }
    Ok(Json(updated))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let (task, project) = load_task_with_project(&state.pool, id).await?;
    let resource = Resource::Task {
        assigned_to: task.assigned_to,
    };
    authorize(&state.pool, user.user_id, &project, resource, Action::Delete).await?;

    let keys = TaskFileRepo::storage_keys_for_task(&state.pool, id).await?;
    TaskRepo::delete(&state.pool, id).await?;
    remove_best_effort(state.storage.as_ref(), &keys).await;

    tracing::info!(task_id = id, user_id = user.user_id, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}
