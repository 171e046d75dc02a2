//! Handlers for task comments. Comments are append-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pmtrack_core::access::{Action, Resource};
use pmtrack_core::types::DbId;
use pmtrack_db::models::comment::{CreateComment, TaskComment, TaskCommentWithAuthor};
use pmtrack_db::repositories::CommentRepo;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::{authorize, load_task_with_project};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tasks/{id}/comments
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TaskCommentWithAuthor>>>> {
    let (_, project) = load_task_with_project(&state.pool, task_id).await?;
    authorize(&state.pool, user.user_id, &project, Resource::Comment, Action::Read).await?;
    let comments = CommentRepo::list_for_task(&state.pool, task_id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/tasks/{id}/comments
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<DbId>,
    AppJson(input): AppJson<CreateComment>,
) -> AppResult<(StatusCode, Json<TaskComment>)> {
    let (_, project) = load_task_with_project(&state.pool, task_id).await?;
    authorize(&state.pool, user.user_id, &project, Resource::Comment, Action::Create).await?;
    input.check()?;

    let comment = CommentRepo::create(&state.pool, task_id, user.user_id, &input).await?;
    tracing::debug!(comment_id = comment.id, task_id, user_id = user.user_id, "Comment added");
    Ok((StatusCode::CREATED, Json(comment)))
}
