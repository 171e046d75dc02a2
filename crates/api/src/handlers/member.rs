//! Handlers for project membership.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pmtrack_core::access::{Action, Resource};
use pmtrack_core::error::CoreError;
use pmtrack_core::types::DbId;
use pmtrack_db::models::member::{AddMember, MemberWithUser};
use pmtrack_db::repositories::{MemberRepo, UserRepo};
use pmtrack_events::ActivityEvent;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::{authorize, load_project};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/members
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<MemberWithUser>>>> {
    let project = load_project(&state.pool, project_id).await?;
    let resource = Resource::Member {
        user_id: user.user_id,
    };
    authorize(&state.pool, user.user_id, &project, resource, Action::Read).await?;
    let members = MemberRepo::list_with_users(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: members }))
}

/// POST /api/v1/projects/{id}/members
pub async fn add(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<AddMember>,
) -> AppResult<(StatusCode, Json<MemberWithUser>)> {
    let project = load_project(&state.pool, project_id).await?;
    let resource = Resource::Member {
        user_id: input.user_id,
    };
    let scope = authorize(&state.pool, user.user_id, &project, resource, Action::Create).await?;

    let new_member = UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or(CoreError::not_found("User", input.user_id))?;
    if scope.is_member(new_member.id) {
        return Err(CoreError::Conflict("User is already a project member.".into()).into());
    }

    let row = MemberRepo::add(&state.pool, project_id, new_member.id).await?;
    tracing::info!(project_id, member_id = new_member.id, "Member added");

    state
        .notifier
        .notify(&ActivityEvent::MemberAdded {
            project_id,
            project_name: project.name.clone(),
            user_id: new_member.id,
        })
        .await;

    Ok((
        StatusCode::CREATED,
        Json(MemberWithUser {
            user_id: new_member.id,
            name: new_member.name,
            email: new_member.email,
            joined_at: row.created_at,
        }),
    ))
}

/// DELETE /api/v1/projects/{id}/members/{user_id}
pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, member_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let project = load_project(&state.pool, project_id).await?;
    let resource = Resource::Member { user_id: member_id };
    authorize(&state.pool, user.user_id, &project, resource, Action::Delete).await?;

    if !MemberRepo::remove(&state.pool, project_id, member_id).await? {
        return Err(CoreError::not_found("Project member", member_id).into());
    }
    tracing::info!(project_id, member_id, "Member removed");

    state
        .notifier
        .notify(&ActivityEvent::MemberRemoved {
            project_id,
            project_name: project.name,
            user_id: member_id,
        })
        .await;
    Ok(StatusCode::NO_CONTENT)
}
