//! Handlers for the project risk/issue register.
//!
//! Any member may report or update an issue; risks are reserved for the
//! owner. Every create and update is announced to the whole project.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pmtrack_core::access::{Action, Resource};
use pmtrack_core::error::CoreError;
use pmtrack_core::risk_issue::RiskIssueKind;
use pmtrack_core::types::DbId;
use pmtrack_db::models::project::Project;
use pmtrack_db::models::risk_issue::{CreateRiskIssue, RiskIssue, UpdateRiskIssue};
use pmtrack_db::repositories::RiskIssueRepo;
use pmtrack_db::DbPool;
use pmtrack_events::ActivityEvent;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::{authorize, load_project};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

async fn load_entry(pool: &DbPool, id: DbId) -> AppResult<(RiskIssue, Project)> {
    let entry = RiskIssueRepo::find_by_id(pool, id)
        .await?
        .ok_or(CoreError::not_found("Risk/issue", id))?;
    let project = load_project(pool, entry.project_id).await?;
    Ok((entry, project))
}

fn stored_kind(entry: &RiskIssue) -> AppResult<RiskIssueKind> {
    RiskIssueKind::parse(&entry.kind).ok_or_else(|| {
        AppError::InternalError(format!(
            "risks_issues row {} has unknown type '{}'",
            entry.id, entry.kind
        ))
    })
}

/// GET /api/v1/projects/{id}/risks-issues
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<RiskIssue>>>> {
    let project = load_project(&state.pool, project_id).await?;
    authorize(&state.pool, user.user_id, &project, Resource::Project, Action::Read).await?;
    let entries = RiskIssueRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/projects/{id}/risks-issues
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<CreateRiskIssue>,
) -> AppResult<(StatusCode, Json<RiskIssue>)> {
    let project = load_project(&state.pool, project_id).await?;
    // An unrecognized type is still subject to the membership check; the
    // payload check below then rejects it.
    let kind = RiskIssueKind::parse(&input.kind).unwrap_or(RiskIssueKind::Issue);
    let scope = authorize(
        &state.pool,
        user.user_id,
        &project,
        Resource::RiskIssue { kind },
        Action::Create,
    )
    .await?;
    input.check()?;

    let entry = RiskIssueRepo::create(&state.pool, project_id, user.user_id, &input).await?;
    tracing::info!(
        risk_issue_id = entry.id,
        project_id,
        kind = kind.as_str(),
        user_id = user.user_id,
        "Risk/issue created"
    );

    let event =
        ActivityEvent::risk_issue_created(project_id, &scope, &project.name, kind, &entry.title);
    state.notifier.notify(&event).await;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/risks-issues/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<RiskIssue>> {
    let (entry, project) = load_entry(&state.pool, id).await?;
    let kind = stored_kind(&entry)?;
    authorize(
        &state.pool,
        user.user_id,
        &project,
        Resource::RiskIssue { kind },
        Action::Read,
    )
    .await?;
    Ok(Json(entry))
}

/// PUT /api/v1/risks-issues/{id}
///
/// The type of an entry is fixed at creation.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateRiskIssue>,
) -> AppResult<Json<RiskIssue>> {
    let (entry, project) = load_entry(&state.pool, id).await?;
    let kind = stored_kind(&entry)?;
    let scope = authorize(
        &state.pool,
        user.user_id,
        &project,
        Resource::RiskIssue { kind },
        Action::Update,
    )
    .await?;
    input.check()?;

    let updated = RiskIssueRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::not_found("Risk/issue", id))?;
    tracing::info!(risk_issue_id = id, user_id = user.user_id, "Risk/issue updated");

    let event =
        ActivityEvent::risk_issue_updated(project.id, &scope, &project.name, kind, &updated.title);
    state.notifier.notify(&event).await;
    Ok(Json(updated))
}

/// DELETE /api/v1/risks-issues/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let (entry, project) = load_entry(&state.pool, id).await?;
    let kind = stored_kind(&entry)?;
    authorize(
        &state.pool,
        user.user_id,
        &project,
        Resource::RiskIssue { kind },
        Action::Delete,
    )
    .await?;

    RiskIssueRepo::delete(&state.pool, id).await?;
    tracing::info!(risk_issue_id = id, user_id = user.user_id, "Risk/issue deleted");
    Ok(StatusCode::NO_CONTENT)
}
