//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pmtrack_core::access::{Action, Resource};
use pmtrack_core::budget::BudgetSummary;
use pmtrack_core::error::CoreError;
use pmtrack_core::project::clamp_list_limit;
use pmtrack_core::report::TaskStats;
use pmtrack_core::types::DbId;
use pmtrack_db::models::project::{CreateProject, Project, UpdateProject};
use pmtrack_db::repositories::{ExpenditureRepo, ProjectRepo, TaskFileRepo, TaskRepo};
use pmtrack_db::DbPool;
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::handlers::{authorize, load_project};
use crate::middleware::auth::AuthUser;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::remove_best_effort;

/// A project with its derived budget figures.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    #[serde(flatten)]
    pub budget: BudgetSummary,
}

/// Task completion statistics and budget figures for one project.
#[derive(Debug, Serialize)]
pub struct ProjectReport {
    pub project: Project,
    pub tasks: TaskStats,
    pub budget: BudgetSummary,
}

async fn budget_for(pool: &DbPool, project: &Project) -> AppResult<BudgetSummary> {
    let amounts = ExpenditureRepo::amounts_for_project(pool, project.id).await?;
    Ok(BudgetSummary::compute(project.budget, amounts))
}

/// POST /api/v1/projects
///
/// The caller becomes the owner and first member.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.check()?;
    let project = ProjectRepo::create_with_owner(&state.pool, user.user_id, &input).await?;
    tracing::info!(project_id = project.id, owner_id = user.user_id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects?limit=N
///
/// Projects the caller owns or belongs to, newest first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<LimitParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let limit = clamp_list_limit(params.limit);
    let projects = ProjectRepo::list_for_user(&state.pool, user.user_id, limit).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    let project = load_project(&state.pool, id).await?;
    authorize(&state.pool, user.user_id, &project, Resource::Project, Action::Read).await?;
    let budget = budget_for(&state.pool, &project).await?;
    Ok(Json(ProjectDetail { project, budget }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = load_project(&state.pool, id).await?;
    authorize(&state.pool, user.user_id, &project, Resource::Project, Action::Update).await?;
    input.check(&project)?;

    let updated = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::not_found("Project", id))?;
    tracing::info!(project_id = id, user_id = user.user_id, "Project updated");
    Ok(Json(updated))
}

/// DELETE /api/v1/projects/{id}
///
/// Dependent rows go through FK cascades; stored task files are removed
/// afterwards on a best-effort basis.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let project = load_project(&state.pool, id).await?;
    authorize(&state.pool, user.user_id, &project, Resource::Project, Action::Delete).await?;

    let keys = TaskFileRepo::storage_keys_for_project(&state.pool, id).await?;
    ProjectRepo::delete(&state.pool, id).await?;
    remove_best_effort(state.storage.as_ref(), &keys).await;

    tracing::info!(project_id = id, user_id = user.user_id, files = keys.len(), "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/projects/{id}/report
pub async fn report(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectReport>> {
    let project = load_project(&state.pool, id).await?;
    authorize(&state.pool, user.user_id, &project, Resource::Project, Action::Read).await?;

    let statuses = TaskRepo::statuses_for_project(&state.pool, id).await?;
    let tasks = TaskStats::from_statuses(statuses.iter().map(String::as_str));
    let budget = budget_for(&state.pool, &project).await?;

    Ok(Json(ProjectReport {
        project,
        tasks,
        budget,
    }))
}
