//! Handlers for project expenditures.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pmtrack_core::access::{Action, Resource};
use pmtrack_core::error::CoreError;
use pmtrack_core::types::DbId;
use pmtrack_db::models::expenditure::{CreateExpenditure, Expenditure};
use pmtrack_db::repositories::ExpenditureRepo;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::{authorize, load_project};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/expenditures
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Expenditure>>>> {
    let project = load_project(&state.pool, project_id).await?;
    authorize(&state.pool, user.user_id, &project, Resource::Project, Action::Read).await?;
    let items = ExpenditureRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/projects/{id}/expenditures
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<CreateExpenditure>,
) -> AppResult<(StatusCode, Json<Expenditure>)> {
    let project = load_project(&state.pool, project_id).await?;
    authorize(&state.pool, user.user_id, &project, Resource::Expenditure, Action::Create).await?;
    input.check()?;

    let item = ExpenditureRepo::create(&state.pool, project_id, &input).await?;
    tracing::info!(
        expenditure_id = item.id,
        project_id,
        amount = item.amount,
        "Expenditure recorded"
    );
    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /api/v1/expenditures/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let item = ExpenditureRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Expenditure", id))?;
    let project = load_project(&state.pool, item.project_id).await?;
    authorize(&state.pool, user.user_id, &project, Resource::Expenditure, Action::Delete).await?;

    ExpenditureRepo::delete(&state.pool, id).await?;
    tracing::info!(expenditure_id = id, project_id = project.id, "Expenditure deleted");
    Ok(StatusCode::NO_CONTENT)
}
