use axum::extract::State;
use axum::Json;
use pmtrack_db::models::activity_log::ActivityLog;
use pmtrack_db::repositories::ActivityLogRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of entries shown in the notification feed.
pub const FEED_SIZE: i64 = 20;

/// GET /api/v1/notifications
///
/// The caller's most recent activity entries, newest first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ActivityLog>>>> {
    let rows = ActivityLogRepo::list_recent_for_user(&state.pool, user.user_id, FEED_SIZE).await?;
    Ok(Json(DataResponse { data: rows }))
}
