//! Handlers for task attachments.
//!
//! Uploads arrive as multipart forms with a single `file` field. The bytes go
//! to [`FileStorage`](crate::storage::FileStorage) under a fresh key and the
//! row in `task_files` records the original name and size.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use pmtrack_core::access::{Action, Resource};
use pmtrack_core::error::CoreError;
use pmtrack_core::types::DbId;
use pmtrack_core::validation::FieldErrors;
use pmtrack_db::models::task_file::{NewTaskFile, TaskFile, TaskFileWithUploader};
use pmtrack_db::repositories::TaskFileRepo;
use pmtrack_events::ActivityEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::{authorize, load_project, load_task, load_task_with_project};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::new_storage_key;

/// Longest stored filename; longer names are truncated.
const MAX_FILENAME_CHARS: usize = 255;

fn file_error(message: impl Into<String>) -> AppError {
    let mut errors = FieldErrors::new();
    errors.add("file", message);
    CoreError::InvalidFields(errors).into()
}

fn too_large(limit: usize) -> AppError {
    file_error(format!(
        "The file may not be greater than {} kilobytes.",
        limit / 1024
    ))
}

/// A body cut off by the route's size limit is reported as an oversize file.
fn multipart_error(err: MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large(limit)
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// Strip any client-side directory part and cap the length.
fn clean_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or("").trim();
    let name: String = base.chars().take(MAX_FILENAME_CHARS).collect();
    if name.is_empty() {
        "upload".to_string()
    } else {
        name
    }
}

/// `Content-Disposition` value that is always a valid header.
fn attachment_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| {
            if c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}

/// GET /api/v1/tasks/{id}/files
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TaskFileWithUploader>>>> {
    let (_, project) = load_task_with_project(&state.pool, task_id).await?;
    let resource = Resource::File { uploaded_by: None };
    authorize(&state.pool, user.user_id, &project, resource, Action::Read).await?;
    let files = TaskFileRepo::list_for_task(&state.pool, task_id).await?;
    Ok(Json(DataResponse { data: files }))
}

/// POST /api/v1/tasks/{id}/files
pub async fn upload(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<TaskFile>)> {
    let (task, project) = load_task_with_project(&state.pool, task_id).await?;
    let resource = Resource::File {
        uploaded_by: Some(user.user_id),
    };
    authorize(&state.pool, user.user_id, &project, resource, Action::Create).await?;

    let limit = state.config.max_upload_bytes;
    let mut upload: Option<(String, Option<String>, Vec<u8>)> = None;
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = clean_filename(field.file_name().unwrap_or(""));
        let content_type = field.content_type().map(str::to_string);
        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(|e| multipart_error(e, limit))? {
            if data.len() + chunk.len() > limit {
                return Err(too_large(limit));
            }
            data.extend_from_slice(&chunk);
        }
        upload = Some((filename, content_type, data));
        break;
    }

    let (filename, content_type, data) =
        upload.ok_or_else(|| file_error("The file field is required."))?;

    let storage_key = new_storage_key(&filename);
    state.storage.put(&storage_key, &data).await?;

    let input = NewTaskFile {
        task_id,
        user_id: user.user_id,
        filename,
        storage_key,
        size_bytes: data.len() as i64,
        content_type,
    };
    let file = match TaskFileRepo::create(&state.pool, &input).await {
        Ok(file) => file,
        Err(e) => {
            if let Err(cleanup) = state.storage.delete(&input.storage_key).await {
                tracing::warn!(error = %cleanup, storage_key = %input.storage_key, "Failed to remove orphaned upload");
            }
            return Err(e.into());
        }
    };
    tracing::info!(
        file_id = file.id,
        task_id,
        user_id = user.user_id,
        size_bytes = file.size_bytes,
        "File uploaded"
    );

    state
        .notifier
        .notify(&ActivityEvent::FileUploaded {
            project_id: project.id,
            task_id,
            task_title: task.title,
            filename: file.filename.clone(),
            user_id: user.user_id,
        })
        .await;
    Ok((StatusCode::CREATED, Json(file)))
}

async fn load_file(state: &AppState, id: DbId) -> AppResult<TaskFile> {
    Ok(TaskFileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("File", id))?)
}

/// GET /api/v1/files/{id}/download
pub async fn download(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let file = load_file(&state, id).await?;
    let task = load_task(&state.pool, file.task_id).await?;
    let project = load_project(&state.pool, task.project_id).await?;
    let resource = Resource::File {
        uploaded_by: Some(file.user_id),
    };
    authorize(&state.pool, user.user_id, &project, resource, Action::Read).await?;

    let bytes = state.storage.get(&file.storage_key).await?;
    let content_type = file
        .content_type
        .clone()
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                attachment_disposition(&file.filename),
            ),
        ],
        bytes,
    ))
}

/// DELETE /api/v1/files/{id}
///
/// Allowed for the uploader and the project owner.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let file = load_file(&state, id).await?;
    let task = load_task(&state.pool, file.task_id).await?;
    let project = load_project(&state.pool, task.project_id).await?;
    let resource = Resource::File {
        uploaded_by: Some(file.user_id),
    };
    authorize(&state.pool, user.user_id, &project, resource, Action::Delete).await?;

    TaskFileRepo::delete(&state.pool, id).await?;
    if let Err(e) = state.storage.delete(&file.storage_key).await {
        tracing::warn!(error = %e, storage_key = %file.storage_key, "Failed to remove stored file");
    }
    tracing::info!(file_id = id, user_id = user.user_id, "File deleted");
    Ok(StatusCode::NO_CONTENT)
}
