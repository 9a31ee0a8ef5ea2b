use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::text_extractor::MediaType;
use crate::models::resume::{ResumeRow, ResumeSummaryRow, STATUS_PROCESSING};
use crate::resume::pipeline::spawn_processing;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub resume_id: Uuid,
    pub filename: String,
    pub status: String,
}

/// POST /api/v1/resumes
///
/// Accepts a multipart form with a `resume` file field, stores the file
/// under the configured upload directory, and kicks off extraction in the
/// background. Responds 201 immediately; poll the detail endpoint for the
/// processing outcome.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut upload: Option<(String, String, bytes::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("resume") {
            continue;
        }
        let original_name = field
            .file_name()
            .unwrap_or("resume")
            .to_string();
        let mime_type = field
            .content_type()
            .ok_or_else(|| AppError::Validation("File field is missing a content type".into()))?
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some((original_name, mime_type, data));
        break;
    }

    let (original_name, mime_type, data) =
        upload.ok_or_else(|| AppError::Validation("Missing 'resume' file field".into()))?;

    let media = MediaType::from_mime(&mime_type)
        .ok_or_else(|| AppError::UnsupportedMedia(mime_type.clone()))?;

    if data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".into()));
    }
    if data.len() > state.config.max_upload_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "File is {} bytes; limit is {}",
            data.len(),
            state.config.max_upload_bytes
        )));
    }

    let id = Uuid::new_v4();
    let file_path = format!(
        "{}/resume-{id}.{}",
        state.config.upload_dir,
        media.as_str()
    );

    tokio::fs::create_dir_all(&state.config.upload_dir)
        .await
        .map_err(|e| AppError::Storage(format!("Failed to create upload dir: {e}")))?;
    tokio::fs::write(&file_path, &data)
        .await
        .map_err(|e| AppError::Storage(format!("Failed to write {file_path}: {e}")))?;

    let row: ResumeRow = sqlx::query_as(
        r#"
        INSERT INTO resumes
            (id, user_id, original_name, file_path, file_size, mime_type, processing_status)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(params.user_id)
    .bind(&original_name)
    .bind(&file_path)
    .bind(data.len() as i64)
    .bind(&mime_type)
    .bind(STATUS_PROCESSING)
    .fetch_one(&state.db)
    .await?;

    info!(
        "Resume {id} uploaded for user {} ({} bytes, {mime_type})",
        params.user_id,
        data.len()
    );

    // Fire and forget; the row carries the outcome.
    let _handle = spawn_processing(state.db.clone(), row.id);

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            resume_id: row.id,
            filename: row.original_name,
            status: row.processing_status,
        }),
    ))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ResumeSummaryRow>>, AppError> {
    let resumes: Vec<ResumeSummaryRow> = sqlx::query_as(
        r#"
        SELECT id, user_id, original_name, file_size, mime_type,
               processing_status, processing_error, milestones_created, created_at
        FROM resumes
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(resumes))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeRow>, AppError> {
    let resume: Option<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(params.user_id)
            .fetch_optional(&state.db)
            .await?;
    let resume = resume.ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(resume))
}

/// DELETE /api/v1/resumes/:id
///
/// Removes the resume row, its derived milestones, and (best effort) the
/// stored file.
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let resume: Option<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(params.user_id)
            .fetch_optional(&state.db)
            .await?;
    let resume = resume.ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    sqlx::query("DELETE FROM milestones WHERE resume_id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;
    sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;

    if let Err(e) = tokio::fs::remove_file(&resume.file_path).await {
        warn!("Could not remove {}: {e}", resume.file_path);
    }

    Ok(StatusCode::NO_CONTENT)
}
