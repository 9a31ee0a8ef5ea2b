//! Background processing pipeline: file bytes -> plain text -> structured
//! profile -> milestones, with the resume row tracking the outcome.

use anyhow::Context;
use chrono::Utc;
use sqlx::PgPool;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::extraction::parser::parse_resume;
use crate::extraction::text_extractor::{extract_text, MediaType};
use crate::models::resume::{ResumeRow, STATUS_COMPLETED, STATUS_FAILED};
use crate::resume::materializer::{milestones_from_profile, persist_milestones};

/// Spawns processing for an uploaded resume. The upload handler drops the
/// handle (fire and forget); tests await it so assertions run after the
/// status transition.
pub fn spawn_processing(db: PgPool, resume_id: Uuid) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = process_resume(&db, resume_id).await {
            warn!("Resume {resume_id} processing failed: {e:#}");
            if let Err(db_err) = mark_failed(&db, resume_id, &format!("{e:#}")).await {
                error!("Failed to record failure for resume {resume_id}: {db_err}");
            }
        }
    })
}

/// One full pipeline run. Any error propagated from here flips the resume
/// into the failed state; success updates it to completed with the
/// extracted text, structured data, and milestone count.
async fn process_resume(db: &PgPool, resume_id: Uuid) -> anyhow::Result<()> {
    let resume: ResumeRow = sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
        .bind(resume_id)
        .fetch_one(db)
        .await
        .context("resume row vanished before processing")?;

    // MIME type was validated at upload; a miss here means the row was
    // tampered with outside the API.
    let media = MediaType::from_mime(&resume.mime_type)
        .with_context(|| format!("unsupported stored mime type: {}", resume.mime_type))?;

    let bytes = tokio::fs::read(&resume.file_path)
        .await
        .with_context(|| format!("failed to read {}", resume.file_path))?;

    let text = extract_text(&bytes, media)?;
    let profile = parse_resume(&text);
    let extracted_data = serde_json::to_value(&profile)?;

    let milestones = milestones_from_profile(&profile, resume.user_id, resume_id, Utc::now());
    let created = persist_milestones(db, &milestones).await;

    sqlx::query(
        r#"
        UPDATE resumes
        SET processing_status = $1, extracted_text = $2, extracted_data = $3,
            milestones_created = $4, processing_error = NULL, updated_at = NOW()
        WHERE id = $5
        "#,
    )
    .bind(STATUS_COMPLETED)
    .bind(&text)
    .bind(&extracted_data)
    .bind(created as i32)
    .bind(resume_id)
    .execute(db)
    .await?;

    info!(
        "Resume {resume_id} processed: {created}/{} milestones created",
        milestones.len()
    );
    Ok(())
}

async fn mark_failed(db: &PgPool, resume_id: Uuid, message: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE resumes
        SET processing_status = $1, processing_error = $2, updated_at = NOW()
        WHERE id = $3
        "#,
    )
    .bind(STATUS_FAILED)
    .bind(message)
    .bind(resume_id)
    .execute(db)
    .await?;
    Ok(())
}
