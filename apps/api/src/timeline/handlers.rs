use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::milestone::{MilestoneRow, MilestoneType};
use crate::state::AppState;
use crate::timeline::analytics::{build_analytics, TimelineAnalytics};

const DEFAULT_PAGE_SIZE: i64 = 20;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct MilestoneListQuery {
    pub user_id: Uuid,
    pub milestone_type: Option<String>,
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

#[derive(Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

#[derive(Serialize)]
pub struct MilestoneListResponse {
    pub data: Vec<MilestoneRow>,
    pub pagination: Pagination,
}

/// GET /api/v1/milestones
pub async fn handle_list_milestones(
    State(state): State<AppState>,
    Query(params): Query<MilestoneListQuery>,
) -> Result<Json<MilestoneListResponse>, AppError> {
    if let Some(t) = &params.milestone_type {
        if MilestoneType::parse(t).is_none() {
            return Err(AppError::Validation(format!(
                "Unknown milestone type: {t}"
            )));
        }
    }
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);
    let page = params.page.unwrap_or(1).max(1);

    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM milestones WHERE user_id = $1 AND ($2::text IS NULL OR milestone_type = $2)",
    )
    .bind(params.user_id)
    .bind(&params.milestone_type)
    .fetch_one(&state.db)
    .await?;

    let data: Vec<MilestoneRow> = sqlx::query_as(
        r#"
        SELECT * FROM milestones
        WHERE user_id = $1 AND ($2::text IS NULL OR milestone_type = $2)
        ORDER BY start_date DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(params.user_id)
    .bind(&params.milestone_type)
    .bind(limit)
    .bind((page - 1) * limit)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(MilestoneListResponse {
        data,
        pagination: Pagination {
            page,
            limit,
            total,
            pages: (total + limit - 1) / limit,
        },
    }))
}

#[derive(Deserialize)]
pub struct CreateMilestoneRequest {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub milestone_type: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub url: Option<String>,
}

/// POST /api/v1/milestones
///
/// Manual creation. Manually entered milestones carry confidence 100 and no
/// source resume.
pub async fn handle_create_milestone(
    State(state): State<AppState>,
    Json(req): Json<CreateMilestoneRequest>,
) -> Result<(StatusCode, Json<MilestoneRow>), AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("Title must not be empty".into()));
    }
    let milestone_type = MilestoneType::parse(&req.milestone_type).ok_or_else(|| {
        AppError::Validation(format!("Unknown milestone type: {}", req.milestone_type))
    })?;

    let row: MilestoneRow = sqlx::query_as(
        r#"
        INSERT INTO milestones
            (id, user_id, resume_id, title, description, milestone_type,
             company, location, start_date, end_date, skills, technologies,
             url, confidence)
        VALUES ($1, $2, NULL, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 100)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.user_id)
    .bind(&req.title)
    .bind(&req.description)
    .bind(milestone_type.as_str())
    .bind(&req.company)
    .bind(&req.location)
    .bind(req.start_date)
    .bind(req.end_date)
    .bind(&req.skills)
    .bind(&req.technologies)
    .bind(&req.url)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

#[derive(Deserialize)]
pub struct UpdateMilestoneRequest {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub milestone_type: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub url: Option<String>,
}

/// PUT /api/v1/milestones/:id
pub async fn handle_update_milestone(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMilestoneRequest>,
) -> Result<Json<MilestoneRow>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("Title must not be empty".into()));
    }
    let milestone_type = MilestoneType::parse(&req.milestone_type).ok_or_else(|| {
        AppError::Validation(format!("Unknown milestone type: {}", req.milestone_type))
    })?;

    let row: Option<MilestoneRow> = sqlx::query_as(
        r#"
        UPDATE milestones
        SET title = $1, description = $2, milestone_type = $3, company = $4,
            location = $5, start_date = $6, end_date = $7, skills = $8,
            technologies = $9, url = $10, updated_at = NOW()
        WHERE id = $11 AND user_id = $12
        RETURNING *
        "#,
    )
    .bind(&req.title)
    .bind(&req.description)
    .bind(milestone_type.as_str())
    .bind(&req.company)
    .bind(&req.location)
    .bind(req.start_date)
    .bind(req.end_date)
    .bind(&req.skills)
    .bind(&req.technologies)
    .bind(&req.url)
    .bind(id)
    .bind(req.user_id)
    .fetch_optional(&state.db)
    .await?;

    row.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Milestone {id} not found")))
}

/// DELETE /api/v1/milestones/:id
pub async fn handle_delete_milestone(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM milestones WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Milestone {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/timeline/analytics
pub async fn handle_timeline_analytics(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<TimelineAnalytics>, AppError> {
    let milestones: Vec<MilestoneRow> =
        sqlx::query_as("SELECT * FROM milestones WHERE user_id = $1 ORDER BY start_date ASC")
            .bind(params.user_id)
            .fetch_all(&state.db)
            .await?;
    Ok(Json(build_analytics(&milestones)))
}
