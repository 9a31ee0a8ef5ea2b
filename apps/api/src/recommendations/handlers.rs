use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::recommendation::{
    NewRecommendation, RecommendationRow, REC_TYPE_COURSE, REC_TYPE_JOB,
};
use crate::recommendations::mock::{generate_course_recommendations, generate_job_recommendations};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct RecommendationListQuery {
    pub user_id: Uuid,
    #[serde(default)]
    pub refresh: bool,
}

/// Distinct case-folded skills across a user's milestones, in
/// first-encountered order.
async fn user_skills(db: &PgPool, user_id: Uuid) -> Result<Vec<String>, AppError> {
    let rows: Vec<(Vec<String>, Vec<String>)> = sqlx::query_as(
        "SELECT skills, technologies FROM milestones WHERE user_id = $1 ORDER BY start_date DESC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    let mut skills: Vec<String> = Vec::new();
    for (s, t) in rows {
        for skill in s.into_iter().chain(t) {
            let folded = skill.to_lowercase();
            if !skills.contains(&folded) {
                skills.push(folded);
            }
        }
    }
    Ok(skills)
}

/// Retires the user's active recommendations of one type and inserts a
/// fresh batch derived from their current skill set.
async fn refresh_for_type(db: &PgPool, user_id: Uuid, rec_type: &str) -> Result<(), AppError> {
    let skills = user_skills(db, user_id).await?;
    let batch: Vec<NewRecommendation> = match rec_type {
        REC_TYPE_JOB => generate_job_recommendations(user_id, &skills),
        _ => generate_course_recommendations(user_id, &skills),
    };

    sqlx::query("UPDATE recommendations SET is_active = FALSE WHERE user_id = $1 AND rec_type = $2")
        .bind(user_id)
        .bind(rec_type)
        .execute(db)
        .await?;

    for rec in &batch {
        sqlx::query(
            r#"
            INSERT INTO recommendations
                (id, user_id, rec_type, title, provider, location, level,
                 duration, url, match_score, skills)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(rec.user_id)
        .bind(&rec.rec_type)
        .bind(&rec.title)
        .bind(&rec.provider)
        .bind(&rec.location)
        .bind(&rec.level)
        .bind(&rec.duration)
        .bind(&rec.url)
        .bind(rec.match_score)
        .bind(&rec.skills)
        .execute(db)
        .await?;
    }

    info!("Refreshed {} {rec_type} recommendations for user {user_id}", batch.len());
    Ok(())
}

async fn list_active(
    db: &PgPool,
    user_id: Uuid,
    rec_type: &str,
) -> Result<Vec<RecommendationRow>, AppError> {
    let recs: Vec<RecommendationRow> = sqlx::query_as(
        r#"
        SELECT * FROM recommendations
        WHERE user_id = $1 AND rec_type = $2 AND is_active = TRUE
        ORDER BY match_score DESC, created_at DESC
        "#,
    )
    .bind(user_id)
    .bind(rec_type)
    .fetch_all(db)
    .await?;
    Ok(recs)
}

/// GET /api/v1/recommendations/jobs
pub async fn handle_job_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationListQuery>,
) -> Result<Json<Vec<RecommendationRow>>, AppError> {
    if params.refresh {
        refresh_for_type(&state.db, params.user_id, REC_TYPE_JOB).await?;
    }
    Ok(Json(list_active(&state.db, params.user_id, REC_TYPE_JOB).await?))
}

/// GET /api/v1/recommendations/courses
pub async fn handle_course_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationListQuery>,
) -> Result<Json<Vec<RecommendationRow>>, AppError> {
    if params.refresh {
        refresh_for_type(&state.db, params.user_id, REC_TYPE_COURSE).await?;
    }
    Ok(Json(
        list_active(&state.db, params.user_id, REC_TYPE_COURSE).await?,
    ))
}

/// POST /api/v1/recommendations/refresh
pub async fn handle_refresh_recommendations(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    refresh_for_type(&state.db, params.user_id, REC_TYPE_JOB).await?;
    refresh_for_type(&state.db, params.user_id, REC_TYPE_COURSE).await?;
    Ok(Json(json!({ "message": "Recommendations refreshed" })))
}

/// POST /api/v1/recommendations/:id/save
///
/// Toggles the saved flag.
pub async fn handle_toggle_save(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<RecommendationRow>, AppError> {
    let row: Option<RecommendationRow> = sqlx::query_as(
        r#"
        UPDATE recommendations
        SET is_saved = NOT is_saved
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(params.user_id)
    .fetch_optional(&state.db)
    .await?;

    row.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Recommendation {id} not found")))
}

/// POST /api/v1/recommendations/:id/applied
pub async fn handle_mark_applied(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<RecommendationRow>, AppError> {
    let row: Option<RecommendationRow> = sqlx::query_as(
        r#"
        UPDATE recommendations
        SET is_applied = TRUE, applied_at = $1
        WHERE id = $2 AND user_id = $3
        RETURNING *
        "#,
    )
    .bind(Utc::now())
    .bind(id)
    .bind(params.user_id)
    .fetch_optional(&state.db)
    .await?;

    row.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Recommendation {id} not found")))
}

#[derive(Serialize, sqlx::FromRow)]
pub struct RecommendationStats {
    pub rec_type: String,
    pub total: i64,
    pub saved: i64,
    pub applied: i64,
}

/// GET /api/v1/recommendations/stats
pub async fn handle_recommendation_stats(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<RecommendationStats>>, AppError> {
    let stats: Vec<RecommendationStats> = sqlx::query_as(
        r#"
        SELECT rec_type,
               COUNT(*) AS total,
               COUNT(*) FILTER (WHERE is_saved) AS saved,
               COUNT(*) FILTER (WHERE is_applied) AS applied
        FROM recommendations
        WHERE user_id = $1
        GROUP BY rec_type
        ORDER BY rec_type
        "#,
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(stats))
}
