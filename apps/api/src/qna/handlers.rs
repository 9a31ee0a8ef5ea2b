use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::question::QuestionRow;
use crate::qna::answers::{
    answer_career_gaps, answer_course_recommendations, answer_fallback, answer_job_matches,
    answer_skills, AnswerPayload,
};
use crate::qna::classifier::Intent;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;

/// Unclassified questions still get a floor confidence so the stored row
/// never reads as "certainly wrong".
const FALLBACK_MIN_CONFIDENCE: f64 = 20.0;

#[derive(Deserialize)]
pub struct AskRequest {
    pub user_id: Uuid,
    pub question: String,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub confidence: f64,
    pub category: String,
    pub question_id: Uuid,
}

/// POST /api/v1/qna/ask
///
/// Classify the question, dispatch to the matching answer builder, persist
/// the exchange, and return the rendered answer.
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    if req.question.trim().is_empty() {
        return Err(AppError::Validation("Question must not be empty".into()));
    }

    let classification = state.classifier.classify(&req.question).await?;

    let (payload, confidence): (AnswerPayload, f64) = match classification.intent {
        Intent::CareerGaps => (
            answer_career_gaps(&state.db, req.user_id).await?,
            classification.confidence,
        ),
        Intent::CareerSkills => (
            answer_skills(&state.db, req.user_id).await?,
            classification.confidence,
        ),
        Intent::CareerJobs => (
            answer_job_matches(&state.db, req.user_id).await?,
            classification.confidence,
        ),
        Intent::CareerCourses => (
            answer_course_recommendations(&state.db, req.user_id).await?,
            classification.confidence,
        ),
        Intent::Unknown => (
            answer_fallback(),
            classification.confidence.max(FALLBACK_MIN_CONFIDENCE),
        ),
    };

    let row: QuestionRow = sqlx::query_as(
        r#"
        INSERT INTO questions (id, user_id, question, answer, category, confidence, context)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.user_id)
    .bind(&req.question)
    .bind(&payload.answer)
    .bind(&payload.category)
    .bind(confidence)
    .bind(&payload.context)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(AskResponse {
        answer: row.answer,
        confidence: row.confidence,
        category: row.category,
        question_id: row.id,
    }))
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub user_id: Uuid,
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub data: Vec<QuestionRow>,
    pub pagination: Pagination,
}

#[derive(Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

/// GET /api/v1/qna/history
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);
    let page = params.page.unwrap_or(1).max(1);

    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions WHERE user_id = $1")
        .bind(params.user_id)
        .fetch_one(&state.db)
        .await?;

    let data: Vec<QuestionRow> = sqlx::query_as(
        r#"
        SELECT * FROM questions
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(params.user_id)
    .bind(limit)
    .bind((page - 1) * limit)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(HistoryResponse {
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
pub struct RateRequest {
    pub user_id: Uuid,
    pub helpful: bool,
}

/// POST /api/v1/qna/:id/rate
pub async fn handle_rate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RateRequest>,
) -> Result<Json<QuestionRow>, AppError> {
    let row: Option<QuestionRow> = sqlx::query_as(
        "UPDATE questions SET helpful = $1 WHERE id = $2 AND user_id = $3 RETURNING *",
    )
    .bind(req.helpful)
    .bind(id)
    .bind(req.user_id)
    .fetch_optional(&state.db)
    .await?;

    row.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Question {id} not found")))
}
