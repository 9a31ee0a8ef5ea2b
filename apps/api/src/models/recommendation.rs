use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const REC_TYPE_JOB: &str = "job";
pub const REC_TYPE_COURSE: &str = "course";

/// A job or course recommendation surfaced to a user. Rows are soft-retired
/// by flipping `is_active` on refresh rather than deleted, so saved and
/// applied history survives.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecommendationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub rec_type: String,
    pub title: String,
    pub provider: String,
    pub location: Option<String>,
    pub level: Option<String>,
    pub duration: Option<String>,
    pub url: Option<String>,
    pub match_score: i32,
    pub skills: Vec<String>,
    pub is_active: bool,
    pub is_saved: bool,
    pub is_applied: bool,
    pub applied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload produced by the mock generators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecommendation {
    pub user_id: Uuid,
    pub rec_type: String,
    pub title: String,
    pub provider: String,
    pub location: Option<String>,
    pub level: Option<String>,
    pub duration: Option<String>,
    pub url: Option<String>,
    pub match_score: i32,
    pub skills: Vec<String>,
}
