use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A stored Q&A exchange: the user's question, the generated answer, the
/// classified category and the supporting context snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub confidence: f64,
    pub context: Value,
    pub helpful: Option<bool>,
    pub created_at: DateTime<Utc>,
}
