use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Processing status of an uploaded resume. Stored as text.
pub const STATUS_PROCESSING: &str = "processing";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_FAILED: &str = "failed";

/// Full resume record, including extraction output. Returned by the detail
/// endpoint; the list endpoint uses `ResumeSummaryRow` to skip the blobs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub original_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub extracted_text: Option<String>,
    pub extracted_data: Option<Value>,
    pub processing_status: String,
    pub processing_error: Option<String>,
    pub milestones_created: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Resume listing row without the extracted text/data payloads.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeSummaryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub original_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub processing_status: String,
    pub processing_error: Option<String>,
    pub milestones_created: i32,
    pub created_at: DateTime<Utc>,
}
