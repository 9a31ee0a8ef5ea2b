use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The kind of career event a milestone records. Gap analysis and skill
/// analysis assume this partitions a user's milestones correctly, so the
/// canonical strings live here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneType {
    Education,
    Job,
    Certification,
    Achievement,
    Project,
}

impl MilestoneType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneType::Education => "education",
            MilestoneType::Job => "job",
            MilestoneType::Certification => "certification",
            MilestoneType::Achievement => "achievement",
            MilestoneType::Project => "project",
        }
    }

    pub fn parse(s: &str) -> Option<MilestoneType> {
        match s {
            "education" => Some(MilestoneType::Education),
            "job" => Some(MilestoneType::Job),
            "certification" => Some(MilestoneType::Certification),
            "achievement" => Some(MilestoneType::Achievement),
            "project" => Some(MilestoneType::Project),
            _ => None,
        }
    }
}

/// A single dated career event owned by one user.
///
/// `milestone_type` holds one of the `MilestoneType` strings; `confidence`
/// is the 0-100 extraction provenance score (100 for manual entries);
/// `resume_id` links back to the source document when the milestone was
/// materialized from a parse.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MilestoneRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub milestone_type: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub skills: Vec<String>,
    pub technologies: Vec<String>,
    pub url: Option<String>,
    pub confidence: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a milestone, produced by the materializer or by the
/// manual-create endpoint before it hits Postgres.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMilestone {
    pub user_id: Uuid,
    pub resume_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub milestone_type: MilestoneType,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub skills: Vec<String>,
    pub technologies: Vec<String>,
    pub url: Option<String>,
    pub confidence: i16,
}
