//! Milestone Materializer — deterministic mapping from an extracted profile
//! to durable milestones, plus best-effort persistence. Confidence encodes
//! how reliable each source field type is in practice.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::extraction::profile::ExtractedProfile;
use crate::models::milestone::{MilestoneType, NewMilestone};

pub const CONFIDENCE_EXPERIENCE: i16 = 85;
pub const CONFIDENCE_EDUCATION: i16 = 90;
pub const CONFIDENCE_CERTIFICATION: i16 = 95;
pub const CONFIDENCE_PROJECT: i16 = 75;

fn at_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Maps a parsed profile to milestone insert payloads. Pure and
/// deterministic for a fixed `now`; entries missing a start date default to
/// `now` rather than being dropped.
pub fn milestones_from_profile(
    profile: &ExtractedProfile,
    user_id: Uuid,
    resume_id: Uuid,
    now: DateTime<Utc>,
) -> Vec<NewMilestone> {
    let mut milestones = Vec::new();

    for exp in &profile.experience {
        milestones.push(NewMilestone {
            user_id,
            resume_id: Some(resume_id),
            title: exp.title.clone(),
            description: if exp.description.is_empty() {
                "Professional experience".to_string()
            } else {
                exp.description.clone()
            },
            milestone_type: MilestoneType::Job,
            company: Some(exp.company.clone()),
            location: exp.location.clone(),
            start_date: exp.start_date.map(at_midnight).unwrap_or(now),
            end_date: exp.end_date.map(at_midnight),
            skills: exp.skills.clone(),
            technologies: Vec::new(),
            url: None,
            confidence: CONFIDENCE_EXPERIENCE,
        });
    }

    for edu in &profile.education {
        milestones.push(NewMilestone {
            user_id,
            resume_id: Some(resume_id),
            title: edu.degree.clone(),
            description: format!("{} from {}", edu.degree, edu.institution),
            milestone_type: MilestoneType::Education,
            company: Some(edu.institution.clone()),
            location: edu.location.clone(),
            start_date: edu.start_date.map(at_midnight).unwrap_or(now),
            end_date: edu.end_date.map(at_midnight),
            skills: Vec::new(),
            technologies: Vec::new(),
            url: None,
            confidence: CONFIDENCE_EDUCATION,
        });
    }

    for cert in &profile.certifications {
        milestones.push(NewMilestone {
            user_id,
            resume_id: Some(resume_id),
            title: cert.name.clone(),
            description: format!("Certification from {}", cert.issuer),
            milestone_type: MilestoneType::Certification,
            company: Some(cert.issuer.clone()),
            location: None,
            start_date: cert.date.map(at_midnight).unwrap_or(now),
            end_date: None,
            skills: Vec::new(),
            technologies: Vec::new(),
            url: cert.url.clone(),
            confidence: CONFIDENCE_CERTIFICATION,
        });
    }

    for project in &profile.projects {
        milestones.push(NewMilestone {
            user_id,
            resume_id: Some(resume_id),
            title: project.name.clone(),
            description: project.description.clone(),
            milestone_type: MilestoneType::Project,
            company: None,
            location: None,
            // Projects carry no date in resumes; anchor them at
            // materialization time.
            start_date: now,
            end_date: None,
            skills: Vec::new(),
            technologies: project.technologies.clone(),
            url: project.url.clone(),
            confidence: CONFIDENCE_PROJECT,
        });
    }

    milestones
}

/// Inserts milestones one by one. A failed insert is logged and skipped so
/// sibling entries still land; the caller gets the count that succeeded.
pub async fn persist_milestones(pool: &PgPool, milestones: &[NewMilestone]) -> usize {
    let mut created = 0;
    for m in milestones {
        let result = sqlx::query(
            r#"
            INSERT INTO milestones
                (id, user_id, resume_id, title, description, milestone_type,
                 company, location, start_date, end_date, skills, technologies,
                 url, confidence)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(m.user_id)
        .bind(m.resume_id)
        .bind(&m.title)
        .bind(&m.description)
        .bind(m.milestone_type.as_str())
        .bind(&m.company)
        .bind(&m.location)
        .bind(m.start_date)
        .bind(m.end_date)
        .bind(&m.skills)
        .bind(&m.technologies)
        .bind(&m.url)
        .bind(m.confidence)
        .execute(pool)
        .await;

        match result {
            Ok(_) => created += 1,
            Err(e) => warn!(
                "Failed to persist milestone '{}' for user {}: {e}",
                m.title, m.user_id
            ),
        }
    }
    created
}
