//! Per-intent answer builders. Each one reads the user's data, renders a
//! plain-text answer, and returns the category and context snapshot that
//! get persisted alongside it. Empty timelines degrade to "not enough data"
//! answers rather than errors.

use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::milestone::MilestoneRow;
use crate::models::recommendation::{RecommendationRow, REC_TYPE_COURSE, REC_TYPE_JOB};
use crate::timeline::analytics::{detect_career_gaps, skill_frequency};

pub const CATEGORY_CAREER_GAP: &str = "career-gap";
pub const CATEGORY_SKILLS: &str = "skills";
pub const CATEGORY_RECOMMENDATIONS: &str = "recommendations";
pub const CATEGORY_GENERAL: &str = "general";

/// What an intent handler produces: the rendered answer plus the category
/// and context persisted with the question.
pub struct AnswerPayload {
    pub answer: String,
    pub category: String,
    pub context: Value,
}

async fn job_milestones(db: &PgPool, user_id: Uuid) -> Result<Vec<MilestoneRow>, AppError> {
    let rows: Vec<MilestoneRow> = sqlx::query_as(
        "SELECT * FROM milestones WHERE user_id = $1 AND milestone_type = 'job' ORDER BY start_date ASC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Career-gap analysis over the user's job milestones.
pub async fn answer_career_gaps(db: &PgPool, user_id: Uuid) -> Result<AnswerPayload, AppError> {
    let jobs = job_milestones(db, user_id).await?;

    if jobs.is_empty() {
        return Ok(AnswerPayload {
            answer: "I don't see any job experiences in your timeline yet. Upload your \
                     resume to get a detailed analysis."
                .to_string(),
            category: CATEGORY_CAREER_GAP.to_string(),
            context: json!({ "milestones": 0 }),
        });
    }

    let gaps = detect_career_gaps(&jobs);
    let answer = if gaps.is_empty() {
        "Great news! I don't see any significant career gaps in your timeline. Your \
         career progression appears continuous."
            .to_string()
    } else {
        let mut text = format!(
            "I found {} career gap{} in your timeline:\n\n",
            gaps.len(),
            if gaps.len() > 1 { "s" } else { "" }
        );
        for (i, gap) in gaps.iter().enumerate() {
            text.push_str(&format!(
                "{}. {} month{} gap between \"{}\" and \"{}\"\n",
                i + 1,
                gap.duration_months,
                if gap.duration_months > 1 { "s" } else { "" },
                gap.before_job,
                gap.after_job
            ));
        }
        text.push_str(
            "\nConsider highlighting any freelance work, courses, or personal projects \
             during these periods to strengthen your profile.",
        );
        text
    };

    Ok(AnswerPayload {
        answer,
        category: CATEGORY_CAREER_GAP.to_string(),
        context: json!({ "milestones": jobs.len(), "gaps": gaps.len() }),
    })
}

/// Top-skill ranking over the whole milestone set.
pub async fn answer_skills(db: &PgPool, user_id: Uuid) -> Result<AnswerPayload, AppError> {
    let milestones: Vec<MilestoneRow> =
        sqlx::query_as("SELECT * FROM milestones WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(db)
            .await?;

    if milestones.is_empty() {
        return Ok(AnswerPayload {
            answer: "I don't have enough information about your skills yet. Please upload \
                     your resume or add more milestones to your timeline."
                .to_string(),
            category: CATEGORY_SKILLS.to_string(),
            context: json!({ "skills": [] }),
        });
    }

    let ranked = skill_frequency(&milestones, 10);
    if ranked.is_empty() {
        return Ok(AnswerPayload {
            answer: "I don't see specific skills listed in your milestones. Consider adding \
                     skills to your experiences and projects for better analysis."
                .to_string(),
            category: CATEGORY_SKILLS.to_string(),
            context: json!({ "skills": [] }),
        });
    }

    let mut answer = "Based on your timeline, here are your key skills:\n\n".to_string();
    for (i, s) in ranked.iter().take(5).enumerate() {
        answer.push_str(&format!(
            "{}. {} (mentioned {} time{})\n",
            i + 1,
            s.skill,
            s.count,
            if s.count > 1 { "s" } else { "" }
        ));
    }
    if ranked.len() > 5 {
        answer.push_str("\nOther skills: ");
        let rest: Vec<&str> = ranked[5..].iter().map(|s| s.skill.as_str()).collect();
        answer.push_str(&rest.join(", "));
        answer.push('\n');
    }
    answer.push_str("\nThese skills show your expertise and experience across different areas.");

    Ok(AnswerPayload {
        answer,
        category: CATEGORY_SKILLS.to_string(),
        context: json!({
            "skills": ranked.iter().map(|s| s.skill.clone()).collect::<Vec<_>>(),
            "milestones": milestones.len(),
        }),
    })
}

async fn active_recommendations(
    db: &PgPool,
    user_id: Uuid,
    rec_type: &str,
) -> Result<Vec<RecommendationRow>, AppError> {
    let rows: Vec<RecommendationRow> = sqlx::query_as(
        r#"
        SELECT * FROM recommendations
        WHERE user_id = $1 AND rec_type = $2 AND is_active = TRUE
        ORDER BY match_score DESC
        LIMIT 5
        "#,
    )
    .bind(user_id)
    .bind(rec_type)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Active job recommendations, best matches first.
pub async fn answer_job_matches(db: &PgPool, user_id: Uuid) -> Result<AnswerPayload, AppError> {
    let jobs = active_recommendations(db, user_id, REC_TYPE_JOB).await?;

    if jobs.is_empty() {
        return Ok(AnswerPayload {
            answer: "I don't have any job recommendations for you yet. Make sure your \
                     profile is complete and try refreshing recommendations."
                .to_string(),
            category: CATEGORY_RECOMMENDATIONS.to_string(),
            context: json!({}),
        });
    }

    let mut answer = format!(
        "I found {} job opportunities that match your profile:\n\n",
        jobs.len()
    );
    for (i, job) in jobs.iter().enumerate() {
        answer.push_str(&format!(
            "{}. {} at {} ({} | match {}%)\n",
            i + 1,
            job.title,
            job.provider,
            job.location.as_deref().unwrap_or("Remote"),
            job.match_score
        ));
    }
    answer.push_str("\nThese positions align well with your skills and experience.");

    let average: i32 = jobs.iter().map(|j| j.match_score).sum::<i32>() / jobs.len() as i32;
    Ok(AnswerPayload {
        answer,
        category: CATEGORY_RECOMMENDATIONS.to_string(),
        context: json!({ "recommendations": jobs.len(), "average_match": average }),
    })
}

/// Active course recommendations, best matches first.
pub async fn answer_course_recommendations(
    db: &PgPool,
    user_id: Uuid,
) -> Result<AnswerPayload, AppError> {
    let courses = active_recommendations(db, user_id, REC_TYPE_COURSE).await?;

    if courses.is_empty() {
        return Ok(AnswerPayload {
            answer: "I don't have any course recommendations for you yet. Complete your \
                     profile and refresh recommendations to get personalized suggestions."
                .to_string(),
            category: CATEGORY_RECOMMENDATIONS.to_string(),
            context: json!({}),
        });
    }

    let mut answer = format!(
        "Here are {} courses I recommend for your career growth:\n\n",
        courses.len()
    );
    for (i, course) in courses.iter().enumerate() {
        answer.push_str(&format!(
            "{}. {} ({}, {} | match {}%)\n",
            i + 1,
            course.title,
            course.provider,
            course.level.as_deref().unwrap_or("All levels"),
            course.match_score
        ));
    }
    answer.push_str("\nThese courses will help you develop new skills and advance your career.");

    let levels: Vec<&str> = {
        let mut seen: Vec<&str> = Vec::new();
        for c in &courses {
            if let Some(level) = c.level.as_deref() {
                if !seen.contains(&level) {
                    seen.push(level);
                }
            }
        }
        seen
    };
    Ok(AnswerPayload {
        answer,
        category: CATEGORY_RECOMMENDATIONS.to_string(),
        context: json!({ "recommendations": courses.len(), "levels": levels }),
    })
}

/// Canned response when no intent clears the threshold.
pub fn answer_fallback() -> AnswerPayload {
    AnswerPayload {
        answer: "I'm sorry, I couldn't understand your question. Could you please rephrase \
                 it or ask about career gaps, skills, job matches, or course recommendations?"
            .to_string(),
        category: CATEGORY_GENERAL.to_string(),
        context: json!({}),
    }
}
