//! Deterministic mock recommendation generators. Catalogs are fixed; the
//! match score is the overlap between a catalog entry's skill tags and the
//! user's skill set, so output is a pure function of the user's milestones.

use uuid::Uuid;

use crate::models::recommendation::{NewRecommendation, REC_TYPE_COURSE, REC_TYPE_JOB};

struct JobListing {
    title: &'static str,
    company: &'static str,
    location: &'static str,
    skills: &'static [&'static str],
}

struct CourseListing {
    title: &'static str,
    provider: &'static str,
    level: &'static str,
    duration: &'static str,
    skills: &'static [&'static str],
}

const JOB_CATALOG: &[JobListing] = &[
    JobListing {
        title: "Senior Software Engineer",
        company: "TechCorp",
        location: "Remote",
        skills: &["python", "aws", "docker", "postgresql"],
    },
    JobListing {
        title: "Backend Developer",
        company: "DataSystems Inc",
        location: "Austin, TX",
        skills: &["java", "spring", "sql", "kubernetes"],
    },
    JobListing {
        title: "Full Stack Engineer",
        company: "StartupHub",
        location: "San Francisco, CA",
        skills: &["javascript", "react", "node.js", "mongodb"],
    },
    JobListing {
        title: "DevOps Engineer",
        company: "CloudWorks",
        location: "Remote",
        skills: &["aws", "terraform", "docker", "kubernetes", "linux"],
    },
    JobListing {
        title: "Data Engineer",
        company: "Insight Analytics",
        location: "New York, NY",
        skills: &["python", "sql", "spark", "airflow"],
    },
];

const COURSE_CATALOG: &[CourseListing] = &[
    CourseListing {
        title: "Advanced Cloud Architecture",
        provider: "Coursera",
        level: "Advanced",
        duration: "6 weeks",
        skills: &["aws", "terraform", "docker"],
    },
    CourseListing {
        title: "Machine Learning Fundamentals",
        provider: "edX",
        level: "Intermediate",
        duration: "8 weeks",
        skills: &["python", "machine learning", "sql"],
    },
    CourseListing {
        title: "Modern React Development",
        provider: "Udemy",
        level: "Intermediate",
        duration: "4 weeks",
        skills: &["javascript", "react", "typescript"],
    },
    CourseListing {
        title: "Kubernetes in Production",
        provider: "Linux Foundation",
        level: "Advanced",
        duration: "5 weeks",
        skills: &["kubernetes", "docker", "linux"],
    },
    CourseListing {
        title: "SQL for Data Analysis",
        provider: "Coursera",
        level: "Beginner",
        duration: "3 weeks",
        skills: &["sql", "postgresql"],
    },
];

const BASE_SCORE: i32 = 50;
const POINTS_PER_SKILL: i32 = 10;
const MAX_SCORE: i32 = 100;

fn match_score(listing_skills: &[&str], user_skills: &[String]) -> i32 {
    let overlap = listing_skills
        .iter()
        .filter(|s| user_skills.iter().any(|u| u.eq_ignore_ascii_case(s)))
        .count() as i32;
    (BASE_SCORE + overlap * POINTS_PER_SKILL).min(MAX_SCORE)
}

/// Builds job recommendations from the fixed catalog, scored against the
/// user's case-folded skill set. Catalog order breaks score ties.
pub fn generate_job_recommendations(
    user_id: Uuid,
    user_skills: &[String],
) -> Vec<NewRecommendation> {
    let mut recs: Vec<NewRecommendation> = JOB_CATALOG
        .iter()
        .map(|job| NewRecommendation {
            user_id,
            rec_type: REC_TYPE_JOB.to_string(),
            title: job.title.to_string(),
            provider: job.company.to_string(),
            location: Some(job.location.to_string()),
            level: None,
            duration: None,
            url: None,
            match_score: match_score(job.skills, user_skills),
            skills: job.skills.iter().map(|s| s.to_string()).collect(),
        })
        .collect();
    recs.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    recs
}

/// Builds course recommendations the same way.
pub fn generate_course_recommendations(
    user_id: Uuid,
    user_skills: &[String],
) -> Vec<NewRecommendation> {
    let mut recs: Vec<NewRecommendation> = COURSE_CATALOG
        .iter()
        .map(|course| NewRecommendation {
            user_id,
            rec_type: REC_TYPE_COURSE.to_string(),
            title: course.title.to_string(),
            provider: course.provider.to_string(),
            location: None,
            level: Some(course.level.to_string()),
            duration: Some(course.duration.to_string()),
            url: None,
            match_score: match_score(course.skills, user_skills),
            skills: course.skills.iter().map(|s| s.to_string()).collect(),
        })
        .collect();
    recs.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_generation_is_deterministic() {
        let user_id = Uuid::new_v4();
        let user_skills = skills(&["python", "aws"]);
        let a = generate_job_recommendations(user_id, &user_skills);
        let b = generate_job_recommendations(user_id, &user_skills);
        let scores_a: Vec<_> = a.iter().map(|r| (r.title.clone(), r.match_score)).collect();
        let scores_b: Vec<_> = b.iter().map(|r| (r.title.clone(), r.match_score)).collect();
        assert_eq!(scores_a, scores_b);
    }

    #[test]
    fn test_matching_skills_raise_the_score() {
        let user_id = Uuid::new_v4();
        let recs = generate_job_recommendations(user_id, &skills(&["python", "aws", "docker"]));
        // "Senior Software Engineer" matches three of the user's skills.
        assert_eq!(recs[0].title, "Senior Software Engineer");
        assert_eq!(recs[0].match_score, 80);
    }

    #[test]
    fn test_no_skills_yields_base_scores() {
        let recs = generate_job_recommendations(Uuid::new_v4(), &[]);
        assert_eq!(recs.len(), JOB_CATALOG.len());
        assert!(recs.iter().all(|r| r.match_score == BASE_SCORE));
    }

    #[test]
    fn test_skill_matching_is_case_insensitive() {
        let lower = generate_course_recommendations(Uuid::new_v4(), &skills(&["sql"]));
        let upper = generate_course_recommendations(Uuid::new_v4(), &skills(&["SQL"]));
        let l: Vec<_> = lower.iter().map(|r| r.match_score).collect();
        let u: Vec<_> = upper.iter().map(|r| r.match_score).collect();
        assert_eq!(l, u);
    }

    #[test]
    fn test_score_capped_at_100() {
        let all: Vec<String> = JOB_CATALOG
            .iter()
            .flat_map(|j| j.skills.iter().map(|s| s.to_string()))
            .collect();
        let recs = generate_job_recommendations(Uuid::new_v4(), &all);
        assert!(recs.iter().all(|r| r.match_score <= MAX_SCORE));
    }

    #[test]
    fn test_courses_carry_level_and_duration() {
        let recs = generate_course_recommendations(Uuid::new_v4(), &[]);
        assert!(recs.iter().all(|r| r.level.is_some() && r.duration.is_some()));
        assert!(recs.iter().all(|r| r.rec_type == REC_TYPE_COURSE));
    }
}
