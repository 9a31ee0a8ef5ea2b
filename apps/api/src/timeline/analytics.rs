//! Timeline Analyzer — pure functions over a user's milestone set. All of
//! this is recomputed per request; nothing here touches the database.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::milestone::{MilestoneRow, MilestoneType};

const GAP_THRESHOLD_DAYS: i64 = 30;
const TOP_SKILLS: usize = 10;

/// A >30-day interval between the end of one job and the start of the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerGap {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub gap_days: i64,
    pub duration_months: i64,
    pub before_job: String,
    pub after_job: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineAnalytics {
    pub milestones_by_type: BTreeMap<String, usize>,
    pub milestones_by_year: BTreeMap<i32, usize>,
    pub career_gaps: Vec<CareerGap>,
    pub top_skills: Vec<SkillCount>,
    pub total_milestones: usize,
}

/// Detects career gaps across a user's job milestones.
///
/// Non-job milestones are ignored. Jobs are sorted ascending by start date;
/// for each adjacent pair with both boundary dates present, a gap of more
/// than 30 days is reported with its duration floored to whole months.
/// Pairs where the earlier job has no end date are skipped, not treated as
/// open-ended gaps. Inverted ranges yield non-positive day counts and fall
/// out of the threshold filter.
pub fn detect_career_gaps(milestones: &[MilestoneRow]) -> Vec<CareerGap> {
    let mut jobs: Vec<&MilestoneRow> = milestones
        .iter()
        .filter(|m| m.milestone_type == MilestoneType::Job.as_str())
        .collect();
    jobs.sort_by_key(|m| m.start_date);

    let mut gaps = Vec::new();
    for pair in jobs.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        let Some(prev_end) = prev.end_date else {
            continue;
        };
        let ms = (curr.start_date - prev_end).num_milliseconds();
        let gap_days = (ms as f64 / 86_400_000.0).ceil() as i64;
        if gap_days > GAP_THRESHOLD_DAYS {
            gaps.push(CareerGap {
                start_date: prev_end,
                end_date: curr.start_date,
                gap_days,
                duration_months: gap_days / 30,
                before_job: prev.title.clone(),
                after_job: curr.title.clone(),
            });
        }
    }
    gaps
}

/// Ranks skills by how many milestones mention them, case-folded across the
/// skills and technologies fields. Ties keep first-encountered order.
pub fn skill_frequency(milestones: &[MilestoneRow], top_n: usize) -> Vec<SkillCount> {
    let mut counts: Vec<SkillCount> = Vec::new();
    for m in milestones {
        for skill in m.skills.iter().chain(m.technologies.iter()) {
            let folded = skill.to_lowercase();
            match counts.iter_mut().find(|c| c.skill == folded) {
                Some(entry) => entry.count += 1,
                None => counts.push(SkillCount {
                    skill: folded,
                    count: 1,
                }),
            }
        }
    }
    // Stable sort keeps insertion order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);
    counts
}

pub fn milestones_by_type(milestones: &[MilestoneRow]) -> BTreeMap<String, usize> {
    let mut table = BTreeMap::new();
    for m in milestones {
        *table.entry(m.milestone_type.clone()).or_insert(0) += 1;
    }
    table
}

pub fn milestones_by_year(milestones: &[MilestoneRow]) -> BTreeMap<i32, usize> {
    let mut table = BTreeMap::new();
    for m in milestones {
        *table.entry(m.start_date.year()).or_insert(0) += 1;
    }
    table
}

pub fn build_analytics(milestones: &[MilestoneRow]) -> TimelineAnalytics {
    TimelineAnalytics {
        milestones_by_type: milestones_by_type(milestones),
        milestones_by_year: milestones_by_year(milestones),
        career_gaps: detect_career_gaps(milestones),
        top_skills: skill_frequency(milestones, TOP_SKILLS),
        total_milestones: milestones.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn make_job(
        title: &str,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> MilestoneRow {
        make_milestone(title, "job", start, end)
    }

    fn make_milestone(
        title: &str,
        milestone_type: &str,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> MilestoneRow {
        MilestoneRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            resume_id: None,
            title: title.to_string(),
            description: String::new(),
            milestone_type: milestone_type.to_string(),
            company: None,
            location: None,
            start_date: start,
            end_date: end,
            skills: Vec::new(),
            technologies: Vec::new(),
            url: None,
            confidence: 100,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn test_ninety_day_gap_is_three_months() {
        let jobs = vec![
            make_job("A", day(2021, 1, 1), Some(day(2022, 1, 1))),
            make_job("B", day(2022, 4, 1), None),
        ];
        let gaps = detect_career_gaps(&jobs);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].gap_days, 90);
        assert_eq!(gaps[0].duration_months, 3);
        assert_eq!(gaps[0].before_job, "A");
        assert_eq!(gaps[0].after_job, "B");
    }

    #[test]
    fn test_adjacent_jobs_produce_no_gap() {
        let jobs = vec![
            make_job("A", day(2021, 1, 1), Some(day(2022, 1, 1))),
            make_job("B", day(2022, 1, 2), None),
        ];
        assert!(detect_career_gaps(&jobs).is_empty());
    }

    #[test]
    fn test_gap_exactly_thirty_days_not_reported() {
        let jobs = vec![
            make_job("A", day(2021, 1, 1), Some(day(2022, 1, 1))),
            make_job("B", day(2022, 1, 31), None),
        ];
        assert!(detect_career_gaps(&jobs).is_empty());
    }

    #[test]
    fn test_missing_end_date_pair_is_skipped() {
        let jobs = vec![
            make_job("A", day(2020, 1, 1), None),
            make_job("B", day(2022, 1, 1), None),
        ];
        assert!(detect_career_gaps(&jobs).is_empty());
    }

    #[test]
    fn test_inverted_range_excluded_by_threshold() {
        // B starts before A ends; the overlap is not a gap.
        let jobs = vec![
            make_job("A", day(2020, 1, 1), Some(day(2022, 6, 1))),
            make_job("B", day(2022, 1, 1), None),
        ];
        assert!(detect_career_gaps(&jobs).is_empty());
    }

    #[test]
    fn test_gap_detection_sorts_and_ignores_non_jobs() {
        let mut milestones = vec![
            make_job("B", day(2022, 6, 1), None),
            make_job("A", day(2020, 1, 1), Some(day(2022, 1, 1))),
        ];
        milestones.push(make_milestone(
            "BS",
            "education",
            day(2022, 2, 1),
            Some(day(2022, 3, 1)),
        ));
        let gaps = detect_career_gaps(&milestones);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].before_job, "A");
        assert_eq!(gaps[0].after_job, "B");
    }

    #[test]
    fn test_gap_detection_is_idempotent() {
        let jobs = vec![
            make_job("A", day(2019, 1, 1), Some(day(2020, 1, 1))),
            make_job("B", day(2020, 6, 1), Some(day(2021, 6, 1))),
            make_job("C", day(2022, 1, 1), None),
        ];
        assert_eq!(detect_career_gaps(&jobs), detect_career_gaps(&jobs));
        assert_eq!(detect_career_gaps(&jobs).len(), 2);
    }

    #[test]
    fn test_skill_frequency_case_folds_and_merges_technologies() {
        let mut a = make_job("A", day(2020, 1, 1), None);
        a.skills = vec!["Python".to_string(), "SQL".to_string()];
        let mut b = make_job("B", day(2021, 1, 1), None);
        b.skills = vec!["python".to_string()];
        b.technologies = vec!["PYTHON".to_string()];

        let counts = skill_frequency(&[a, b], 10);
        assert_eq!(counts[0].skill, "python");
        assert_eq!(counts[0].count, 3);
        assert_eq!(counts[1].skill, "sql");
    }

    #[test]
    fn test_skill_frequency_ties_keep_first_seen_order() {
        let mut a = make_job("A", day(2020, 1, 1), None);
        a.skills = vec!["go".to_string(), "rust".to_string()];
        let counts = skill_frequency(&[a], 10);
        assert_eq!(counts[0].skill, "go");
        assert_eq!(counts[1].skill, "rust");
    }

    #[test]
    fn test_skill_frequency_truncates_to_top_n() {
        let mut a = make_job("A", day(2020, 1, 1), None);
        a.skills = vec!["a".into(), "b".into(), "c".into()];
        assert_eq!(skill_frequency(std::slice::from_ref(&a), 2).len(), 2);
    }

    #[test]
    fn test_histograms_count_every_milestone() {
        let milestones = vec![
            make_job("A", day(2020, 1, 1), None),
            make_job("B", day(2020, 6, 1), None),
            make_milestone("BS", "education", day(2016, 9, 1), None),
        ];
        let by_type = milestones_by_type(&milestones);
        assert_eq!(by_type.get("job"), Some(&2));
        assert_eq!(by_type.get("education"), Some(&1));

        let by_year = milestones_by_year(&milestones);
        assert_eq!(by_year.get(&2020), Some(&2));
        assert_eq!(by_year.get(&2016), Some(&1));
        assert_eq!(by_year.values().sum::<usize>(), milestones.len());
    }

    #[test]
    fn test_build_analytics_on_empty_input() {
        let analytics = build_analytics(&[]);
        assert_eq!(analytics.total_milestones, 0);
        assert!(analytics.career_gaps.is_empty());
        assert!(analytics.top_skills.is_empty());
        assert!(analytics.milestones_by_type.is_empty());
        assert!(analytics.milestones_by_year.is_empty());
    }
}
