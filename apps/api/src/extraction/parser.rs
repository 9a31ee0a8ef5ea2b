//! Resume Parser — composes the segmenter and the field extractors into a
//! single call. Field extractors are independent, total functions: one of
//! them coming back empty never affects the others, and the returned
//! profile always has every field present.

use tracing::debug;

use crate::extraction::entries::{
    extract_certifications, extract_education, extract_experience, extract_projects,
};
use crate::extraction::personal_info::extract_personal_info;
use crate::extraction::profile::ExtractedProfile;
use crate::extraction::segmenter::to_lines;
use crate::extraction::skills::extract_skills;
use crate::extraction::summary::extract_summary;

/// Parses plain resume text into a structured profile. Blank input yields
/// an all-default profile; malformed input yields sparse fields, never an
/// error.
pub fn parse_resume(raw_text: &str) -> ExtractedProfile {
    if raw_text.trim().is_empty() {
        return ExtractedProfile::default();
    }

    let lines = to_lines(raw_text);

    let profile = ExtractedProfile {
        personal_info: extract_personal_info(&lines),
        summary: extract_summary(&lines),
        skills: extract_skills(raw_text),
        experience: extract_experience(&lines),
        education: extract_education(&lines),
        certifications: extract_certifications(&lines),
        projects: extract_projects(&lines),
    };

    debug!(
        skills = profile.skills.len(),
        experience = profile.experience.len(),
        education = profile.education.len(),
        certifications = profile.certifications.len(),
        projects = profile.projects.len(),
        "resume parse complete"
    );

    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESUME: &str = "\
Jane Doe
Austin, TX
jane.doe@example.com
(512) 555-0199

Summary
Backend engineer who likes boring, reliable systems.

Work Experience
Senior Backend Engineer
6/2019 - Initech
Built billing APIs in Python with PostgreSQL on AWS

Engineer
2016 - Hooli
Maintained legacy Java services

Education
Bachelor of Science in Computer Science
State University
2016

Certifications
AWS Certified Solutions Architect
Amazon Web Services, 2021

Projects
Flight Tracker
Real-time map built with React, https://example.com/tracker
";

    #[test]
    fn test_full_resume_populates_every_section() {
        let profile = parse_resume(FULL_RESUME);
        assert_eq!(
            profile.personal_info.email.as_deref(),
            Some("jane.doe@example.com")
        );
        assert!(profile.personal_info.phone.is_some());
        assert_eq!(profile.personal_info.location.as_deref(), Some("Austin, TX"));
        assert!(profile.summary.contains("reliable systems"));
        assert!(profile.skills.contains(&"python".to_string()));
        assert_eq!(profile.experience.len(), 2);
        assert_eq!(profile.experience[0].company, "Initech");
        assert_eq!(profile.education.len(), 1);
        assert_eq!(profile.certifications.len(), 1);
        assert_eq!(profile.projects.len(), 1);
    }

    #[test]
    fn test_blank_input_is_default_profile() {
        assert_eq!(parse_resume(""), ExtractedProfile::default());
        assert_eq!(parse_resume("   \n\t\n  "), ExtractedProfile::default());
    }

    #[test]
    fn test_no_headings_leaves_sections_empty_with_summary_fallback() {
        let text = "Jane Doe\n\
                    A generalist who has shipped many systems.\n\
                    Currently looking for the next interesting team.\n\
                    Based in the Pacific Northwest region.";
        let profile = parse_resume(text);
        assert!(profile.experience.is_empty());
        assert!(profile.education.is_empty());
        assert!(profile.certifications.is_empty());
        assert!(profile.projects.is_empty());
        assert!(profile.summary.contains("generalist"));
        assert!(profile.summary.contains("Pacific Northwest"));
    }

    #[test]
    fn test_parse_never_panics_on_garbled_text() {
        // Simulates a lossy legacy .doc coercion.
        let garbled = "\u{fffd}\u{fffd}PK\u{fffd}\n2019\n\u{fffd}experience\u{fffd}\n\u{fffd}";
        let profile = parse_resume(garbled);
        // Shape is complete even when content is junk.
        assert!(profile.experience.is_empty());
        assert!(profile.personal_info.email.is_none());
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse_resume(FULL_RESUME), parse_resume(FULL_RESUME));
    }
}
