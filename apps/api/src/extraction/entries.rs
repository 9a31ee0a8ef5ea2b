//! Entry extractors for the experience, education, certifications and
//! projects sections. All of them are line-oriented heuristics over the
//! section ranges the segmenter locates: adjacency is the only structure a
//! plain-text resume reliably keeps.

use std::sync::OnceLock;

use regex::Regex;

use crate::extraction::dates::{date_tokens, has_date_token, parse_date_range};
use crate::extraction::profile::{
    CertificationEntry, EducationEntry, ExperienceEntry, ProjectEntry,
};
use crate::extraction::segmenter::{find_section, Section};
use crate::extraction::skills::extract_skills;

const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "degree",
    "diploma",
    "certificate",
];

fn gpa_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)gpa[:\s]*([0-4](?:\.\d{1,2})?)").expect("gpa regex is valid"))
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://\S+").expect("url regex is valid"))
}

/// Work experience. A line carrying a date token starts a new entry; the
/// line immediately before it is the job title; following non-date lines
/// accumulate into the description until the next date line (whose own
/// title line is kept out of this entry's description).
pub fn extract_experience(lines: &[String]) -> Vec<ExperienceEntry> {
    let Some(range) = find_section(lines, Section::Experience) else {
        return Vec::new();
    };
    let section = &lines[range];

    let date_lines: Vec<usize> = (0..section.len())
        .filter(|&i| has_date_token(&section[i]))
        .collect();

    let mut entries = Vec::new();
    for (k, &d) in date_lines.iter().enumerate() {
        let title = if d > 0 && !has_date_token(&section[d - 1]) {
            section[d - 1].clone()
        } else {
            "Work Experience".to_string()
        };

        let (start_date, end_date) = parse_date_range(&section[d]);
        let company = company_from_date_line(&section[d]);

        // The line right before the next date line belongs to the next
        // entry as its title, not to this description.
        let desc_end = match date_lines.get(k + 1) {
            Some(&next) => next.saturating_sub(1).max(d + 1),
            None => section.len(),
        };
        let description = section[(d + 1).min(desc_end)..desc_end].join(" ");

        let skills = extract_skills(&format!("{title} {description}"));

        entries.push(ExperienceEntry {
            title,
            company,
            location: None,
            start_date,
            end_date,
            description,
            skills,
        });
    }
    entries
}

/// Splits a date line on `-`, `|` or `@` and takes the second segment as
/// the company name.
fn company_from_date_line(line: &str) -> String {
    let segments: Vec<&str> = line
        .split(['-', '|', '@'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    match segments.get(1) {
        Some(s) => s.to_string(),
        None => "Unknown Company".to_string(),
    }
}

/// Education. A degree-keyword line opens an entry; the following line is
/// the institution; the next three lines are scanned for a graduation year
/// and a GPA.
pub fn extract_education(lines: &[String]) -> Vec<EducationEntry> {
    let Some(range) = find_section(lines, Section::Education) else {
        return Vec::new();
    };
    let section = &lines[range];

    let mut entries = Vec::new();
    for (i, line) in section.iter().enumerate() {
        let lower = line.to_lowercase();
        if !DEGREE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            continue;
        }

        let institution = section.get(i + 1).cloned().unwrap_or_default();
        let window = &section[(i + 1).min(section.len())..(i + 4).min(section.len())];

        let end_date = window.iter().find_map(|l| date_tokens(l).into_iter().next());
        let gpa = std::iter::once(line)
            .chain(window.iter())
            .find_map(|l| gpa_re().captures(l))
            .map(|caps| caps[1].to_string());

        entries.push(EducationEntry {
            degree: line.clone(),
            institution,
            location: None,
            start_date: None,
            end_date,
            gpa,
        });
    }
    entries
}

/// Certifications. Every line longer than 5 characters becomes an entry;
/// a short following line is consumed as the issuer.
pub fn extract_certifications(lines: &[String]) -> Vec<CertificationEntry> {
    let Some(range) = find_section(lines, Section::Certifications) else {
        return Vec::new();
    };
    let section = &lines[range];

    let mut entries = Vec::new();
    let mut i = 0;
    while i < section.len() {
        let line = &section[i];
        if line.chars().count() <= 5 {
            i += 1;
            continue;
        }

        let next = section.get(i + 1);
        let combined = match next {
            Some(n) => format!("{line} {n}"),
            None => line.clone(),
        };
        let date = date_tokens(&combined).into_iter().next();

        let issuer = match next {
            Some(n) if n.chars().count() < 50 => {
                i += 2;
                n.clone()
            }
            _ => {
                i += 1;
                "Unknown".to_string()
            }
        };

        entries.push(CertificationEntry {
            name: line.clone(),
            issuer,
            date,
            url: url_re().find(&combined).map(|m| m.as_str().to_string()),
        });
    }
    entries
}

/// Projects. Every line longer than 5 characters becomes an entry; a long
/// following line is consumed as the description.
pub fn extract_projects(lines: &[String]) -> Vec<ProjectEntry> {
    let Some(range) = find_section(lines, Section::Projects) else {
        return Vec::new();
    };
    let section = &lines[range];

    let mut entries = Vec::new();
    let mut i = 0;
    while i < section.len() {
        let line = &section[i];
        if line.chars().count() <= 5 {
            i += 1;
            continue;
        }

        let next = section.get(i + 1);
        let combined = match next {
            Some(n) => format!("{line} {n}"),
            None => line.clone(),
        };
        let url = url_re().find(&combined).map(|m| m.as_str().to_string());

        let description = match next {
            Some(n) if n.chars().count() > 20 => {
                i += 2;
                n.clone()
            }
            _ => {
                i += 1;
                String::new()
            }
        };

        entries.push(ProjectEntry {
            name: line.clone(),
            description: description.clone(),
            technologies: extract_skills(&format!("{line} {description}")),
            url,
        });
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::segmenter::to_lines;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── experience ──────────────────────────────────────────────────────

    #[test]
    fn test_experience_title_company_and_dates() {
        let lines = to_lines(
            "Work Experience\n\
             Senior Backend Engineer\n\
             6/2019 - Initech\n\
             Built payment APIs in Python and PostgreSQL\n\
             Education\n\
             BS Computer Science",
        );
        let entries = extract_experience(&lines);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Senior Backend Engineer");
        assert_eq!(entries[0].company, "Initech");
        assert_eq!(entries[0].start_date, Some(ymd(2019, 6, 1)));
        assert_eq!(entries[0].end_date, None);
        assert!(entries[0].description.contains("payment APIs"));
        assert!(entries[0].skills.contains(&"python".to_string()));
    }

    #[test]
    fn test_experience_two_date_tokens_set_both_bounds() {
        let lines = to_lines("Experience\nEngineer\n3/2019 - 5/2021 @ Acme");
        let entries = extract_experience(&lines);
        assert_eq!(entries[0].start_date, Some(ymd(2019, 3, 1)));
        assert_eq!(entries[0].end_date, Some(ymd(2021, 5, 1)));
    }

    #[test]
    fn test_experience_second_entry_title_excluded_from_description() {
        let lines = to_lines(
            "Experience\n\
             Engineer\n\
             2018 - Initech\n\
             Shipped the billing service\n\
             Senior Engineer\n\
             2021 - Acme\n\
             Led the platform team",
        );
        let entries = extract_experience(&lines);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "Shipped the billing service");
        assert_eq!(entries[1].title, "Senior Engineer");
        assert_eq!(entries[1].description, "Led the platform team");
    }

    #[test]
    fn test_experience_date_line_without_preceding_title() {
        // First content line is already a date line: heading is not a title.
        let lines = to_lines("Experience\n2019 - Initech\nDid things");
        let entries = extract_experience(&lines);
        assert_eq!(entries[0].title, "Work Experience");
    }

    #[test]
    fn test_experience_company_defaults_when_no_second_segment() {
        let lines = to_lines("Experience\nEngineer\n2019");
        let entries = extract_experience(&lines);
        assert_eq!(entries[0].company, "Unknown Company");
    }

    #[test]
    fn test_experience_missing_section_is_empty() {
        let lines = to_lines("Jane Doe\njane@example.com");
        assert!(extract_experience(&lines).is_empty());
    }

    // ── education ───────────────────────────────────────────────────────

    #[test]
    fn test_education_entry_with_institution_year_and_gpa() {
        let lines = to_lines(
            "Education\n\
             Bachelor of Science in Computer Science\n\
             State University\n\
             Graduated 2018, GPA: 3.8",
        );
        let entries = extract_education(&lines);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].degree, "Bachelor of Science in Computer Science");
        assert_eq!(entries[0].institution, "State University");
        assert_eq!(entries[0].end_date, Some(ymd(2018, 1, 1)));
        assert_eq!(entries[0].gpa.as_deref(), Some("3.8"));
    }

    #[test]
    fn test_education_year_outside_three_line_window_ignored() {
        let lines = to_lines(
            "Education\nMaster of Arts\nUniversity\nfiller one\nfiller two\nfiller 2019",
        );
        let entries = extract_education(&lines);
        assert_eq!(entries[0].end_date, None);
    }

    #[test]
    fn test_education_degree_line_at_section_end() {
        let lines = to_lines("Education\nPhD in Physics");
        let entries = extract_education(&lines);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].institution, "");
        assert_eq!(entries[0].end_date, None);
    }

    #[test]
    fn test_education_non_degree_lines_skipped() {
        let lines = to_lines("Education\nCoursework in many topics\nBachelor of Arts\nCollege");
        let entries = extract_education(&lines);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].degree, "Bachelor of Arts");
    }

    // ── certifications ──────────────────────────────────────────────────

    #[test]
    fn test_certification_with_issuer_and_date() {
        let lines = to_lines(
            "Certifications\n\
             AWS Certified Solutions Architect\n\
             Amazon Web Services, 2021",
        );
        let entries = extract_certifications(&lines);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "AWS Certified Solutions Architect");
        assert_eq!(entries[0].issuer, "Amazon Web Services, 2021");
        assert_eq!(entries[0].date, Some(ymd(2021, 1, 1)));
    }

    #[test]
    fn test_certification_long_next_line_means_unknown_issuer() {
        let long_line = "x".repeat(60);
        let lines = to_lines(&format!("Certifications\nSecurity Plus\n{long_line}"));
        let entries = extract_certifications(&lines);
        assert_eq!(entries[0].issuer, "Unknown");
        // The long line was not consumed and becomes its own entry.
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_certification_short_lines_skipped() {
        let lines = to_lines("Certifications\nabc\nCCNA Routing and Switching\nCisco");
        let entries = extract_certifications(&lines);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "CCNA Routing and Switching");
    }

    // ── projects ────────────────────────────────────────────────────────

    #[test]
    fn test_project_with_description_and_url() {
        let lines = to_lines(
            "Projects\n\
             Flight Tracker\n\
             Real-time flight map built with React and Rust, https://example.com/tracker",
        );
        let entries = extract_projects(&lines);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Flight Tracker");
        assert!(entries[0].description.contains("Real-time flight map"));
        assert_eq!(
            entries[0].url.as_deref(),
            Some("https://example.com/tracker")
        );
        assert!(entries[0].technologies.contains(&"react".to_string()));
        assert!(entries[0].technologies.contains(&"rust".to_string()));
    }

    #[test]
    fn test_project_short_next_line_is_not_description() {
        let lines = to_lines("Projects\nChess Engine\nfun one\nTiny");
        let entries = extract_projects(&lines);
        assert_eq!(entries[0].name, "Chess Engine");
        assert_eq!(entries[0].description, "");
        // "fun one" (7 chars) was not consumed as a description, so it
        // stands as its own entry; "Tiny" is below the length floor.
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name, "fun one");
    }

    #[test]
    fn test_projects_missing_section_is_empty() {
        assert!(extract_projects(&to_lines("nothing here")).is_empty());
    }
}
