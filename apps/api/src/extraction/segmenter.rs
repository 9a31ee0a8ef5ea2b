//! Section Segmenter — turns plain text into the ordered line sequence the
//! field extractors consume, and locates section boundaries by heading
//! keywords. Line order is the only positional signal the pipeline has.

use std::ops::Range;

/// Resume sections located by heading-keyword match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Experience,
    Education,
    Skills,
    Certifications,
    Projects,
    Summary,
}

impl Section {
    /// Heading keywords, matched case-insensitively as substrings.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Section::Experience => &["experience", "employment", "work history"],
            Section::Education => &["education", "academic"],
            Section::Skills => &["skills", "competencies", "technologies"],
            Section::Certifications => &["certification", "licenses"],
            Section::Projects => &["projects", "portfolio"],
            Section::Summary => &["summary", "objective", "profile", "about"],
        }
    }

    /// Sections that terminate each other's ranges. Summary is deliberately
    /// absent: "profile"/"about" appear too often in body text to act as a
    /// reliable terminator.
    const TERMINATORS: [Section; 5] = [
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Certifications,
        Section::Projects,
    ];
}

/// Splits text into non-empty, whitespace-trimmed lines, order preserved.
pub fn to_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn matches_any(line: &str, keywords: &[&str]) -> bool {
    let lower = line.to_lowercase();
    keywords.iter().any(|kw| lower.contains(kw))
}

/// Locates the content range of a section: the half-open run of lines after
/// the first line matching one of the section's heading keywords, ending at
/// the first subsequent line that reads as a *different* section's heading,
/// or at end-of-sequence. `None` when no heading matches.
pub fn find_section(lines: &[String], section: Section) -> Option<Range<usize>> {
    let heading = lines
        .iter()
        .position(|line| matches_any(line, section.keywords()))?;

    let start = heading + 1;
    let end = lines[start..]
        .iter()
        .position(|line| {
            Section::TERMINATORS
                .iter()
                .filter(|other| **other != section)
                .any(|other| matches_any(line, other.keywords()))
        })
        .map(|offset| start + offset)
        .unwrap_or(lines.len());

    Some(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        to_lines(text)
    }

    #[test]
    fn test_to_lines_trims_and_drops_empties() {
        let text = "  Jane Doe  \n\n   \njane@example.com\n\tEngineer\t\n";
        assert_eq!(
            to_lines(text),
            vec!["Jane Doe", "jane@example.com", "Engineer"]
        );
    }

    #[test]
    fn test_to_lines_preserves_order() {
        let text = "first\nsecond\nthird";
        assert_eq!(to_lines(text), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_to_lines_empty_input() {
        assert!(to_lines("").is_empty());
        assert!(to_lines("\n \n\t\n").is_empty());
    }

    #[test]
    fn test_find_section_terminated_by_other_heading() {
        let lines = lines(
            "Work Experience\nSoftware Engineer\nAcme - 2019\nEducation\nBS Computer Science",
        );
        let range = find_section(&lines, Section::Experience).unwrap();
        assert_eq!(range, 1..3);
        assert_eq!(lines[range.clone()], ["Software Engineer", "Acme - 2019"]);
    }

    #[test]
    fn test_find_section_runs_to_end_without_terminator() {
        let lines = lines("Education\nBS Computer Science\nState University\n2018");
        let range = find_section(&lines, Section::Education).unwrap();
        assert_eq!(range, 1..4);
    }

    #[test]
    fn test_find_section_missing_heading_is_none() {
        let lines = lines("Jane Doe\njane@example.com\nSome body text");
        assert!(find_section(&lines, Section::Projects).is_none());
    }

    #[test]
    fn test_heading_match_is_case_insensitive_substring() {
        let lines = lines("TECHNICAL SKILLS\nPython, Rust\nPROJECTS\nThing");
        let range = find_section(&lines, Section::Skills).unwrap();
        assert_eq!(lines[range], ["Python, Rust"]);
    }

    #[test]
    fn test_own_keywords_do_not_terminate_own_section() {
        // A second "experience" mention inside the section keeps the range open.
        let lines = lines("Experience\nSenior role\nMore experience details\nEducation\nBS");
        let range = find_section(&lines, Section::Experience).unwrap();
        assert_eq!(range, 1..3);
    }

    #[test]
    fn test_empty_section_directly_followed_by_terminator() {
        let lines = lines("Experience\nEducation\nBS");
        let range = find_section(&lines, Section::Experience).unwrap();
        assert!(range.is_empty());
    }
}
